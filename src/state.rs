use std::path::{Path, PathBuf};

use crate::color::{Marker, MarkerCycle, PlotColors};
use crate::config::ViewerConfig;
use crate::data::model::Table;
use crate::pareto::{Direction, InvalidInput, ParetoSet, Record, compute_pareto_front};

// ---------------------------------------------------------------------------
// Plot snapshot
// ---------------------------------------------------------------------------

/// Everything the plot needs for one column pair, computed in one go.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSnapshot {
    pub x_column: String,
    pub y_column: String,
    pub direction_x: Direction,
    pub direction_y: Direction,
    pub records: Vec<Record>,
    /// `None` for scatter-only column pairs.
    pub front: Option<ParetoSet>,
}

impl PlotSnapshot {
    pub fn build(
        table: &Table,
        config: &ViewerConfig,
        x_column: &str,
        y_column: &str,
        direction_x: Direction,
        direction_y: Direction,
    ) -> Result<Self, InvalidInput> {
        let records = table.numeric_pair(x_column, y_column)?;
        let front = if config.is_scatter_only(x_column, y_column) {
            None
        } else {
            Some(compute_pareto_front(&records, direction_x, direction_y)?)
        };

        Ok(Self {
            x_column: x_column.to_string(),
            y_column: y_column.to_string(),
            direction_x,
            direction_y,
            records,
            front,
        })
    }

    pub fn record(&self, row: usize) -> Option<&Record> {
        self.records.iter().find(|r| r.row == row)
    }
}

/// A point the user clicked, shown with its own marker and detail window.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub row: usize,
    pub label: String,
    pub marker: Marker,
    /// Cleared when the user closes the detail window.
    pub open: bool,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,
    pub colors: PlotColors,

    /// Loaded dataset (None until user loads a file). Replaced whole on
    /// reload.
    pub dataset: Option<Table>,
    pub dataset_path: Option<PathBuf>,
    /// Bumped on every `set_dataset`; caches keyed on the dataset compare it.
    pub dataset_generation: u64,

    /// Column picks in the side panel.
    pub x_column: Option<String>,
    pub y_column: Option<String>,
    pub direction_x: Direction,
    pub direction_y: Direction,

    /// Last successfully computed plot.
    pub snapshot: Option<PlotSnapshot>,

    pub highlights: Vec<Highlight>,
    markers: MarkerCycle,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            colors: PlotColors::from_config(&config.colors),
            config,
            dataset: None,
            dataset_path: None,
            dataset_generation: 0,
            x_column: None,
            y_column: None,
            direction_x: Direction::Minimize,
            direction_y: Direction::Minimize,
            snapshot: None,
            highlights: Vec::new(),
            markers: MarkerCycle::default(),
            status_message: None,
        }
    }

    /// Load a file and ingest it; failures are reported in the status line.
    pub fn load_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(table) => self.set_dataset(table, Some(path.to_path_buf())),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, discarding everything derived from the
    /// previous one.
    pub fn set_dataset(&mut self, table: Table, path: Option<PathBuf>) {
        let has = |c: &Option<String>| {
            c.as_deref()
                .is_some_and(|name| table.column(name).is_some())
        };
        if !has(&self.x_column) {
            self.x_column = None;
        }
        if !has(&self.y_column) {
            self.y_column = None;
        }

        self.dataset = Some(table);
        self.dataset_path = path;
        self.dataset_generation += 1;
        self.snapshot = None;
        self.clear_highlights();
        self.status_message = None;
    }

    pub fn select_x(&mut self, column: String) {
        self.direction_x = self.config.direction_for(&column);
        self.x_column = Some(column);
    }

    pub fn select_y(&mut self, column: String) {
        self.direction_y = self.config.direction_for(&column);
        self.y_column = Some(column);
    }

    /// Change an axis direction; an existing plot of the same columns is
    /// recomputed right away.
    pub fn set_directions(&mut self, direction_x: Direction, direction_y: Direction) {
        if (direction_x, direction_y) == (self.direction_x, self.direction_y) {
            return;
        }
        self.direction_x = direction_x;
        self.direction_y = direction_y;

        let same_columns = self.snapshot.as_ref().is_some_and(|s| {
            Some(&s.x_column) == self.x_column.as_ref() && Some(&s.y_column) == self.y_column.as_ref()
        });
        if same_columns {
            self.plot();
        }
    }

    /// Recompute the plot for the selected columns. On failure the previous
    /// snapshot stays on screen.
    pub fn plot(&mut self) {
        let Some(table) = &self.dataset else {
            self.status_message = Some("Open a dataset first".into());
            return;
        };
        let (Some(x), Some(y)) = (self.x_column.as_deref(), self.y_column.as_deref()) else {
            self.status_message = Some("Select an X and a Y column".into());
            return;
        };

        match PlotSnapshot::build(table, &self.config, x, y, self.direction_x, self.direction_y) {
            Ok(snapshot) => {
                match &snapshot.front {
                    Some(front) => log::info!(
                        "Plotted '{x}' vs '{y}': {} of {} options on the Pareto front",
                        front.len(),
                        snapshot.records.len()
                    ),
                    None => log::info!(
                        "Plotted '{x}' vs '{y}' as scatter ({} options)",
                        snapshot.records.len()
                    ),
                }
                let columns_changed = self
                    .snapshot
                    .as_ref()
                    .map_or(true, |s| {
                        s.x_column != snapshot.x_column || s.y_column != snapshot.y_column
                    });
                if columns_changed {
                    self.clear_highlights();
                }
                self.snapshot = Some(snapshot);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Cannot plot '{x}' vs '{y}': {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Highlight `row` with the next marker, or drop its highlight if it has
    /// one already.
    pub fn toggle_highlight(&mut self, row: usize) {
        if let Some(pos) = self.highlights.iter().position(|h| h.row == row) {
            self.highlights.remove(pos);
            return;
        }
        let Some(table) = &self.dataset else {
            return;
        };
        let label = table.row_label(row, &self.config.id_column);
        let marker = self.markers.next_marker();
        log::info!("Highlighted option {label} (row {row})");
        self.highlights.push(Highlight {
            row,
            label,
            marker,
            open: true,
        });
    }

    /// Drop highlights whose detail window was closed.
    pub fn prune_highlights(&mut self) {
        self.highlights.retain(|h| h.open);
    }

    /// Highlights and the marker order start over together.
    fn clear_highlights(&mut self) {
        self.highlights.clear();
        self.markers = MarkerCycle::default();
    }
}
