use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::pareto::Direction;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – axis selection
// ---------------------------------------------------------------------------

/// Render the left panel: column pickers, directions and the front table.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Axes");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let columns: Vec<String> = dataset.column_names().map(str::to_string).collect();

    let mut picked_x = None;
    let mut picked_y = None;
    egui::Grid::new("axis_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Select X-axis column:");
            picked_x = column_combo(ui, "x_column", state.x_column.as_deref(), &columns);
            ui.end_row();

            ui.label("Select Y-axis column:");
            picked_y = column_combo(ui, "y_column", state.y_column.as_deref(), &columns);
            ui.end_row();
        });
    if let Some(col) = picked_x {
        state.select_x(col);
    }
    if let Some(col) = picked_y {
        state.select_y(col);
    }

    ui.add_space(4.0);
    let mut dx = state.direction_x;
    let mut dy = state.direction_y;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("X:");
        direction_toggle(ui, &mut dx);
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Y:");
        direction_toggle(ui, &mut dy);
    });
    state.set_directions(dx, dy);

    ui.add_space(4.0);
    let ready = state.x_column.is_some() && state.y_column.is_some();
    if ui
        .add_enabled(ready, egui::Button::new("Create Scatter Plot"))
        .clicked()
    {
        state.plot();
    }

    ui.separator();
    front_table(ui, state);
}

fn column_combo(ui: &mut Ui, id: &str, current: Option<&str>, columns: &[String]) -> Option<String> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.unwrap_or("–"))
        .width(200.0)
        .show_ui(ui, |ui: &mut Ui| {
            for col in columns {
                if ui
                    .selectable_label(current == Some(col.as_str()), col)
                    .clicked()
                {
                    picked = Some(col.clone());
                }
            }
        });
    picked
}

fn direction_toggle(ui: &mut Ui, direction: &mut Direction) {
    for d in Direction::ALL {
        ui.selectable_value(direction, d, d.to_string());
    }
}

/// Table of Pareto-front members; clicking a label highlights the option.
fn front_table(ui: &mut Ui, state: &mut AppState) {
    let (Some(snapshot), Some(dataset)) = (&state.snapshot, &state.dataset) else {
        return;
    };
    let Some(front) = &snapshot.front else {
        ui.label(format!("{} points, no front for these columns", snapshot.records.len()));
        return;
    };

    ui.strong(format!(
        "Pareto front: {} of {} options",
        front.len(),
        snapshot.records.len()
    ));
    ui.label(format!(
        "{} x, {} y",
        snapshot.direction_x, snapshot.direction_y
    ));

    let id_column = &state.config.id_column;
    let mut clicked = None;
    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(320.0)
        .column(Column::auto().at_least(48.0))
        .column(Column::remainder())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong(id_column.as_str());
            });
            header.col(|ui| {
                ui.strong("x");
            });
            header.col(|ui| {
                ui.strong("y");
            });
        })
        .body(|mut body| {
            for r in front.iter() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        if ui.link(dataset.row_label(r.row, id_column)).clicked() {
                            clicked = Some(r.row);
                        }
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.4}", r.x));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.4}", r.y));
                    });
                });
            }
        });

    if let Some(row) = clicked {
        state.toggle_highlight(row);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let name = state
                .dataset_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{name}  {} options, {} columns",
                ds.len(),
                ds.column_names().count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open design options")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
