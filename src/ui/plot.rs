use eframe::egui::{Pos2, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points};

use crate::state::AppState;

/// Clicks further than this (in screen points) from every marker are ignored.
const PICK_RADIUS: f32 = 8.0;

// ---------------------------------------------------------------------------
// Pareto scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter plot in the central panel. Clicking a point toggles its
/// highlight.
pub fn pareto_plot(ui: &mut Ui, state: &mut AppState) {
    let Some(snapshot) = &state.snapshot else {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.dataset.is_some() {
                ui.heading("Pick X and Y columns, then Create Scatter Plot");
            } else {
                ui.heading("Open a file to plot design options  (File → Open…)");
            }
        });
        return;
    };
    let colors = state.colors;

    let response = Plot::new("pareto_plot")
        .legend(Legend::default())
        .x_axis_label(snapshot.x_column.clone())
        .y_axis_label(snapshot.y_column.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let on_front = |row: usize| {
                snapshot
                    .front
                    .as_ref()
                    .is_some_and(|front| front.contains(row))
            };

            let dominated: PlotPoints = snapshot
                .records
                .iter()
                .filter(|r| !on_front(r.row))
                .map(|r| [r.x, r.y])
                .collect();
            plot_ui.points(
                Points::new(dominated)
                    .name("data points")
                    .color(colors.data)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(3.5),
            );

            if let Some(front) = &snapshot.front {
                let mut members: Vec<[f64; 2]> =
                    front.records().iter().map(|r| [r.x, r.y]).collect();
                plot_ui.points(
                    Points::new(PlotPoints::from(members.clone()))
                        .name("pareto front")
                        .color(colors.front)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );

                members.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
                plot_ui.line(
                    Line::new(PlotPoints::from(members))
                        .name("pareto front")
                        .color(colors.front_line)
                        .width(1.0),
                );
            }

            for h in &state.highlights {
                let Some(r) = snapshot.record(h.row) else {
                    continue;
                };
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![[r.x, r.y]]))
                        .name(format!("{} {}", h.marker.symbol, h.label))
                        .color(colors.highlight)
                        .shape(h.marker.shape)
                        .filled(true)
                        .radius(7.0),
                );
            }
        });

    if !response.response.clicked() {
        return;
    }
    let Some(pointer) = response.response.interact_pointer_pos() else {
        return;
    };
    let candidates: Vec<(usize, Pos2)> = snapshot
        .records
        .iter()
        .map(|r| (r.row, response.transform.position_from_point(&PlotPoint::new(r.x, r.y))))
        .collect();

    if let Some(row) = nearest_point(&candidates, pointer, PICK_RADIUS) {
        state.toggle_highlight(row);
    }
}

/// The candidate closest to `target`, if any lies within `max_dist`.
pub fn nearest_point(candidates: &[(usize, Pos2)], target: Pos2, max_dist: f32) -> Option<usize> {
    candidates
        .iter()
        .map(|&(row, pos)| (row, pos.distance(target)))
        .filter(|&(_, d)| d <= max_dist)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(row, _)| row)
}
