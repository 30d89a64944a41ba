use eframe::egui;

use crate::state::AppState;
use crate::ui::detail::{self, PreviewCache};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyParetoApp {
    pub state: AppState,
    previews: PreviewCache,
}

impl RustyParetoApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            previews: PreviewCache::default(),
        }
    }
}

impl eframe::App for RustyParetoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: axis selection ----
        egui::SidePanel::left("axis_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::pareto_plot(ui, &mut self.state);
        });

        // ---- Floating detail windows for highlighted points ----
        detail::detail_windows(ctx, &mut self.state, &mut self.previews);
        self.state.prune_highlights();
    }
}
