use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StrasseApp {
    pub state: AppState,
}

impl StrasseApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for StrasseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: series toggles ----
        egui::SidePanel::left("series_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: stacked plots ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::panel_plots(ui, &self.state);
        });
    }
}
