use std::path::Path;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{dashboard, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    /// Start with `data_path` loaded (or its load error on display).
    pub fn new(data_path: &Path) -> Self {
        let mut state = AppState::default();
        state.open(data_path);
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        let events = egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| panels::side_panel(ui, &self.state))
            .inner;
        self.state.apply(events);

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::dashboard(ui, &self.state);
        });
    }
}
