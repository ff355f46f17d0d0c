use eframe::egui;

use fl_device_selector::source::DeviceSource;

use crate::state::AppState;
use crate::ui::{panels, plot, results};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SelectorApp {
    pub state: AppState,
}

impl SelectorApp {
    /// Build the app over `source` and load the first snapshot.
    pub fn new(source: Box<dyn DeviceSource>) -> Self {
        let mut state = AppState::new(source);
        state.reload();
        Self { state }
    }
}

impl eframe::App for SelectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: hardware requirements ----
        egui::SidePanel::left("requirements_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: RAM vs battery scatter ----
        if !self.state.outcome.devices().is_empty() {
            egui::TopBottomPanel::bottom("scatter_panel")
                .default_height(220.0)
                .resizable(true)
                .show(ctx, |ui| {
                    plot::scatter_plot(ui, &self.state);
                });
        }

        // ---- Central panel: matching devices ----
        egui::CentralPanel::default().show(ctx, |ui| {
            results::central_panel(ui, &mut self.state);
        });
    }
}
