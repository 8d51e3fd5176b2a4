use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EstateLensApp {
    pub state: AppState,
}

impl EstateLensApp {
    /// Build the app and try the configured data file straight away; a failed
    /// load leaves the dashboard in its error state.
    pub fn new(config: &Config) -> Self {
        let mut state = AppState::new(config.report_config(), config.table_rows);
        state.open(&config.data);
        Self { state }
    }
}

impl eframe::App for EstateLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::dashboard(ui, &mut self.state);
        });
    }
}
