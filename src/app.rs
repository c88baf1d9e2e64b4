use eframe::egui;

use crate::session::Session;
use crate::state::AppState;
use crate::ui::{panels, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MetaboliteDashboardApp {
    pub state: AppState,
}

impl MetaboliteDashboardApp {
    pub fn new(session: Session) -> Self {
        Self {
            state: AppState::new(session),
        }
    }
}

impl eframe::App for MetaboliteDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters and analysis buttons ----
        egui::SidePanel::left("analysis_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: result tables ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    tables::results_view(ui, &self.state);
                });
        });
    }
}
