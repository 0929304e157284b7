use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct EligibilityApp {
    pub state: AppState,
}

impl eframe::App for EligibilityApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: guidelines and parameters ----
        egui::SidePanel::left("parameter_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: grade chart ----
        egui::TopBottomPanel::bottom("grade_chart")
            .default_height(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                plot::grade_chart(ui, &self.state);
            });

        // ---- Central panel: table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::horizontal().show(ui, |ui| {
                table::results_table(ui, &self.state);
            });
        });
    }
}
