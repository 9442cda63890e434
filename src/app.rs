use eframe::egui;
use rare_disease_assistant::Loader;

use crate::state::AppState;
use crate::ui::{chart, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DiagnosisApp {
    pub state: AppState,
}

impl DiagnosisApp {
    /// Create the app and kick off the dataset load.
    pub fn new(loader: Loader) -> Self {
        let mut state = AppState::default();
        state.start_loading(loader);
        Self { state }
    }
}

impl eframe::App for DiagnosisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_loading();
        if self.state.loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // ---- Top panel: title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: symptom checklist ----
        egui::SidePanel::left("symptom_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: diagnosis ----
        egui::CentralPanel::default().show(ctx, |ui| {
            chart::result_view(ui, &self.state);
        });
    }
}
