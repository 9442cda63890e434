use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, Notice};

// ---------------------------------------------------------------------------
// Left side panel – symptom checklist
// ---------------------------------------------------------------------------

/// Render the symptom checklist with the Diagnose / Clear actions.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Symptoms");
    ui.separator();

    if state.dataset().is_none() {
        if state.loading {
            ui.horizontal(|ui: &mut Ui| {
                ui.spinner();
                ui.label("Please wait…");
            });
        } else {
            ui.label("No dataset loaded.");
        }
        return;
    }

    ui.add(egui::TextEdit::singleline(&mut state.search).hint_text("Search symptoms…"));
    ui.label(format!("{} selected", state.selected.len()));

    ui.horizontal(|ui: &mut Ui| {
        let diagnose = egui::Button::new(RichText::new("Diagnose").strong().color(Color32::WHITE))
            .fill(Color32::from_rgb(0x4C, 0xAF, 0x50));
        if ui.add(diagnose).clicked() {
            state.run_diagnosis();
        }
        if ui.button("Clear").clicked() {
            state.clear_selection();
        }
    });

    match &state.notice {
        Some(Notice::Warning(msg)) => {
            let amber = Color32::from_rgb(0xE6, 0x8A, 0x00);
            ui.label(RichText::new(format!("⚠ {msg}")).color(amber));
        }
        Some(Notice::NoMatch) => {
            ui.label(
                RichText::new("⚠ No clear match found. Try selecting different symptoms.")
                    .color(Color32::RED),
            );
        }
        None => {}
    }
    ui.separator();

    let symptoms = state.visible_symptoms();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for name in &symptoms {
                let mut checked = state.selected.contains(name);
                if ui.checkbox(&mut checked, name.as_str()).changed() {
                    state.toggle_symptom(name);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with dataset summary and load errors.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("🧬 Rare Disease Diagnosis Assistant");
        ui.separator();

        if let Some(ds) = state.dataset() {
            ui.label(format!(
                "{} records, {} symptoms",
                ds.len(),
                ds.features().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(format!("❌ {msg}")).color(Color32::RED));
            if ui.small_button("✖").clicked() {
                state.status_message = None;
            }
        }
    });
}
