use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::rank_color;
use crate::state::AppState;

const CARD_NOTE: &str =
    "This is the most probable diagnosis based on your selected symptoms.";

// ---------------------------------------------------------------------------
// Result view (central panel)
// ---------------------------------------------------------------------------

/// Headline card plus the top-N bar chart.
pub fn result_view(ui: &mut Ui, state: &AppState) {
    if state.dataset().is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.loading {
                ui.heading("⏳ Loading dataset…");
            } else {
                ui.heading("Dataset unavailable. Check the log for details.");
            }
        });
        return;
    }

    let Some(result) = &state.result else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select your symptoms and click Diagnose.");
        });
        return;
    };
    let Some(top) = result.top() else {
        return;
    };

    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new("🩺 Most Likely Diagnosis").size(20.0));
            ui.label(
                RichText::new(&top.label)
                    .size(32.0)
                    .strong()
                    .color(Color32::from_rgb(0x00, 0x79, 0x6B)),
            );
            ui.label(RichText::new(CARD_NOTE).italics());
        });
    });
    ui.add_space(12.0);
    ui.heading("Top Predicted Diseases");

    let labels: Vec<String> = result.entries.iter().map(|e| e.label.clone()).collect();
    let bars: Vec<Bar> = result
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            Bar::new(i as f64, e.count as f64)
                .name(&e.label)
                .fill(rank_color(i))
                .width(0.6)
        })
        .collect();

    Plot::new("prediction_distribution")
        .x_axis_label("Disease")
        .y_axis_label("Matching Count")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Matching rows"));
        });
}
