use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use fl_device_selector::data::filter::FilterOutcome;
use fl_device_selector::data::model::ScoredDevice;

use crate::color::score_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – matches, detail card, full result table
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.snapshot.is_none() {
        idle_view(ui, state);
        return;
    }

    if matches!(state.outcome, FilterOutcome::NoMatches) {
        ui.add_space(12.0);
        ui.label(
            RichText::new(
                "No devices match your current requirements. \
                 Try lowering your RAM or Battery minimums.",
            )
            .color(Color32::from_rgb(230, 160, 30))
            .size(16.0),
        );
        return;
    }

    ui.heading(format!("Found {} Matching Devices", state.outcome.devices().len()));
    ui.add_space(4.0);

    device_selector(ui, &mut state.selected_model, state.outcome.devices());
    ui.separator();

    if let Some(device) = state.selected_device() {
        detail_card(ui, device);
        ui.label(
            RichText::new("Analysis complete. This device is eligible for the Federated Learning cluster.")
                .color(Color32::from_rgb(60, 180, 90)),
        );
    }

    ui.separator();
    ui.strong("All matching devices");
    results_table(ui, state.outcome.devices());
}

fn idle_view(ui: &mut Ui, state: &AppState) {
    ui.centered_and_justified(|ui: &mut Ui| {
        let hint = format!(
            "Please ensure '{}' is available, then use File → Reload or File → Open…",
            state.source_description()
        );
        let text = match &state.status_message {
            Some(msg) => format!("{msg}\n\n{hint}"),
            None => hint,
        };
        ui.heading(text);
    });
}

/// Dropdown over model names; duplicate names resolve to the first match.
fn device_selector(ui: &mut Ui, selected_model: &mut Option<String>, devices: &[ScoredDevice]) {
    let mut selected = selected_model.clone().unwrap_or_default();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select a device for full feature output:");
        egui::ComboBox::from_id_salt("device_selector")
            .selected_text(selected.clone())
            .show_ui(ui, |ui: &mut Ui| {
                for device in devices {
                    let name = &device.record().model_name;
                    ui.selectable_value(&mut selected, name.clone(), name.as_str());
                }
            });
    });
    if selected_model.as_deref() != Some(selected.as_str()) {
        *selected_model = Some(selected);
    }
}

fn detail_card(ui: &mut Ui, device: &ScoredDevice) {
    let record = device.record();
    ui.columns(2, |cols| {
        let ui = &mut cols[0];
        ui.heading(format!("✨ {}", record.model_name));
        ui.label("Predicted FL Accuracy");
        ui.label(
            RichText::new(device.accuracy_label())
                .size(28.0)
                .strong()
                .color(score_color(device.accuracy_score)),
        );
        ui.label(format!("Manufacturer: {}", record.company_name));
        ui.label(format!("Processor: {}", record.processor));

        let ui = &mut cols[1];
        ui.strong("📋 Technical Specifications");
        egui::Grid::new("spec_table")
            .striped(true)
            .num_columns(2)
            .show(ui, |ui: &mut Ui| {
                ui.strong("Feature");
                ui.strong("Value");
                ui.end_row();
                for (feature, value) in record.display_specs() {
                    ui.label(feature);
                    ui.label(value);
                    ui.end_row();
                }
            });
    });
}

fn results_table(ui: &mut Ui, devices: &[ScoredDevice]) {
    const TITLES: [&str; 6] = ["Model", "Company", "Processor", "RAM", "Battery", "Accuracy"];

    ui.push_id("results_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .column(Column::auto().at_least(140.0))
            .columns(Column::auto().at_least(80.0), 4)
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in TITLES {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, devices.len(), |mut row| {
                    let device = &devices[row.index()];
                    let record = device.record();
                    for text in [
                        &record.model_name,
                        &record.company_name,
                        &record.processor,
                        &record.ram,
                        &record.battery_capacity,
                    ] {
                        row.col(|ui: &mut Ui| {
                            ui.label(text.as_str());
                        });
                    }
                    row.col(|ui: &mut Ui| {
                        ui.label(
                            RichText::new(device.accuracy_label())
                                .color(score_color(device.accuracy_score)),
                        );
                    });
                });
            });
    });
}
