use eframe::egui::{self, Color32, RichText, Ui};

use fl_device_selector::data::model::{ProcessorFilter, BATTERY_RANGE, RAM_RANGE};
use fl_device_selector::source::FileSource;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – requirement widgets
// ---------------------------------------------------------------------------

/// Render the left requirements panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Set Hardware Requirements");
    ui.separator();

    let Some(snapshot) = state.snapshot.clone() else {
        ui.label("No device data loaded.");
        if ui.button("Retry").clicked() {
            state.reload();
        }
        return;
    };

    // ---- Numeric thresholds ----
    let mut ram = state.min_ram_gb;
    ui.label("Minimum RAM (GB)");
    if ui
        .add(egui::DragValue::new(&mut ram).range(RAM_RANGE).speed(0.2))
        .changed()
    {
        state.set_min_ram(ram);
    }
    ui.add_space(6.0);

    let mut battery = state.min_battery_mah;
    ui.label("Minimum Battery (mAh)");
    if ui
        .add(
            egui::DragValue::new(&mut battery)
                .range(BATTERY_RANGE)
                .speed(10.0)
                .suffix(" mAh"),
        )
        .changed()
    {
        state.set_min_battery(battery);
    }
    ui.add_space(6.0);

    // ---- Processor dropdown, populated from the loaded data ----
    ui.label("Select Processor Type");
    let current = state.processor.clone();
    let mut chosen = current.clone();
    egui::ComboBox::from_id_salt("processor")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut chosen, ProcessorFilter::Any, ProcessorFilter::ANY_LABEL);
            for p in snapshot.processors() {
                ui.selectable_value(&mut chosen, ProcessorFilter::Exact(p.clone()), p.as_str());
            }
        });
    if chosen != current {
        state.set_processor(chosen);
    }

    ui.separator();
    if ui.button("Reload data").clicked() {
        state.reload();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(RichText::new(state.source_description()).weak());
        ui.separator();

        if let Some(snapshot) = &state.snapshot {
            ui.label(format!(
                "{} devices loaded, {} matching",
                snapshot.len(),
                state.outcome.devices().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Pick a device table and make it the active source.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open device table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq", "xlsx", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("Spreadsheet", &["xlsx", "xls", "ods"])
        .pick_file();

    if let Some(path) = file {
        let source = FileSource::new(path);
        log::info!("Switching device source to {}", source.path().display());
        state.set_source(Box::new(source));
    }
}
