use eframe::egui::Ui;
use egui_plot::{HLine, Plot, Points, VLine};

use crate::color::score_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// RAM vs battery scatter (bottom panel)
// ---------------------------------------------------------------------------

/// One point per matching device, coloured by score, with the current
/// thresholds drawn as guide lines. The selected device is drawn larger.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    let criteria = state.criteria();
    let selected = state.selected_model.as_deref();

    Plot::new("ram_battery_scatter")
        .x_axis_label("RAM (GB)")
        .y_axis_label("Battery (mAh)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for device in state.outcome.devices() {
                let (Some(ram), Some(battery)) = (device.device.ram_gb, device.device.battery_mah)
                else {
                    continue;
                };
                let name = &device.record().model_name;
                let radius = if selected == Some(name.as_str()) { 7.0 } else { 4.0 };

                let points = Points::new(vec![[ram, battery]])
                    .name(format!("{name} ({})", device.accuracy_label()))
                    .color(score_color(device.accuracy_score))
                    .filled(true)
                    .radius(radius);
                plot_ui.points(points);
            }

            plot_ui.vline(VLine::new(criteria.min_ram_gb).name("Minimum RAM"));
            plot_ui.hline(HLine::new(criteria.min_battery_mah).name("Minimum battery"));
        });
}
