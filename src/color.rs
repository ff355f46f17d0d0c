use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use fl_device_selector::data::filter::{SCORE_CEILING, SCORE_FLOOR};

// ---------------------------------------------------------------------------
// Score → colour gradient
// ---------------------------------------------------------------------------

/// Hue at the score floor (red) and ceiling (green).
const FLOOR_HUE: f32 = 0.0;
const CEILING_HUE: f32 = 120.0;

/// Colour for an accuracy score: red at the floor through amber to green at
/// the ceiling. Out-of-range scores take the nearest end.
pub fn score_color(score: f64) -> Color32 {
    let t = ((score - SCORE_FLOOR) / (SCORE_CEILING - SCORE_FLOOR)).clamp(0.0, 1.0) as f32;
    let hue = FLOOR_HUE + t * (CEILING_HUE - FLOOR_HUE);
    let hsl = Hsl::new(hue, 0.75, 0.5);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_is_red_and_ceiling_is_green() {
        let low = score_color(SCORE_FLOOR);
        assert!(low.r() > low.g());
        let high = score_color(SCORE_CEILING);
        assert!(high.g() > high.r());
    }

    #[test]
    fn out_of_range_clamps() {
        assert_eq!(score_color(0.0), score_color(SCORE_FLOOR));
        assert_eq!(score_color(150.0), score_color(SCORE_CEILING));
    }
}
