use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Plot colours
// ---------------------------------------------------------------------------

/// Convert an HSL triple (hue in degrees) to an egui colour.
pub fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

/// Colours for the data series and the picked-point overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotColors {
    pub series: Color32,
    pub highlight: Color32,
}

impl PlotColors {
    /// Series in `hue`, highlight in the complementary hue so it stands out.
    pub fn from_hue(hue: f32) -> Self {
        PlotColors {
            series: hsl_color(hue.rem_euclid(360.0), 0.65, 0.55),
            highlight: hsl_color((hue + 180.0).rem_euclid(360.0), 0.85, 0.55),
        }
    }
}

impl Default for PlotColors {
    fn default() -> Self {
        Self::from_hue(210.0)
    }
}
