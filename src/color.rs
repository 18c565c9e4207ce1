use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// A single saturated colour at the given hue (degrees).
pub fn hue_color(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.70, 0.50);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Chart accents
// ---------------------------------------------------------------------------

/// Fixed accent colours for the chart surfaces.
#[derive(Debug, Clone)]
pub struct ChartColors {
    /// Timeline value line.
    pub value_line: Color32,
    /// Per-period value bars.
    pub value_bars: Color32,
    /// Forecast marker.
    pub forecast: Color32,
    /// Positive period-over-period change.
    pub increase: Color32,
    /// Negative period-over-period change.
    pub decrease: Color32,
}

impl Default for ChartColors {
    fn default() -> Self {
        ChartColors {
            value_line: hue_color(215.0),
            value_bars: hue_color(260.0),
            forecast: hue_color(35.0),
            increase: hue_color(130.0),
            decrease: hue_color(0.0),
        }
    }
}
