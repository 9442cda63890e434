use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Bar colours by rank
// ---------------------------------------------------------------------------

/// Highest → green, middle → blue, lowest → amber.
const RANK_HEX: [&str; 3] = ["#4CAF50", "#2196F3", "#FFC107"];

/// Colour of the bar at `rank` (0 = best match).
pub fn rank_color(rank: usize) -> Color32 {
    RANK_HEX
        .get(rank)
        .and_then(|hex| Srgb::<u8>::from_str(hex).ok())
        .map(|c| Color32::from_rgb(c.red, c.green, c.blue))
        .unwrap_or_else(|| hue_color(rank))
}

/// Fallback for ranks past the fixed palette: evenly spaced hues.
fn hue_color(rank: usize) -> Color32 {
    let hue = (rank as f32 * 137.5) % 360.0;
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
