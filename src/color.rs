use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Category colours: team → Color32
// ---------------------------------------------------------------------------

/// Maps category labels (team codes) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let mapping = labels
            .iter()
            .zip(generate_palette(labels.len()))
            .map(|(l, c)| (l.to_string(), c))
            .collect();
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for correlations
// ---------------------------------------------------------------------------

/// Blue → light grey → red over `[lo, hi]`; values outside are clamped.
pub fn diverging(value: f64, lo: f64, hi: f64) -> Color32 {
    let cold: LinSrgb = Srgb::new(59u8, 76, 192).into_format::<f32>().into_linear();
    let mid: LinSrgb = Srgb::new(221u8, 221, 221).into_format::<f32>().into_linear();
    let warm: LinSrgb = Srgb::new(180u8, 4, 38).into_format::<f32>().into_linear();

    let t = if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0) as f32
    } else {
        0.5
    };
    let lin: LinSrgb = if t < 0.5 {
        cold.mix(mid, t * 2.0)
    } else {
        mid.mix(warm, (t - 0.5) * 2.0)
    };
    to_color32(Srgb::from_linear(lin))
}

/// Black or white, whichever reads better on `bg`.
pub fn text_on(bg: Color32) -> Color32 {
    let luma = 0.299 * bg.r() as f32 + 0.587 * bg.g() as f32 + 0.114 * bg.b() as f32;
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert_eq!(generate_palette(30).len(), 30);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn diverging_ends_are_blue_and_red() {
        let lo = diverging(-1.0, -1.0, 1.0);
        let hi = diverging(1.0, -1.0, 1.0);
        assert!(lo.b() > lo.r());
        assert!(hi.r() > hi.b());
        assert_eq!(diverging(-5.0, -1.0, 1.0), lo);
    }

    #[test]
    fn unknown_team_is_grey() {
        let cm = ColorMap::new(["BOS", "LAL"]);
        assert_ne!(cm.color_for("BOS"), cm.color_for("LAL"));
        assert_eq!(cm.color_for("XXX"), Color32::GRAY);
    }
}
