use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            to_color32(Hsl::new(hue, 0.65, 0.55).into_color())
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

fn hex(rgb: u32) -> LinSrgb {
    let c = Srgb::new(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    );
    c.into_linear()
}

/// Piecewise-linear gradient through evenly spaced `stops`, mixed in linear RGB.
fn gradient(stops: &[u32], t: f64) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let segments = (stops.len() - 1) as f64;
    let pos = t * segments;
    let i = (pos.floor() as usize).min(stops.len() - 2);
    let local = (pos - i as f64) as f32;
    let mixed = hex(stops[i]).mix(hex(stops[i + 1]), local);
    to_color32(Srgb::from_linear(mixed))
}

const VIRIDIS: [u32; 5] = [0x440154, 0x3b528b, 0x21918c, 0x5ec962, 0xfde725];
const RED_BLUE: [u32; 3] = [0x2166ac, 0xf7f7f7, 0xb2182b];

/// Sequential scale for magnitudes, `t` in `[0, 1]`.
pub fn sequential(t: f64) -> Color32 {
    gradient(&VIRIDIS, t)
}

/// Sequential colour of `value` within `[min, max]`.
pub fn sequential_in(value: f64, min: f64, max: f64) -> Color32 {
    let span = max - min;
    if span.abs() < f64::EPSILON {
        return sequential(0.5);
    }
    sequential((value - min) / span)
}

/// Diverging scale for coefficients in `[-1, 1]`: blue, white, red.
pub fn diverging(r: f64) -> Color32 {
    gradient(&RED_BLUE, (r + 1.0) / 2.0)
}

// ---------------------------------------------------------------------------
// Category colours: label → Color32
// ---------------------------------------------------------------------------

/// Maps the labels of a categorical axis to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
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
