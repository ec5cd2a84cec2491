use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Lab, Mix, Srgb};

use salary_story::CategoricalField;

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

fn hex(rgb: u32) -> Color32 {
    Color32::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the labels of a categorical field to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub field: CategoricalField,
    mapping: BTreeMap<&'static str, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Education and industry use fixed colours; location gets a generated palette.
    pub fn new(field: CategoricalField) -> Self {
        let labels = field.domain();
        let colors: Vec<Color32> = match field {
            CategoricalField::Education => vec![hex(0x60a5fa), hex(0x34d399), hex(0xa78bfa)],
            CategoricalField::Industry => {
                vec![hex(0xf472b6), hex(0x2dd4bf), hex(0xfb923c), hex(0xa78bfa)]
            }
            CategoricalField::Location => generate_palette(labels.len()),
        };
        let mapping = labels.into_iter().zip(colors).collect();

        ColorMap {
            field,
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(&'static str, Color32)> {
        self.mapping.iter().map(|(label, c)| (*label, *c)).collect()
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for correlation coefficients
// ---------------------------------------------------------------------------

/// Red for +1, near-white for 0, blue for −1, interpolated in Lab space.
pub fn diverging(r: f64) -> Color32 {
    let t = r.clamp(-1.0, 1.0) as f32;
    let center: Lab = Srgb::new(0.97_f32, 0.97, 0.97).into_color();
    let end: Lab = if t >= 0.0 {
        Srgb::new(0.70_f32, 0.09, 0.17).into_color()
    } else {
        Srgb::new(0.13_f32, 0.40, 0.67).into_color()
    };
    let rgb: Srgb = center.mix(end, t.abs()).into_color();
    to_color32(rgb)
}

/// Text colour readable on top of [`diverging`].
pub fn diverging_text(r: f64) -> Color32 {
    if r.abs() > 0.5 {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}
