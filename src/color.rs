use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of one column to distinct colours.
///
/// Built from the dataset's first-observed value order, so a category keeps
/// its colour no matter how the filters reorder a chart.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: HashMap<String, Color32>,
}

impl ColorMap {
    pub fn new<'a>(categories: impl IntoIterator<Item = &'a str>) -> Self {
        let categories: Vec<&str> = categories.into_iter().collect();
        let palette = generate_palette(categories.len());
        ColorMap {
            mapping: categories
                .into_iter()
                .zip(palette)
                .map(|(c, color)| (c.to_string(), color))
                .collect(),
        }
    }

    /// Colour for `category`; grey for anything the map has not seen.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}
