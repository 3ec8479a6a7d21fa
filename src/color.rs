use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::schema::ExperimentSchema;

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
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours: sensor name → Color32
// ---------------------------------------------------------------------------

/// Colours for every plotted sensor. Each panel gets its own full hue circle
/// so neighbouring lines in one panel stay distinguishable.
#[derive(Debug, Clone, Default)]
pub struct SeriesColors {
    mapping: BTreeMap<String, Color32>,
}

impl SeriesColors {
    pub fn for_schema(schema: &ExperimentSchema) -> Self {
        let mut mapping = BTreeMap::new();
        for panel in &schema.panels {
            let names = schema.panel_columns(panel);
            for (name, color) in names.iter().zip(generate_palette(names.len())) {
                mapping.insert(name.to_string(), color);
            }
        }
        SeriesColors { mapping }
    }

    pub fn color_for(&self, series: &str) -> Color32 {
        self.mapping.get(series).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::onokoro57;

    #[test]
    fn test_generate_palette() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn test_series_colors() {
        let colors = SeriesColors::for_schema(&onokoro57());
        assert_ne!(colors.color_for("Target Chamber"), Color32::GRAY);
        assert_eq!(colors.color_for("unknown"), Color32::GRAY);
    }
}
