use eframe::egui::Color32;
use palette::{Mix, Srgb};

// ---------------------------------------------------------------------------
// Linear colour scale: numeric value → Color32
// ---------------------------------------------------------------------------

/// Two-stop colour ramp over a numeric domain, clamped at both ends.
/// Interpolation happens in gamma-encoded sRGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    min: f64,
    max: f64,
    low: Srgb<u8>,
    high: Srgb<u8>,
}

impl ColorScale {
    pub fn new(min: f64, max: f64, low: Srgb<u8>, high: Srgb<u8>) -> Self {
        ColorScale { min, max, low, high }
    }

    /// Heart grid: pale blue to red, saturating at 50 %.
    pub fn heart() -> Self {
        Self::new(
            0.0,
            50.0,
            Srgb::new(0xe3, 0xf2, 0xfd),
            Srgb::new(0xd3, 0x2f, 0x2f),
        )
    }

    /// Bar chart: pale cyan to blue across `[0, max]`.
    pub fn bars(max: f64) -> Self {
        Self::new(
            0.0,
            max,
            Srgb::new(0xe0, 0xf3, 0xf8),
            Srgb::new(0x00, 0x7a, 0xcc),
        )
    }

    /// Position of `value` in the domain, clamped to `[0, 1]`.
    pub fn unit(&self, value: f64) -> f32 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON || !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0) as f32
    }

    /// Look up the colour for a value.
    pub fn color_for(&self, value: f64) -> Color32 {
        let low: Srgb<f32> = self.low.into_format();
        let high: Srgb<f32> = self.high.into_format();
        let rgb: Srgb<u8> = low.mix(high, self.unit(value)).into_format();
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }

    /// Evenly spaced legend stops (value label → colour) for the UI.
    pub fn legend_entries(&self, steps: usize) -> Vec<(String, Color32)> {
        if steps < 2 {
            return vec![(format!("{:.0}%", self.min), self.color_for(self.min))];
        }
        (0..steps)
            .map(|i| {
                let v = self.min + (self.max - self.min) * i as f64 / (steps - 1) as f64;
                (format!("{v:.0}%"), self.color_for(v))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_map_to_stops() {
        let scale = ColorScale::heart();
        assert_eq!(scale.color_for(0.0), Color32::from_rgb(0xe3, 0xf2, 0xfd));
        assert_eq!(scale.color_for(50.0), Color32::from_rgb(0xd3, 0x2f, 0x2f));
    }

    #[test]
    fn values_outside_the_domain_are_clamped() {
        let scale = ColorScale::heart();
        assert_eq!(scale.color_for(90.0), scale.color_for(50.0));
        assert_eq!(scale.unit(-5.0), 0.0);
    }

    #[test]
    fn degenerate_domain_uses_low_stop() {
        let scale = ColorScale::bars(0.0);
        assert_eq!(scale.unit(10.0), 0.0);
        assert_eq!(scale.color_for(10.0), Color32::from_rgb(0xe0, 0xf3, 0xf8));
    }

    #[test]
    fn legend_spans_the_domain() {
        let entries = ColorScale::bars(40.0).legend_entries(5);
        let labels: Vec<&str> = entries.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["0%", "10%", "20%", "30%", "40%"]);
    }
}
