use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

pub const BACKGROUND: Color32 = Color32::from_rgb(0xf4, 0xf4, 0xf4);
pub const CARD: Color32 = Color32::from_rgb(0xff, 0xff, 0xff);
pub const TEXT: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
pub const PRIMARY: Color32 = Color32::from_rgb(0x00, 0x7b, 0xff);
pub const TOOLTIP_LABEL: Color32 = Color32::from_rgb(0x00, 0x00, 0x8b);
pub const MISSING: Color32 = Color32::GRAY;

// ---------------------------------------------------------------------------
// Continuous colour scale
// ---------------------------------------------------------------------------

/// Plasma, dark blue → yellow, ten evenly spaced stops.
const PLASMA: [[u8; 3]; 10] = [
    [0x0d, 0x08, 0x87],
    [0x46, 0x03, 0x9f],
    [0x72, 0x01, 0xa8],
    [0x9c, 0x17, 0x9e],
    [0xbd, 0x37, 0x86],
    [0xd8, 0x57, 0x6b],
    [0xed, 0x79, 0x53],
    [0xfb, 0x9f, 0x3a],
    [0xfd, 0xca, 0x26],
    [0xf0, 0xf9, 0x21],
];

/// Maps metric values onto a piecewise-linear colour ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    stops: &'static [[u8; 3]],
    reversed: bool,
}

impl ColorScale {
    /// Reversed plasma: low values warm (yellow), high values cool (blue).
    pub fn plasma_reversed() -> Self {
        ColorScale {
            stops: &PLASMA,
            reversed: true,
        }
    }

    /// Colour at normalised position `t` (clamped to `[0, 1]`).
    pub fn sample(&self, t: f64) -> Color32 {
        if t.is_nan() {
            return MISSING;
        }
        let mut t = t.clamp(0.0, 1.0) as f32;
        if self.reversed {
            t = 1.0 - t;
        }
        let segments = (self.stops.len() - 1) as f32;
        let pos = t * segments;
        let lo = (pos.floor() as usize).min(self.stops.len() - 2);
        let frac = pos - lo as f32;

        let a = to_linear(self.stops[lo]);
        let b = to_linear(self.stops[lo + 1]);
        let mixed: Srgb<u8> = Srgb::<f32>::from_linear(a.mix(b, frac)).into_format();
        Color32::from_rgb(mixed.red, mixed.green, mixed.blue)
    }

    /// Colour of `value` within `range`. A degenerate range maps to the
    /// midpoint; NaN and a missing range map to grey.
    pub fn color_for(&self, value: f64, range: Option<(f64, f64)>) -> Color32 {
        let Some((min, max)) = range else {
            return MISSING;
        };
        let span = max - min;
        if span.abs() < f64::EPSILON {
            return self.sample(0.5);
        }
        self.sample((value - min) / span)
    }
}

fn to_linear(rgb: [u8; 3]) -> LinSrgb {
    Srgb::new(rgb[0], rgb[1], rgb[2])
        .into_format::<f32>()
        .into_linear()
}

/// Apply an opacity in `[0, 1]` to an opaque colour.
pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_plasma_endpoints() {
        let scale = ColorScale::plasma_reversed();
        assert_eq!(scale.sample(0.0), Color32::from_rgb(0xf0, 0xf9, 0x21));
        assert_eq!(scale.sample(1.0), Color32::from_rgb(0x0d, 0x08, 0x87));
    }

    #[test]
    fn test_reversed_scale_puts_low_values_at_warm_end() {
        let scale = ColorScale::plasma_reversed();
        let range = Some((-1.0, 1.0));
        assert_eq!(scale.color_for(-1.0, range), Color32::from_rgb(0xf0, 0xf9, 0x21));
        assert_eq!(scale.color_for(1.0, range), Color32::from_rgb(0x0d, 0x08, 0x87));
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let scale = ColorScale::plasma_reversed();
        assert_eq!(scale.sample(-3.0), scale.sample(0.0));
        assert_eq!(scale.sample(7.0), scale.sample(1.0));
    }

    #[test]
    fn test_missing_values_are_grey() {
        let scale = ColorScale::plasma_reversed();
        assert_eq!(scale.color_for(f64::NAN, Some((0.0, 1.0))), MISSING);
        assert_eq!(scale.color_for(0.5, None), MISSING);
    }

    #[test]
    fn test_degenerate_range_uses_midpoint() {
        let scale = ColorScale::plasma_reversed();
        assert_eq!(scale.color_for(2.0, Some((2.0, 2.0))), scale.sample(0.5));
    }

    #[test]
    fn test_with_opacity() {
        let c = with_opacity(Color32::from_rgb(10, 20, 30), 0.8);
        assert_eq!(c.a(), 204);
    }
}
