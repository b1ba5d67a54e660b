use serde::{ Serialize, Deserialize };

use crate::feq;

/// A color.
///
/// Represented conventionally with red-green-blue (RGB) values. Each value
/// ranges from 0.0 to 1.0 inclusive.
///
/// # Examples
///
/// ```
/// # use ray_caster::color::Color;
/// let white = Color::white();
/// assert_eq!(white, Color::rgb(1.0, 1.0, 1.0));
/// assert_eq!(white.to_rgb8(), [255, 255, 255]);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Partial equality on two colors.
///
/// `Color`s are compared component-wise, accounting for possible floating
/// point error in comparisons.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

impl From<[f64; 3]> for Color {
    fn from(v: [f64; 3]) -> Color {
        Color { r: v[0], g: v[1], b: v[2] }
    }
}

impl From<Color> for [f64; 3] {
    fn from(c: Color) -> [f64; 3] {
        [c.r, c.g, c.b]
    }
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// The color black.
    pub fn black() -> Color {
        Color {
            r: 0.0,
            g: 0.0,
            b: 0.0
        }
    }

    /// The color white.
    pub fn white() -> Color {
        Color {
            r: 1.0,
            g: 1.0,
            b: 1.0
        }
    }

    /// Scales each component to `0..=255`, clamping out-of-range values.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let scale = |c: f64| (c * 255.0).clamp(0.0, 255.0).ceil() as u8;
        [scale(self.r), scale(self.g), scale(self.b)]
    }
}

/* Tests */

#[test]
fn color_to_bytes() {
    assert_eq!(Color::black().to_rgb8(), [0, 0, 0]);
    assert_eq!(Color::rgb(0.5, 1.5, -0.2).to_rgb8(), [128, 255, 0]);
}

#[test]
fn color_from_json() {
    let c: Color = serde_json::from_str("[1.0, 0.5, 0.0]").unwrap();
    assert_eq!(c, Color::rgb(1.0, 0.5, 0.0));
}
