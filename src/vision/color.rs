use image::Rgba;
use serde::{Deserialize, Serialize};

/// An 8 bit rgb color, alpha is not considered when matching
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    #[allow(missing_docs)]
    pub r: u8,
    #[allow(missing_docs)]
    pub g: u8,
    #[allow(missing_docs)]
    pub b: u8,
}

impl Rgb {
    #[allow(missing_docs)]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// true when every channel is within `tolerance` of the other color's channel
    pub fn matches(&self, other: &Rgb, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) <= tolerance
            && self.g.abs_diff(other.g) <= tolerance
            && self.b.abs_diff(other.b) <= tolerance
    }
}

impl From<Rgba<u8>> for Rgb {
    fn from(pixel: Rgba<u8>) -> Self {
        let [r, g, b, _] = pixel.0;
        Rgb { r, g, b }
    }
}

/// The colors the game renders with
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Palette {
    /// body and head fill
    pub snake: Rgb,
    #[allow(missing_docs)]
    pub food: Rgb,
    /// pupils
    pub eye_dark: Rgb,
    /// whites of the eyes
    pub eye_light: Rgb,
    /// per channel tolerance used for every comparison
    pub tolerance: u8,
}

/// tolerance used by the stock palette
pub const DEFAULT_TOLERANCE: u8 = 10;

impl Default for Palette {
    fn default() -> Self {
        Palette {
            snake: Rgb::new(0x41, 0x6E, 0xD8),
            food: Rgb::new(0x0A, 0x87, 0x54),
            eye_dark: Rgb::new(0x00, 0x00, 0x00),
            eye_light: Rgb::new(0xFF, 0xFF, 0xFF),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Palette {
    #[allow(missing_docs)]
    pub fn is_snake(&self, c: &Rgb) -> bool {
        c.matches(&self.snake, self.tolerance)
    }

    #[allow(missing_docs)]
    pub fn is_food(&self, c: &Rgb) -> bool {
        c.matches(&self.food, self.tolerance)
    }

    /// either eye color
    pub fn is_eye(&self, c: &Rgb) -> bool {
        c.matches(&self.eye_dark, self.tolerance) || c.matches(&self.eye_light, self.tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_reflexive() {
        let p = Palette::default();
        for c in [p.snake, p.food, p.eye_dark, p.eye_light].iter() {
            assert!(c.matches(c, 0));
            assert!(c.matches(c, DEFAULT_TOLERANCE));
        }
    }

    #[test]
    fn test_match_tolerance_is_per_channel() {
        let base = Rgb::new(10, 10, 10);
        assert!(base.matches(&Rgb::new(15, 15, 15), DEFAULT_TOLERANCE));
        assert!(base.matches(&Rgb::new(20, 0, 20), DEFAULT_TOLERANCE));
        assert!(!base.matches(&Rgb::new(25, 10, 10), DEFAULT_TOLERANCE));
        assert!(!base.matches(&Rgb::new(10, 10, 21), DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_palette_ignores_alpha() {
        let p = Palette::default();
        let snake = Rgb::from(Rgba([0x41, 0x6E, 0xD8, 0x10]));
        assert!(p.is_snake(&snake));
        assert!(!p.is_food(&snake));
        assert!(p.is_eye(&Rgb::from(Rgba([250, 252, 255, 255]))));
        assert!(p.is_eye(&Rgb::from(Rgba([4, 0, 2, 255]))));
        assert!(!p.is_eye(&snake));
    }
}
