//! Signal color model and color space conversion helpers.
//!
//! Accessories are commanded in HSB terms: hue in degrees, saturation and
//! brightness in percent, matching the characteristic ranges smart-light hubs
//! expose. Conversion to `palette::Srgb` is provided for mirroring the signal
//! color on screen.

use palette::{FromColor, Hsv, Srgb};

/// Hue of the standard doorbell signal, in degrees.
pub const DOORBELL_HUE: f32 = 40.0;
/// Hue of the standard meal signal, in degrees.
pub const MEAL_HUE: f32 = 240.0;
/// Hue of the standard alert signal, in degrees.
pub const ALERT_HUE: f32 = 0.0;
/// Hue of the standard approach signal, in degrees.
pub const APPROACH_HUE: f32 = 120.0;

/// Full saturation or brightness, in percent.
pub const FULL_PERCENT: f32 = 100.0;

/// The color a signal commands its accessories to, in HSB terms.
///
/// * `hue` - degrees, `0.0..360.0`
/// * `saturation` - percent, `0.0..=100.0`
/// * `brightness` - percent, `0.0..=100.0`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalColor {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
}

impl SignalColor {
    /// Creates a color from all three components.
    pub fn new(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Creates a color from hue only, at full saturation and brightness.
    pub fn from_hue(hue: f32) -> Self {
        Self::new(hue, FULL_PERCENT, FULL_PERCENT)
    }

    /// Converts to sRGB for on-screen mirroring.
    pub fn to_srgb(self) -> Srgb {
        hsv(
            self.hue,
            self.saturation / FULL_PERCENT,
            self.brightness / FULL_PERCENT,
        )
    }
}

/// Creates an RGB color from HSV (Hue, Saturation, Value) components.
///
/// Hue is in degrees; saturation and value are `0.0..=1.0`.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Srgb {
    let hsv = Hsv::new(hue, saturation, value);
    Srgb::from_color(hsv)
}

/// Creates an RGB color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> Srgb {
    hsv(hue, 1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;

    const EPSILON: f32 = 0.001;

    fn colors_equal(a: Srgb, b: Srgb) -> bool {
        (a.red - b.red).abs() < EPSILON
            && (a.green - b.green).abs() < EPSILON
            && (a.blue - b.blue).abs() < EPSILON
    }

    #[test]
    fn alert_hue_converts_to_pure_red() {
        let color = SignalColor::from_hue(ALERT_HUE);
        assert!(colors_equal(color.to_srgb(), Srgb::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn approach_hue_converts_to_pure_green() {
        let color = SignalColor::from_hue(APPROACH_HUE);
        assert!(colors_equal(color.to_srgb(), Srgb::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn zero_brightness_converts_to_black() {
        let color = SignalColor::new(MEAL_HUE, FULL_PERCENT, 0.0);
        assert!(colors_equal(color.to_srgb(), Srgb::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn zero_saturation_converts_to_white() {
        let color = SignalColor::new(DOORBELL_HUE, 0.0, FULL_PERCENT);
        assert!(colors_equal(color.to_srgb(), Srgb::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn from_hue_defaults_to_full_saturation_and_brightness() {
        let color = SignalColor::from_hue(DOORBELL_HUE);
        assert_eq!(color.saturation, FULL_PERCENT);
        assert_eq!(color.brightness, FULL_PERCENT);
    }
}
