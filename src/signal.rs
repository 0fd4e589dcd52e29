//! Signal definitions and the standard catalog.
//!
//! A [`Signal`] is a named, user-triggerable action bound to a color, a
//! presentation shape, and a set of controlled light accessories. Signals are
//! built with [`SignalBuilder`] and handed to the coordinator as a catalog;
//! the four standard signals are available through [`standard_signals`].

use crate::colors::{
    ALERT_HUE, APPROACH_HUE, DOORBELL_HUE, FULL_PERCENT, MEAL_HUE, SignalColor,
};
use crate::types::{AccessoryId, SignalShape};
use heapless::{String, Vec};

/// Maximum length of a signal display name, in bytes.
pub const MAX_NAME_LEN: usize = 32;

/// Signal validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalError {
    /// No display name provided, or the name was empty.
    EmptyName,

    /// Display name exceeds [`MAX_NAME_LEN`] bytes.
    NameTooLong,

    /// Hue outside `0..360` degrees, or saturation/brightness outside
    /// `0..=100` percent.
    ColorOutOfRange,

    /// More accessories bound than the signal's capacity.
    TooManyAccessories,
}

impl core::fmt::Display for SignalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SignalError::EmptyName => {
                write!(f, "signal must have a non-empty display name")
            }
            SignalError::NameTooLong => {
                write!(f, "signal display name exceeds {} bytes", MAX_NAME_LEN)
            }
            SignalError::ColorOutOfRange => {
                write!(
                    f,
                    "hue must be within 0..360 degrees and saturation/brightness within 0..=100 percent"
                )
            }
            SignalError::TooManyAccessories => {
                write!(f, "accessory binding capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SignalError {}

/// A named trigger bound to a color, a shape, and a set of accessories.
///
/// Display name and shape are user-customizable presentation metadata; the
/// accessory set selects the hardware a broadcast targets. None of the three
/// affect the coordinator's one-active-signal bookkeeping.
///
/// # Type Parameters
/// * `A` - Maximum number of accessories this signal can bind
#[derive(Debug, Clone)]
pub struct Signal<const A: usize> {
    name: String<MAX_NAME_LEN>,
    shape: SignalShape,
    color: SignalColor,
    accessories: Vec<AccessoryId, A>,
}

impl<const A: usize> Signal<A> {
    /// Creates a new signal builder.
    pub fn builder<'a>() -> SignalBuilder<'a, A> {
        SignalBuilder::new()
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the presentation shape.
    pub fn shape(&self) -> SignalShape {
        self.shape
    }

    /// Returns the broadcast color.
    pub fn color(&self) -> SignalColor {
        self.color
    }

    /// Returns the bound accessory ids.
    pub fn accessories(&self) -> &[AccessoryId] {
        &self.accessories
    }

    /// Returns true if the accessory is bound to this signal.
    pub fn is_bound(&self, id: AccessoryId) -> bool {
        self.accessories.contains(&id)
    }

    /// Binds an accessory. Binding an already-bound accessory is a no-op.
    ///
    /// # Errors
    /// * `TooManyAccessories` - The binding set is full.
    pub fn bind(&mut self, id: AccessoryId) -> Result<(), SignalError> {
        if self.is_bound(id) {
            return Ok(());
        }
        self.accessories
            .push(id)
            .map_err(|_| SignalError::TooManyAccessories)
    }

    /// Unbinds an accessory. Returns true if it was bound.
    pub fn unbind(&mut self, id: AccessoryId) -> bool {
        match self.accessories.iter().position(|&a| a == id) {
            Some(idx) => {
                self.accessories.swap_remove(idx);
                true
            }
            None => false,
        }
    }

    /// Replaces the whole binding set.
    ///
    /// # Errors
    /// * `TooManyAccessories` - More ids than the signal's capacity.
    pub fn set_accessories(&mut self, ids: &[AccessoryId]) -> Result<(), SignalError> {
        let accessories =
            Vec::from_slice(ids).map_err(|_| SignalError::TooManyAccessories)?;
        self.accessories = accessories;
        Ok(())
    }

    /// Replaces the display name.
    ///
    /// # Errors
    /// * `EmptyName` - The name is empty.
    /// * `NameTooLong` - The name exceeds [`MAX_NAME_LEN`] bytes.
    pub fn set_name(&mut self, name: &str) -> Result<(), SignalError> {
        self.name = validated_name(name)?;
        Ok(())
    }

    /// Replaces the presentation shape.
    pub fn set_shape(&mut self, shape: SignalShape) {
        self.shape = shape;
    }
}

fn validated_name(name: &str) -> Result<String<MAX_NAME_LEN>, SignalError> {
    if name.is_empty() {
        return Err(SignalError::EmptyName);
    }
    let mut validated = String::new();
    validated
        .push_str(name)
        .map_err(|_| SignalError::NameTooLong)?;
    Ok(validated)
}

fn color_in_range(color: SignalColor) -> bool {
    (0.0..360.0).contains(&color.hue)
        && (0.0..=FULL_PERCENT).contains(&color.saturation)
        && (0.0..=FULL_PERCENT).contains(&color.brightness)
}

/// Builder for constructing validated signals.
#[derive(Debug)]
pub struct SignalBuilder<'a, const A: usize> {
    name: Option<&'a str>,
    shape: SignalShape,
    color: SignalColor,
    accessories: Vec<AccessoryId, A>,
    overflowed: bool,
}

impl<'a, const A: usize> SignalBuilder<'a, A> {
    /// Creates a new empty signal builder.
    pub fn new() -> Self {
        Self {
            name: None,
            shape: SignalShape::default(),
            color: SignalColor::from_hue(0.0),
            accessories: Vec::new(),
            overflowed: false,
        }
    }

    /// Sets the display name. Required.
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the presentation shape. Defaults to `Circle`.
    pub fn shape(mut self, shape: SignalShape) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the broadcast color from hue only, at full saturation and
    /// brightness. Defaults to hue 0.
    pub fn hue(mut self, hue: f32) -> Self {
        self.color = SignalColor::from_hue(hue);
        self
    }

    /// Sets the full broadcast color.
    pub fn color(mut self, color: SignalColor) -> Self {
        self.color = color;
        self
    }

    /// Binds an accessory.
    pub fn accessory(mut self, id: AccessoryId) -> Self {
        if self.accessories.push(id).is_err() {
            self.overflowed = true;
        }
        self
    }

    /// Builds and validates the signal.
    ///
    /// # Errors
    /// * `EmptyName` - No name was set, or it was empty.
    /// * `NameTooLong` - The name exceeds [`MAX_NAME_LEN`] bytes.
    /// * `ColorOutOfRange` - Hue or percent components out of range.
    /// * `TooManyAccessories` - More accessories added than capacity `A`.
    pub fn build(self) -> Result<Signal<A>, SignalError> {
        if self.overflowed {
            return Err(SignalError::TooManyAccessories);
        }
        if !color_in_range(self.color) {
            return Err(SignalError::ColorOutOfRange);
        }
        let name = validated_name(self.name.unwrap_or(""))?;

        Ok(Signal {
            name,
            shape: self.shape,
            color: self.color,
            accessories: self.accessories,
        })
    }
}

impl<const A: usize> Default for SignalBuilder<'_, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the standard four-signal catalog: Doorbell, Meal, Alert, Approach.
///
/// Catalog order matches [`SignalId::DOORBELL`](crate::SignalId::DOORBELL)
/// through [`SignalId::APPROACH`](crate::SignalId::APPROACH). Accessories are
/// left unbound; load them from a settings store or bind them explicitly.
///
/// # Panics
/// Panics if the catalog capacity `S` is less than 4.
pub fn standard_signals<const A: usize, const S: usize>() -> Vec<Signal<A>, S> {
    let mut signals = Vec::new();
    let standard = [
        ("Doorbell", SignalShape::Circle, DOORBELL_HUE),
        ("Meal", SignalShape::Square, MEAL_HUE),
        ("Alert", SignalShape::Triangle, ALERT_HUE),
        ("Approach", SignalShape::Pentagon, APPROACH_HUE),
    ];

    for (name, shape, hue) in standard {
        let signal = Signal::builder()
            .name(name)
            .shape(shape)
            .hue(hue)
            .build()
            .unwrap();
        if signals.push(signal).is_err() {
            panic!("catalog capacity too small for standard signals");
        }
    }

    signals
}
