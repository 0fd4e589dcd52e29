//! Core identifier and state types.

/// An identifier for a signal within a coordinator's catalog.
///
/// This is a simple wrapper around `usize` that provides type safety for
/// signal identifiers. The id is the signal's position in the catalog the
/// coordinator was constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalId(pub usize);

impl SignalId {
    /// Standard catalog position of the doorbell signal.
    pub const DOORBELL: SignalId = SignalId(0);
    /// Standard catalog position of the meal signal.
    pub const MEAL: SignalId = SignalId(1);
    /// Standard catalog position of the alert signal.
    pub const ALERT: SignalId = SignalId(2);
    /// Standard catalog position of the approach signal.
    pub const APPROACH: SignalId = SignalId(3);
}

impl From<usize> for SignalId {
    fn from(id: usize) -> Self {
        SignalId(id)
    }
}

impl From<SignalId> for usize {
    fn from(id: SignalId) -> Self {
        id.0
    }
}

/// An opaque identifier for a light accessory.
///
/// Wide enough to hold a 128-bit UUID. The library never interprets the
/// value; it only passes it back to the [`LightControl`](crate::LightControl)
/// implementation that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccessoryId(pub u128);

impl core::fmt::Display for AccessoryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Presentation glyph associated with a signal.
///
/// Mirrored on screen while the signal is broadcasting. Not consulted by the
/// coordinator's own logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalShape {
    #[default]
    Circle,
    Square,
    Triangle,
    Pentagon,
}

/// Cooperative cancellation flag for an in-flight flash sequence.
///
/// The coordinator sets the token when a broadcast is cancelled by the user;
/// the flash loop polls it between power toggles and stops early. Cancellation
/// is cooperative, never preemptive: a toggle already issued is not recalled.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CancelToken {
    cancelled: bool,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the current broadcast as cancelled.
    pub fn set(&mut self) {
        self.cancelled = true;
    }

    /// Clears the flag for a new broadcast.
    pub fn clear(&mut self) {
        self.cancelled = false;
    }

    /// Returns true if the current broadcast has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
