//! Light control boundary.
//!
//! Defines the [`LightControl`] trait the library drives accessories through.
//! Implement it for your hub or bridge (network API, local radio, test
//! double). Discovery, live power/color state, and reconnection all belong to
//! the implementation; the library only holds accessory ids and issues
//! best-effort commands against them.

use crate::colors::SignalColor;
use crate::types::AccessoryId;

/// A controllable characteristic of a light accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Characteristic {
    Power,
    Hue,
    Brightness,
    Saturation,
}

impl core::fmt::Display for Characteristic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Characteristic::Power => "power",
            Characteristic::Hue => "hue",
            Characteristic::Brightness => "brightness",
            Characteristic::Saturation => "saturation",
        };
        write!(f, "{}", name)
    }
}

/// Errors a light-control backend can report for a single command.
///
/// These are always non-fatal to the library: a failed accessory is skipped
/// and its siblings still receive their commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightError {
    /// The accessory exposes no characteristic of this kind.
    MissingCharacteristic(Characteristic),

    /// The accessory is not reachable through the hub.
    Unreachable,

    /// Reading a characteristic value failed.
    ReadFailed,

    /// Writing a characteristic value failed.
    WriteFailed,
}

impl core::fmt::Display for LightError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LightError::MissingCharacteristic(characteristic) => {
                write!(f, "no {} characteristic found", characteristic)
            }
            LightError::Unreachable => write!(f, "accessory is unreachable"),
            LightError::ReadFailed => write!(f, "characteristic read failed"),
            LightError::WriteFailed => write!(f, "characteristic write failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LightError {}

/// A controllable accessory as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessoryInfo<'a> {
    pub id: AccessoryId,
    pub name: &'a str,
    pub reachable: bool,
}

/// Trait for abstracting the light-control backend.
///
/// Commands target one accessory at a time and are best-effort: return an
/// error to have the library report it and move on. Never block longer than
/// your main loop can tolerate; queue slow hub writes internally and complete
/// them asynchronously.
pub trait LightControl {
    /// Iterates over the controllable accessories currently known to the
    /// backend.
    fn accessories(&self) -> impl Iterator<Item = AccessoryInfo<'_>> + '_;

    /// Sets an accessory's hue, saturation, and brightness.
    fn set_color(&mut self, id: AccessoryId, color: SignalColor) -> Result<(), LightError>;

    /// Sets an accessory's power state.
    fn set_power(&mut self, id: AccessoryId, on: bool) -> Result<(), LightError>;

    /// Turns an accessory off immediately.
    fn turn_off(&mut self, id: AccessoryId) -> Result<(), LightError> {
        self.set_power(id, false)
    }

    /// Returns the number of currently reachable accessories.
    fn reachable_count(&self) -> usize {
        self.accessories().filter(|a| a.reachable).count()
    }
}

/// Reports a failed best-effort command and carries on.
pub(crate) fn report_failure(command: &str, id: AccessoryId, error: LightError) {
    #[cfg(feature = "defmt")]
    defmt::warn!("{} failed for accessory {}: {}", command, id, error);
    #[cfg(not(feature = "defmt"))]
    let _ = (command, id, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TwoLamps;

    impl LightControl for TwoLamps {
        fn accessories(&self) -> impl Iterator<Item = AccessoryInfo<'_>> + '_ {
            [
                AccessoryInfo {
                    id: AccessoryId(1),
                    name: "Kitchen",
                    reachable: true,
                },
                AccessoryInfo {
                    id: AccessoryId(2),
                    name: "Hallway",
                    reachable: false,
                },
            ]
            .into_iter()
        }

        fn set_color(&mut self, _id: AccessoryId, _color: SignalColor) -> Result<(), LightError> {
            Ok(())
        }

        fn set_power(&mut self, _id: AccessoryId, _on: bool) -> Result<(), LightError> {
            Err(LightError::MissingCharacteristic(Characteristic::Power))
        }
    }

    #[test]
    fn reachable_count_skips_unreachable_accessories() {
        assert_eq!(TwoLamps.reachable_count(), 1);
    }

    #[test]
    fn turn_off_defaults_to_a_power_write() {
        let mut lamps = TwoLamps;
        assert_eq!(
            lamps.turn_off(AccessoryId(1)),
            Err(LightError::MissingCharacteristic(Characteristic::Power))
        );
    }
}
