#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Signal`**: A named trigger bound to a color, a shape, and a set of light accessories
//! - **`SignalCoordinator`**: Single authority over the one currently broadcasting signal
//! - **`Countdown`**: Restartable timer driving the visual progress indicator and auto-expiry
//! - **`FlashSequence`**: One broadcast's color write plus alternating power toggles
//! - **`LightControl`**: Trait to implement for your smart-light hub or bridge
//! - **`SettingsStore`**: Trait to implement for your persisted preference mechanism
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`CoordinatorAction`**: Commands routed in from shortcuts or remote invokers
//!
//! Triggering an idle signal activates it: its accessories flash in the
//! signal's color while a countdown runs from 1.0 to 0.0. Triggering the
//! active signal again toggles it off; triggering a different one takes over,
//! last writer wins. The whole library is serviced cooperatively from one
//! logical thread; every operation returns timing hints for the caller's
//! main loop.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod colors;
pub mod command;
pub mod control;
pub mod coordinator;
pub mod countdown;
pub mod flash;
pub mod signal;
pub mod store;
pub mod time;
pub mod types;

pub use colors::{FULL_PERCENT, SignalColor};
pub use command::CoordinatorAction;
pub use control::{AccessoryInfo, Characteristic, LightControl, LightError};
pub use coordinator::{
    CoordinatorConfig, CoordinatorError, ServiceTiming, SignalCoordinator, TriggerOutcome,
};
pub use countdown::{Countdown, CountdownTick, RunToken};
pub use flash::{FlashSequence, FlashTiming};
pub use signal::{MAX_NAME_LEN, Signal, SignalBuilder, SignalError, standard_signals};
pub use store::SettingsStore;
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{AccessoryId, CancelToken, SignalId, SignalShape};

/// How long a signal stays active before auto-expiring, in milliseconds.
pub const DEFAULT_SIGNAL_DURATION_MILLIS: u64 = 20_000;

/// Default number of on/off flash cycles per broadcast.
pub const DEFAULT_FLASH_CYCLES: u32 = 3;

/// Default spacing between consecutive power toggles, in milliseconds.
pub const DEFAULT_TOGGLE_SPACING_MILLIS: u64 = 1_000;
