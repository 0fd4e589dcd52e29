//! Settings persistence boundary.
//!
//! Per-signal customizations (bound accessories, display name, shape) are
//! persisted outside the library in a small key-value store. Implement
//! [`SettingsStore`] over your platform's preference mechanism; the
//! coordinator reads it at construction time via
//! [`load_settings`](crate::SignalCoordinator::load_settings) and writes
//! through on every edit. A `load_*` returning `None` means "nothing stored,
//! keep the signal's current value".

use crate::signal::MAX_NAME_LEN;
use crate::types::{AccessoryId, SignalId, SignalShape};
use heapless::{String, Vec};

/// Trait for abstracting the persisted settings store.
///
/// Stores are keyed by [`SignalId`]; keys for ids outside the catalog are
/// never read or written by the library. Write methods are infallible by
/// contract: persist best-effort and handle storage errors internally.
pub trait SettingsStore<const A: usize> {
    /// Loads the persisted accessory binding set for a signal.
    fn load_accessories(&self, id: SignalId) -> Option<Vec<AccessoryId, A>>;

    /// Persists the accessory binding set for a signal.
    fn store_accessories(&mut self, id: SignalId, accessories: &[AccessoryId]);

    /// Loads the persisted display name for a signal.
    fn load_display_name(&self, id: SignalId) -> Option<String<MAX_NAME_LEN>>;

    /// Persists the display name for a signal.
    fn store_display_name(&mut self, id: SignalId, name: &str);

    /// Loads the persisted presentation shape for a signal.
    fn load_shape(&self, id: SignalId) -> Option<SignalShape>;

    /// Persists the presentation shape for a signal.
    fn store_shape(&mut self, id: SignalId, shape: SignalShape);
}
