//! Command-based control for external trigger entry points.
//!
//! Voice shortcuts, remote buttons, and other out-of-app invokers reduce to
//! these actions; route them through
//! [`SignalCoordinator::handle_action`](crate::SignalCoordinator::handle_action).
//! Name-based invokers resolve a [`SignalId`] first via
//! [`SignalCoordinator::signal_by_name`](crate::SignalCoordinator::signal_by_name).

use crate::types::SignalId;

/// Actions for controlling a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoordinatorAction {
    /// Trigger a signal: activate it, or toggle it off if already active.
    Trigger(SignalId),

    /// Cancel whichever signal is active, if any.
    CancelActive,
}
