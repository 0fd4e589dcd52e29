//! Flash sequence execution for one signal broadcast.
//!
//! A broadcast sets each bound accessory to the signal's color, then walks
//! the accessories through `2 * cycles` alternating power toggles (on first,
//! off last) at a fixed spacing. Toggle position is evaluated from elapsed
//! time on each [`service`](FlashSequence::service) call, so a late caller
//! catches up instead of drifting.
//!
//! Every hardware command is best-effort: a per-accessory failure is reported
//! and the remaining accessories still get their commands. Cancellation is
//! cooperative; the [`CancelToken`] is polled before any due toggle is
//! issued, never mid-command.

use crate::colors::SignalColor;
use crate::control::{LightControl, report_failure};
use crate::time::{TimeDuration, TimeInstant};
use crate::types::{AccessoryId, CancelToken};
use heapless::Vec;

/// Outcome of servicing a flash sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashTiming<D> {
    /// More toggles remain. Service again after this delay.
    Delay(D),

    /// All toggles have been issued; the sequence is done.
    Complete,

    /// Cancellation was observed; no further toggles will be issued.
    Aborted,
}

/// One signal's in-flight hardware broadcast.
///
/// Owns a copy of the target accessory ids taken at begin time, so later
/// edits to the signal's bindings do not affect a broadcast already underway.
///
/// # Type Parameters
/// * `I` - Time instant type
/// * `A` - Maximum number of target accessories
pub struct FlashSequence<I: TimeInstant, const A: usize> {
    targets: Vec<AccessoryId, A>,
    started_at: I,
    spacing: I::Duration,
    total_toggles: u32,
    toggles_issued: u32,
}

impl<I: TimeInstant, const A: usize> FlashSequence<I, A> {
    /// Starts a broadcast: writes the signal color to every target and issues
    /// the first power toggle (on) immediately.
    ///
    /// An empty target set is valid; the sequence then completes without any
    /// hardware action. `cycles` of zero produces the color writes only.
    pub fn begin<L: LightControl>(
        now: I,
        lights: &mut L,
        targets: &[AccessoryId],
        color: SignalColor,
        cycles: u32,
        spacing: I::Duration,
    ) -> Self {
        let mut targets_copy = Vec::new();
        for &id in targets {
            if targets_copy.push(id).is_err() {
                break;
            }
            if let Err(error) = lights.set_color(id, color) {
                report_failure("color write", id, error);
            }
        }

        let mut sequence = Self {
            targets: targets_copy,
            started_at: now,
            spacing,
            total_toggles: cycles.saturating_mul(2),
            toggles_issued: 0,
        };

        if sequence.total_toggles > 0 {
            sequence.issue_toggle(lights);
        }

        sequence
    }

    /// Issues any toggles that have come due and reports what remains.
    ///
    /// The cancel token is polled first; once cancellation is observed the
    /// sequence stops early and reports [`FlashTiming::Aborted`] without
    /// touching the hardware again.
    pub fn service<L: LightControl>(
        &mut self,
        now: I,
        lights: &mut L,
        cancel: &CancelToken,
    ) -> FlashTiming<I::Duration> {
        if cancel.is_cancelled() {
            return FlashTiming::Aborted;
        }

        let elapsed = now.duration_since(self.started_at);
        let due = self.toggles_due(elapsed.as_millis());
        while self.toggles_issued < due {
            self.issue_toggle(lights);
        }

        if self.is_complete() {
            FlashTiming::Complete
        } else {
            let next_at = u64::from(self.toggles_issued) * self.spacing.as_millis();
            FlashTiming::Delay(I::Duration::from_millis(next_at).saturating_sub(elapsed))
        }
    }

    /// Returns true once every toggle has been issued.
    pub fn is_complete(&self) -> bool {
        self.toggles_issued >= self.total_toggles
    }

    /// Returns the target accessory ids this broadcast was begun with.
    pub fn targets(&self) -> &[AccessoryId] {
        &self.targets
    }

    /// Number of toggles due by `elapsed` milliseconds, first one at zero.
    fn toggles_due(&self, elapsed: u64) -> u32 {
        let spacing = self.spacing.as_millis();
        if spacing == 0 {
            return self.total_toggles;
        }
        let due = elapsed / spacing + 1;
        due.min(u64::from(self.total_toggles)) as u32
    }

    fn issue_toggle<L: LightControl>(&mut self, lights: &mut L) {
        let on = self.toggles_issued % 2 == 0;
        for &id in &self.targets {
            if let Err(error) = lights.set_power(id, on) {
                report_failure("power write", id, error);
            }
        }
        self.toggles_issued += 1;
    }
}
