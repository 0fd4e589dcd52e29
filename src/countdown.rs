//! Restartable countdown with progress reporting and expiry events.
//!
//! Drives the visual time-remaining indicator and auto-expires the active
//! signal. Progress runs from 1.0 (just started) down to 0.0 (expired) over
//! the configured duration, recomputed from elapsed time on every
//! [`service`](Countdown::service) call.
//!
//! Expiry is reported as a value returned from `service`, never through a
//! stored callback. Each run carries a [`RunToken`]; a consumer that recorded
//! the token at start time can discard an expiry belonging to a run it no
//! longer cares about.

use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// Identity of one countdown run.
///
/// Tokens are unique per [`Countdown`] instance for the life of the process
/// (monotonically increasing). Comparing the token in an
/// [`Expired`](CountdownTick::Expired) event against the one returned by
/// [`start`](Countdown::start) detects stale expiries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunToken(u32);

/// Outcome of servicing a countdown.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownTick {
    /// No countdown is running.
    Idle,

    /// Countdown is running; carries the recomputed progress.
    Running(f32),

    /// The countdown just expired. Reported exactly once per run; progress
    /// stays at 0.0 until the next `start` or `cancel`.
    Expired(RunToken),
}

/// A restartable, cancelable countdown over a fixed duration.
///
/// States are Idle and Running; natural expiry reports once and immediately
/// falls back to Idle. A cancelled run can never report expiry: `cancel`
/// clears the run synchronously, and `service` checks liveness before
/// reporting.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
pub struct Countdown<'t, I: TimeInstant, T: TimeSource<I>> {
    time_source: &'t T,
    started_at: Option<I>,
    duration: I::Duration,
    progress: f32,
    run: u32,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> Countdown<'t, I, T> {
    /// Creates an idle countdown with progress at 1.0.
    pub fn new(time_source: &'t T) -> Self {
        Self {
            time_source,
            started_at: None,
            duration: I::Duration::ZERO,
            progress: 1.0,
            run: 0,
        }
    }

    /// Starts a run over `duration`, implicitly cancelling any run already in
    /// progress. Resets progress to 1.0 and returns the new run's token.
    pub fn start(&mut self, duration: I::Duration) -> RunToken {
        self.run = self.run.wrapping_add(1);
        self.started_at = Some(self.time_source.now());
        self.duration = duration;
        self.progress = 1.0;
        RunToken(self.run)
    }

    /// Stops the running countdown, if any, and resets progress to 1.0.
    ///
    /// Safe to call when idle; beyond the progress reset it is a no-op. After
    /// `cancel` returns, the cancelled run will never report
    /// [`CountdownTick::Expired`].
    pub fn cancel(&mut self) {
        self.started_at = None;
        self.progress = 1.0;
    }

    /// Recomputes progress from elapsed time and reports expiry.
    ///
    /// While running, progress is `max(1 - elapsed/duration, 0)`. Once
    /// elapsed reaches the duration the run ends: progress is left at 0.0 and
    /// `Expired` is returned exactly once, carrying the run's token.
    pub fn service(&mut self) -> CountdownTick {
        let Some(started_at) = self.started_at else {
            return CountdownTick::Idle;
        };

        let elapsed = self.time_source.now().duration_since(started_at);
        self.progress = 1.0 - elapsed.fraction_of(self.duration);

        if elapsed.as_millis() >= self.duration.as_millis() {
            self.started_at = None;
            CountdownTick::Expired(RunToken(self.run))
        } else {
            CountdownTick::Running(self.progress)
        }
    }

    /// Returns the last computed progress, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Returns true if a run is in progress.
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}
