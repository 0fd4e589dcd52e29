//! Signal coordinator with single-active-signal state management.
//!
//! Provides [`SignalCoordinator`], the one authority over which signal, if
//! any, is currently broadcasting. A trigger request either activates a
//! signal (flash sequence + countdown), toggles the active signal off, or
//! takes over from a different active signal, last writer wins. The
//! coordinator is driven from the caller's main loop through
//! [`service`](SignalCoordinator::service), in the same tick-and-timing-hint
//! style as the rest of the library.

use crate::command::CoordinatorAction;
use crate::control::{LightControl, report_failure};
use crate::countdown::{Countdown, CountdownTick, RunToken};
use crate::flash::{FlashSequence, FlashTiming};
use crate::signal::{Signal, SignalError};
use crate::store::SettingsStore;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{AccessoryId, CancelToken, SignalId, SignalShape};
use crate::{DEFAULT_FLASH_CYCLES, DEFAULT_SIGNAL_DURATION_MILLIS, DEFAULT_TOGGLE_SPACING_MILLIS};
use heapless::Vec;

/// Timing information returned by service operations.
///
/// Indicates when the coordinator needs to be serviced again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// A countdown is running. Service again at your desired frame rate;
    /// progress updates are continuous.
    Continuous,

    /// Only flash toggles remain. Service again after this delay.
    Delay(D),

    /// Nothing is in flight. No servicing needed until the next trigger.
    Idle,
}

/// What a trigger request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerOutcome {
    /// The signal became the active one (fresh activation or takeover).
    Activated(SignalId),

    /// The signal was already active and has been toggled off.
    Cancelled(SignalId),
}

/// Errors that can occur during coordinator operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoordinatorError {
    /// The signal id does not exist in the catalog.
    UnknownSignal(SignalId),

    /// A signal edit failed validation.
    Signal(SignalError),
}

impl core::fmt::Display for CoordinatorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CoordinatorError::UnknownSignal(id) => {
                write!(f, "signal id {} does not exist in the catalog", id.0)
            }
            CoordinatorError::Signal(err) => {
                write!(f, "signal error: {}", err)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoordinatorError {}

impl From<SignalError> for CoordinatorError {
    fn from(err: SignalError) -> Self {
        CoordinatorError::Signal(err)
    }
}

/// Tunable timings for signal broadcasts.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoordinatorConfig<D: TimeDuration> {
    /// How long a signal stays active before auto-expiring.
    pub signal_duration: D,

    /// Number of on/off flash cycles per broadcast (`2 * flash_cycles`
    /// power toggles).
    pub flash_cycles: u32,

    /// Spacing between consecutive power toggles.
    pub toggle_spacing: D,
}

impl<D: TimeDuration> CoordinatorConfig<D> {
    /// Creates the default configuration: 20 s signal duration, 3 flash
    /// cycles, 1 s toggle spacing.
    pub fn new() -> Self {
        Self {
            signal_duration: D::from_millis(DEFAULT_SIGNAL_DURATION_MILLIS),
            flash_cycles: DEFAULT_FLASH_CYCLES,
            toggle_spacing: D::from_millis(DEFAULT_TOGGLE_SPACING_MILLIS),
        }
    }
}

impl<D: TimeDuration> Default for CoordinatorConfig<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Single authority over the currently broadcasting signal.
///
/// Owns the light-control backend, the signal catalog, the countdown, and
/// any in-flight flash sequence. At most one signal is active at any time:
///
/// * Triggering while idle activates the signal.
/// * Triggering the active signal again cancels it (toggle-off) and turns
///   its accessories off.
/// * Triggering a different signal while one is active takes over, last
///   writer wins; the superseded countdown can never clear the new signal.
///
/// All state lives on the caller's single logical thread. Hardware failures
/// reported by the backend are logged and skipped, never escalated.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `L` - Light-control backend type
/// * `T` - Time source implementation type
/// * `A` - Maximum number of accessories per signal
/// * `S` - Maximum number of signals in the catalog
pub struct SignalCoordinator<'t, I, L, T, const A: usize, const S: usize>
where
    I: TimeInstant,
    L: LightControl,
    T: TimeSource<I>,
{
    lights: L,
    time_source: &'t T,
    signals: Vec<Signal<A>, S>,
    config: CoordinatorConfig<I::Duration>,
    active: Option<SignalId>,
    cancel: CancelToken,
    countdown: Countdown<'t, I, T>,
    expected_run: Option<RunToken>,
    flash: Option<FlashSequence<I, A>>,
}

impl<'t, I, L, T, const A: usize, const S: usize> SignalCoordinator<'t, I, L, T, A, S>
where
    I: TimeInstant,
    L: LightControl,
    T: TimeSource<I>,
{
    /// Creates an idle coordinator over the given catalog with default
    /// timings.
    pub fn new(lights: L, time_source: &'t T, signals: Vec<Signal<A>, S>) -> Self {
        Self::with_config(lights, time_source, signals, CoordinatorConfig::new())
    }

    /// Creates an idle coordinator with explicit timings.
    pub fn with_config(
        lights: L,
        time_source: &'t T,
        signals: Vec<Signal<A>, S>,
        config: CoordinatorConfig<I::Duration>,
    ) -> Self {
        Self {
            lights,
            time_source,
            signals,
            config,
            active: None,
            cancel: CancelToken::new(),
            countdown: Countdown::new(time_source),
            expected_run: None,
            flash: None,
        }
    }

    /// Handles a trigger request for a signal.
    ///
    /// Activation state is updated synchronously before this returns; the
    /// hardware flash sequence keeps running across subsequent
    /// [`service`](Self::service) calls.
    ///
    /// # Errors
    /// * `UnknownSignal` - The id is not in the catalog; state is untouched.
    pub fn trigger(&mut self, id: SignalId) -> Result<TriggerOutcome, CoordinatorError> {
        if id.0 >= self.signals.len() {
            return Err(CoordinatorError::UnknownSignal(id));
        }

        // Any accepted trigger invalidates the running countdown before the
        // new state is evaluated, so a stale expiry can never fire.
        self.countdown.cancel();
        self.expected_run = None;

        if self.active == Some(id) {
            // Toggle-off: stop broadcasting and darken the bound accessories.
            self.cancel.set();
            let signal = &self.signals[id.0];
            for &accessory in signal.accessories() {
                if let Err(error) = self.lights.turn_off(accessory) {
                    report_failure("off write", accessory, error);
                }
            }
            self.active = None;
            return Ok(TriggerOutcome::Cancelled(id));
        }

        // Fresh activation or takeover of a different active signal.
        self.cancel.clear();
        self.active = Some(id);
        let now = self.time_source.now();
        let signal = &self.signals[id.0];
        self.flash = Some(FlashSequence::begin(
            now,
            &mut self.lights,
            signal.accessories(),
            signal.color(),
            self.config.flash_cycles,
            self.config.toggle_spacing,
        ));
        self.expected_run = Some(self.countdown.start(self.config.signal_duration));
        Ok(TriggerOutcome::Activated(id))
    }

    /// Dispatches a coordinator action.
    ///
    /// Returns the trigger outcome, or `None` for a `CancelActive` on an
    /// idle coordinator.
    pub fn handle_action(
        &mut self,
        action: CoordinatorAction,
    ) -> Result<Option<TriggerOutcome>, CoordinatorError> {
        match action {
            CoordinatorAction::Trigger(id) => self.trigger(id).map(Some),
            CoordinatorAction::CancelActive => match self.active {
                Some(id) => self.trigger(id).map(Some),
                None => Ok(None),
            },
        }
    }

    /// Drives the in-flight flash sequence and the countdown.
    ///
    /// When the countdown expires for the run that belongs to the active
    /// signal, the signal is cleared and the countdown resets so progress
    /// reads full again. An expiry for a superseded run is discarded.
    pub fn service(&mut self) -> ServiceTiming<I::Duration> {
        let now = self.time_source.now();

        let mut flash_delay = None;
        if let Some(flash) = self.flash.as_mut() {
            match flash.service(now, &mut self.lights, &self.cancel) {
                FlashTiming::Delay(delay) => flash_delay = Some(delay),
                FlashTiming::Complete | FlashTiming::Aborted => self.flash = None,
            }
        }

        if let CountdownTick::Expired(token) = self.countdown.service() {
            if Some(token) == self.expected_run {
                self.active = None;
                self.expected_run = None;
                self.countdown.cancel();
            }
        }

        if self.countdown.is_running() {
            ServiceTiming::Continuous
        } else if let Some(delay) = flash_delay {
            ServiceTiming::Delay(delay)
        } else {
            ServiceTiming::Idle
        }
    }

    /// Returns the id of the currently broadcasting signal, if any.
    pub fn active_signal(&self) -> Option<SignalId> {
        self.active
    }

    /// Returns the currently broadcasting signal, if any.
    pub fn active(&self) -> Option<&Signal<A>> {
        self.active.map(|id| &self.signals[id.0])
    }

    /// Returns true if the last broadcast was cancelled by the user and its
    /// flash sequence may still be winding down.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Returns the countdown progress, `1.0` (full) down to `0.0` (expired).
    pub fn progress(&self) -> f32 {
        self.countdown.progress()
    }

    /// Returns the signal catalog.
    pub fn signals(&self) -> &[Signal<A>] {
        &self.signals
    }

    /// Returns the signal with the given id, if it exists.
    pub fn signal(&self, id: SignalId) -> Option<&Signal<A>> {
        self.signals.get(id.0)
    }

    /// Looks a signal up by display name, ASCII case-insensitive.
    pub fn signal_by_name(&self, name: &str) -> Option<SignalId> {
        self.signals
            .iter()
            .position(|s| s.name().eq_ignore_ascii_case(name))
            .map(SignalId)
    }

    /// Returns the light-control backend.
    pub fn light_control(&self) -> &L {
        &self.lights
    }

    /// Applies persisted per-signal customizations from a settings store.
    ///
    /// Call once after construction and again whenever an options surface is
    /// dismissed. Persisted values that fail validation are skipped.
    pub fn load_settings(&mut self, store: &impl SettingsStore<A>) {
        for (idx, signal) in self.signals.iter_mut().enumerate() {
            let id = SignalId(idx);
            if let Some(accessories) = store.load_accessories(id) {
                let _ = signal.set_accessories(&accessories);
            }
            if let Some(name) = store.load_display_name(id) {
                let _ = signal.set_name(&name);
            }
            if let Some(shape) = store.load_shape(id) {
                signal.set_shape(shape);
            }
        }
    }

    /// Toggles an accessory's binding for a signal and persists the new set.
    ///
    /// Returns true if the accessory is bound after the call.
    ///
    /// # Errors
    /// * `UnknownSignal` - The id is not in the catalog.
    /// * `Signal(TooManyAccessories)` - The binding set is full.
    pub fn toggle_accessory(
        &mut self,
        id: SignalId,
        accessory: AccessoryId,
        store: &mut impl SettingsStore<A>,
    ) -> Result<bool, CoordinatorError> {
        let signal = self.signal_mut(id)?;
        let bound = if signal.is_bound(accessory) {
            signal.unbind(accessory);
            false
        } else {
            signal.bind(accessory)?;
            true
        };
        store.store_accessories(id, self.signals[id.0].accessories());
        Ok(bound)
    }

    /// Renames a signal and persists the new name.
    ///
    /// # Errors
    /// * `UnknownSignal` - The id is not in the catalog.
    /// * `Signal(EmptyName | NameTooLong)` - The name fails validation.
    pub fn set_display_name(
        &mut self,
        id: SignalId,
        name: &str,
        store: &mut impl SettingsStore<A>,
    ) -> Result<(), CoordinatorError> {
        self.signal_mut(id)?.set_name(name)?;
        store.store_display_name(id, name);
        Ok(())
    }

    /// Changes a signal's presentation shape and persists it.
    ///
    /// # Errors
    /// * `UnknownSignal` - The id is not in the catalog.
    pub fn set_shape(
        &mut self,
        id: SignalId,
        shape: SignalShape,
        store: &mut impl SettingsStore<A>,
    ) -> Result<(), CoordinatorError> {
        self.signal_mut(id)?.set_shape(shape);
        store.store_shape(id, shape);
        Ok(())
    }

    fn signal_mut(&mut self, id: SignalId) -> Result<&mut Signal<A>, CoordinatorError> {
        self.signals
            .get_mut(id.0)
            .ok_or(CoordinatorError::UnknownSignal(id))
    }
}
