//! Time abstraction traits for platform-agnostic scheduling.
//!
//! The library never compares instants directly; everything is computed as a
//! duration since some recorded start. Implement these for your platform's
//! clock (monotonic preferred), or use a controllable mock in tests.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;

    /// Fraction of `total` this duration covers, clamped to `0.0..=1.0`.
    ///
    /// A zero `total` counts as fully covered.
    fn fraction_of(self, total: Self) -> f32 {
        let total_millis = total.as_millis();
        if total_millis == 0 {
            return 1.0;
        }
        let fraction = self.as_millis() as f32 / total_millis as f32;
        fraction.min(1.0)
    }
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}
