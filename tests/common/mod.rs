//! Shared test infrastructure for light-signaler integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use light_signaler::{
    AccessoryId, AccessoryInfo, LightControl, LightError, MAX_NAME_LEN, SettingsStore,
    SignalColor, SignalId, SignalShape, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Light Control
// ============================================================================

/// A hardware command recorded by [`MockLights`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Issued {
    Color(AccessoryId, SignalColor),
    Power(AccessoryId, bool),
    Off(AccessoryId),
}

/// Mock light-control backend that records every command it receives
///
/// Accessories registered through [`add`](MockLights::add) show up in
/// discovery; commands against an id marked failing return `WriteFailed`
/// without being recorded.
pub struct MockLights {
    accessories: heapless::Vec<(AccessoryId, &'static str, bool), 8>,
    pub issued: heapless::Vec<Issued, 128>,
    failing: Option<AccessoryId>,
}

impl MockLights {
    pub fn new() -> Self {
        Self {
            accessories: heapless::Vec::new(),
            issued: heapless::Vec::new(),
            failing: None,
        }
    }

    pub fn add(mut self, id: AccessoryId, name: &'static str, reachable: bool) -> Self {
        self.accessories.push((id, name, reachable)).unwrap();
        self
    }

    pub fn failing(mut self, id: AccessoryId) -> Self {
        self.failing = Some(id);
        self
    }

    pub fn power_writes(&self) -> usize {
        self.issued
            .iter()
            .filter(|c| matches!(c, Issued::Power(..)))
            .count()
    }

    pub fn power_writes_for(&self, id: AccessoryId) -> usize {
        self.issued
            .iter()
            .filter(|c| matches!(c, Issued::Power(i, _) if *i == id))
            .count()
    }

    pub fn color_writes_for(&self, id: AccessoryId) -> usize {
        self.issued
            .iter()
            .filter(|c| matches!(c, Issued::Color(i, _) if *i == id))
            .count()
    }

    pub fn off_writes_for(&self, id: AccessoryId) -> usize {
        self.issued
            .iter()
            .filter(|c| matches!(c, Issued::Off(i) if *i == id))
            .count()
    }

    fn check(&self, id: AccessoryId) -> Result<(), LightError> {
        if self.failing == Some(id) {
            Err(LightError::WriteFailed)
        } else {
            Ok(())
        }
    }
}

impl LightControl for MockLights {
    fn accessories(&self) -> impl Iterator<Item = AccessoryInfo<'_>> + '_ {
        self.accessories
            .iter()
            .map(|&(id, name, reachable)| AccessoryInfo {
                id,
                name,
                reachable,
            })
    }

    fn set_color(&mut self, id: AccessoryId, color: SignalColor) -> Result<(), LightError> {
        self.check(id)?;
        self.issued.push(Issued::Color(id, color)).unwrap();
        Ok(())
    }

    fn set_power(&mut self, id: AccessoryId, on: bool) -> Result<(), LightError> {
        self.check(id)?;
        self.issued.push(Issued::Power(id, on)).unwrap();
        Ok(())
    }

    fn turn_off(&mut self, id: AccessoryId) -> Result<(), LightError> {
        self.check(id)?;
        self.issued.push(Issued::Off(id)).unwrap();
        Ok(())
    }
}

// ============================================================================
// In-Memory Settings Store
// ============================================================================

const STORE_SLOTS: usize = 8;

/// Settings store backed by in-memory slots, one per signal id
pub struct MemoryStore<const A: usize> {
    accessories: [Option<heapless::Vec<AccessoryId, A>>; STORE_SLOTS],
    names: [Option<heapless::String<MAX_NAME_LEN>>; STORE_SLOTS],
    shapes: [Option<SignalShape>; STORE_SLOTS],
}

impl<const A: usize> MemoryStore<A> {
    pub fn new() -> Self {
        Self {
            accessories: core::array::from_fn(|_| None),
            names: core::array::from_fn(|_| None),
            shapes: core::array::from_fn(|_| None),
        }
    }
}

impl<const A: usize> SettingsStore<A> for MemoryStore<A> {
    fn load_accessories(&self, id: SignalId) -> Option<heapless::Vec<AccessoryId, A>> {
        self.accessories.get(id.0)?.clone()
    }

    fn store_accessories(&mut self, id: SignalId, accessories: &[AccessoryId]) {
        if let Some(slot) = self.accessories.get_mut(id.0) {
            *slot = heapless::Vec::from_slice(accessories).ok();
        }
    }

    fn load_display_name(&self, id: SignalId) -> Option<heapless::String<MAX_NAME_LEN>> {
        self.names.get(id.0)?.clone()
    }

    fn store_display_name(&mut self, id: SignalId, name: &str) {
        if let Some(slot) = self.names.get_mut(id.0) {
            let mut stored = heapless::String::new();
            *slot = if stored.push_str(name).is_ok() {
                Some(stored)
            } else {
                None
            };
        }
    }

    fn load_shape(&self, id: SignalId) -> Option<SignalShape> {
        *self.shapes.get(id.0)?
    }

    fn store_shape(&mut self, id: SignalId, shape: SignalShape) {
        if let Some(slot) = self.shapes.get_mut(id.0) {
            *slot = Some(shape);
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub const KITCHEN: AccessoryId = AccessoryId(0xa1);
pub const HALLWAY: AccessoryId = AccessoryId(0xa2);
pub const BEDROOM: AccessoryId = AccessoryId(0xa3);

/// Progress comparison with a small tolerance
pub fn progress_close(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() < 0.001
}
