//! Shared test infrastructure for rgb-lamp integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use embedded_storage::{ReadStorage, Storage};
use rgb_lamp::{Color, RgbLed, TimeDuration, TimeInstant, TimeSource};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
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

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
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
// Mock LED
// ============================================================================

/// Mock LED that records all color changes for testing
pub struct MockLed {
    current_color: Option<Color>,
    color_history: heapless::Vec<Color, 128>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            current_color: None,
            color_history: heapless::Vec::new(),
        }
    }

    pub fn last_color(&self) -> Option<Color> {
        self.current_color
    }

    pub fn color_history(&self) -> &[Color] {
        &self.color_history
    }
}

impl RgbLed for MockLed {
    fn set_color(&mut self, color: Color) {
        self.current_color = Some(color);
        let _ = self.color_history.push(color);
    }
}

// ============================================================================
// Mock Storage
// ============================================================================

/// Byte-addressed in-memory storage, erased to 0xFF like a blank EEPROM
pub struct MockStorage {
    pub bytes: [u8; 32],
    pub writes: usize,
    pub fail_writes: bool,
    pub fail_reads: bool,
}

/// Storage error raised when a failure is injected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockStorageError;

impl MockStorage {
    pub fn blank() -> Self {
        Self {
            bytes: [0xFF; 32],
            writes: 0,
            fail_writes: false,
            fail_reads: false,
        }
    }

    /// Storage pre-loaded with a record at offset 0
    pub fn with_record(marker: u8, index: u8, brightness: f32) -> Self {
        let mut storage = Self::blank();
        storage.bytes[0] = marker;
        storage.bytes[1] = index;
        storage.bytes[2..6].copy_from_slice(&brightness.to_le_bytes());
        storage
    }

    pub fn stored_index(&self) -> u8 {
        self.bytes[1]
    }

    pub fn stored_brightness(&self) -> f32 {
        f32::from_le_bytes([self.bytes[2], self.bytes[3], self.bytes[4], self.bytes[5]])
    }
}

impl ReadStorage for MockStorage {
    type Error = MockStorageError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail_reads {
            return Err(MockStorageError);
        }
        let start = offset as usize;
        let source = self
            .bytes
            .get(start..start + bytes.len())
            .ok_or(MockStorageError)?;
        bytes.copy_from_slice(source);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }
}

impl Storage for MockStorage {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MockStorageError);
        }
        let start = offset as usize;
        self.bytes
            .get_mut(start..start + bytes.len())
            .ok_or(MockStorageError)?
            .copy_from_slice(bytes);
        self.writes += 1;
        Ok(())
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two brightness values with floating-point tolerance
pub fn brightness_equal(a: f32, b: f32) -> bool {
    const EPSILON: f32 = 0.0001;
    (a - b).abs() < EPSILON
}
