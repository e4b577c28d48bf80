//! Shared test infrastructure for servo-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use servo_sequencer::{ChannelConfig, ServoChannel, ServoOutput, TickRate};

// ============================================================================
// Mock Servo
// ============================================================================

/// Mock servo output that records every angle written to it
pub struct MockServo {
    last_angle: Option<f32>,
    writes: usize,
    history: heapless::Vec<f32, 512>,
}

impl MockServo {
    pub fn new() -> Self {
        Self {
            last_angle: None,
            writes: 0,
            history: heapless::Vec::new(),
        }
    }

    pub fn last_angle(&self) -> Option<f32> {
        self.last_angle
    }

    /// Total number of writes, including those past the history capacity
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn history(&self) -> &[f32] {
        &self.history
    }
}

impl ServoOutput for MockServo {
    fn set_angle(&mut self, degrees: f32) {
        self.last_angle = Some(degrees);
        self.writes += 1;
        let _ = self.history.push(degrees);
    }
}

// ============================================================================
// Channel Helpers
// ============================================================================

/// 0-180 degree channel ticked at 50 Hz
pub fn servo_180(initial: f32) -> ServoChannel<MockServo> {
    ServoChannel::new(
        initial,
        ChannelConfig::new(0.0, 180.0).tick_rate(TickRate::from_hz(50.0)),
        MockServo::new(),
    )
}

/// 0-270 degree channel ticked at 50 Hz
pub fn servo_270(initial: f32) -> ServoChannel<MockServo> {
    ServoChannel::new(
        initial,
        ChannelConfig::new(0.0, 270.0).tick_rate(TickRate::from_hz(50.0)),
        MockServo::new(),
    )
}

/// Ticks a channel `n` times
pub fn tick_n<O: ServoOutput>(channel: &mut ServoChannel<O>, n: u32) {
    for _ in 0..n {
        channel.tick();
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two angles with floating-point tolerance
pub fn angles_equal(a: f32, b: f32) -> bool {
    const EPSILON: f32 = 0.001;
    (a - b).abs() < EPSILON
}
