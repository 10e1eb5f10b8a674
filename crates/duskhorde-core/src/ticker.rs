//! Fixed-step tick source.
//!
//! Combat in Duskhorde advances at a fixed 30 Hz, independent of render
//! frame rate. The [`FixedTicker`] converts variable frame time into a
//! whole number of due combat steps: the host feeds it the render delta
//! every frame and runs one dispatcher tick per returned step. Because the
//! host drives the loop, tick invocations are serialized by construction
//! and a tick always completes before the next one starts.
//!
//! # Catch-up Cap
//!
//! A long stall (breakpoint, window drag, swap) would otherwise schedule a
//! burst of catch-up ticks. The ticker caps the number of steps returned
//! per call and drops the remaining backlog, trading perfect wall-clock
//! fidelity for a bounded frame cost.
//!
//! # Example
//!
//! ```
//! use duskhorde_core::ticker::{FixedTicker, TICK_DT};
//!
//! let mut ticker = FixedTicker::new();
//!
//! // A 60 fps frame is half a combat tick.
//! assert_eq!(ticker.advance(TICK_DT / 2.0), 0);
//! assert_eq!(ticker.advance(TICK_DT / 2.0), 1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Combat tick rate in Hz.
pub const TICK_RATE_HZ: f32 = 30.0;

/// Duration of one combat tick in seconds.
pub const TICK_DT: f32 = 1.0 / TICK_RATE_HZ;

/// Default number of catch-up steps allowed per `advance` call.
const DEFAULT_MAX_CATCH_UP: u32 = 5;

/// Frame-time accumulator producing due fixed steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedTicker {
    accumulator: f32,
    max_catch_up: u32,
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedTicker {
    /// Creates a ticker with the default catch-up cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            max_catch_up: DEFAULT_MAX_CATCH_UP,
        }
    }

    /// Creates a ticker with a custom catch-up cap (minimum 1).
    #[must_use]
    pub fn with_max_catch_up(max_catch_up: u32) -> Self {
        Self {
            accumulator: 0.0,
            max_catch_up: max_catch_up.max(1),
        }
    }

    /// Feeds one frame's delta time and returns the number of combat steps
    /// now due. Non-positive deltas are ignored.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if dt > 0.0 {
            self.accumulator += dt;
        }

        let mut steps = 0;
        while self.accumulator >= TICK_DT && steps < self.max_catch_up {
            self.accumulator -= TICK_DT;
            steps += 1;
        }

        if self.accumulator >= TICK_DT {
            // Stalled past the catch-up cap: the backlog is dropped, not
            // replayed.
            warn!(backlog = self.accumulator, "tick backlog dropped after stall");
            self.accumulator = 0.0;
        }

        steps
    }

    /// Returns the unconsumed fraction of a tick, in seconds.
    ///
    /// Renderers can use this to interpolate between the last two combat
    /// states.
    #[must_use]
    pub const fn remainder(&self) -> f32 {
        self.accumulator
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_frames_accumulate() {
        let mut ticker = FixedTicker::new();
        assert_eq!(ticker.advance(TICK_DT * 0.4), 0);
        assert_eq!(ticker.advance(TICK_DT * 0.4), 0);
        assert_eq!(ticker.advance(TICK_DT * 0.4), 1);
    }

    #[test]
    fn exact_tick_yields_one_step() {
        let mut ticker = FixedTicker::new();
        assert_eq!(ticker.advance(TICK_DT), 1);
        assert_eq!(ticker.remainder(), 0.0);
    }

    #[test]
    fn long_frame_yields_multiple_steps() {
        let mut ticker = FixedTicker::new();
        assert_eq!(ticker.advance(TICK_DT * 3.5), 3);
        assert!(ticker.remainder() < TICK_DT);
    }

    #[test]
    fn stall_is_capped_and_backlog_dropped() {
        let mut ticker = FixedTicker::with_max_catch_up(4);
        // Two full seconds of stall at 30 Hz would be 60 steps.
        assert_eq!(ticker.advance(2.0), 4);
        // The backlog is gone; the next normal frame behaves normally.
        assert_eq!(ticker.advance(TICK_DT), 1);
    }

    #[test]
    fn negative_and_zero_deltas_are_ignored() {
        let mut ticker = FixedTicker::new();
        assert_eq!(ticker.advance(-1.0), 0);
        assert_eq!(ticker.advance(0.0), 0);
        assert_eq!(ticker.remainder(), 0.0);
    }

    #[test]
    fn cap_of_zero_is_raised_to_one() {
        let mut ticker = FixedTicker::with_max_catch_up(0);
        assert_eq!(ticker.advance(TICK_DT * 10.0), 1);
    }

    #[test]
    fn thirty_steps_per_simulated_second() {
        let mut ticker = FixedTicker::new();
        let mut steps = 0;
        // Drive with an uneven frame time; the step count must still track
        // wall time.
        let frame = 1.0 / 144.0;
        let mut elapsed = 0.0;
        while elapsed < 1.0 {
            steps += ticker.advance(frame);
            elapsed += frame;
        }
        assert!((29..=31).contains(&steps));
    }

    #[test]
    fn serialization_roundtrip() {
        let mut ticker = FixedTicker::new();
        ticker.advance(TICK_DT * 0.75);

        let json = serde_json::to_string(&ticker).unwrap();
        let restored: FixedTicker = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ticker);
    }
}
