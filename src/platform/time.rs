//! Frame clock
//!
//! Converts host timestamps (milliseconds, e.g. `requestAnimationFrame`) into
//! a frame delta in nominal 60 Hz frames, clamped so a stalled tab does not
//! teleport everything on the next frame.

use crate::consts::{FRAME_MS, MAX_FRAME_DELTA};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous call, in frames. The first call yields 1.0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / FRAME_MS) as f32,
            None => 1.0,
        };
        self.last_ms = Some(now_ms);
        if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DELTA)
        } else {
            1.0
        }
    }

    /// Forget the previous timestamp (after a pause or tab switch)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_nominal() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1234.0), 1.0);
    }

    #[test]
    fn test_regular_frames() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let dt = clock.advance(FRAME_MS);
        assert!((dt - 1.0).abs() < 1e-4);
        let dt = clock.advance(FRAME_MS * 2.5);
        assert!((dt - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(5000.0), MAX_FRAME_DELTA);
    }

    #[test]
    fn test_time_going_backwards_is_zero() {
        let mut clock = FrameClock::new();
        clock.advance(500.0);
        assert_eq!(clock.advance(400.0), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.reset();
        assert_eq!(clock.advance(10_000.0), 1.0);
    }
}
