//! Platform abstraction layer
//!
//! Browser/native neutral pieces the host wires up:
//! - Input: key codes to a per-frame snapshot plus discrete commands
//! - Time: frame clock with a clamped delta

pub mod input;
pub mod time;

pub use input::{HostAction, InputState, KeyAction};
pub use time::FrameClock;
