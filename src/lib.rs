//! Void Breacher - A single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, collisions, spawning, phases)
//! - `game`: Phase controller tying the simulation to input, clock and storage
//! - `renderer`: Read-only render snapshot to draw commands
//! - `platform`: Input bindings and frame clock
//! - `persistence`: Key-value storage for the high score and preferences
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal frame duration in milliseconds (60 Hz display)
    pub const FRAME_MS: f64 = 16.67;
    /// Largest frame delta, in nominal frames, applied after a stall
    pub const MAX_FRAME_DELTA: f32 = 2.5;

    /// Canvas size used before the host reports a real one
    pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;

    /// Score needed per wave
    pub const SCORE_PER_WAVE: u64 = 100;

    /// Diagonal movement factor (~1/sqrt(2))
    pub const DIAGONAL_FACTOR: f32 = 0.707;

    /// Bullets are culled this far beyond the top/bottom edges
    pub const BULLET_CULL_MARGIN: f32 = 10.0;
    /// Enemies are culled this far below the bottom edge
    pub const ENEMY_CULL_MARGIN: f32 = 50.0;

    /// Storage key for the persisted high score
    pub const HIGH_SCORE_KEY: &str = "highScore";
}
