//! HUD model
//!
//! Scalar text and overlay visibility derived from the state once per frame.
//! The host copies it into DOM elements; nothing flows back.

use crate::consts::FRAME_MS;
use crate::sim::{GamePhase, GameState};

/// Everything the HUD and overlays show
#[derive(Debug, Clone, PartialEq)]
pub struct HudModel {
    pub score: u64,
    pub wave: u32,
    pub high_score: u64,
    /// 0-100
    pub health_percent: f32,
    /// "DASH READY" or the remaining cooldown
    pub dash_text: String,
    pub show_menu: bool,
    pub show_pause: bool,
    pub show_game_over: bool,
    /// Start button visible (any phase but playing)
    pub show_start_button: bool,
    /// Pause button visible (only while playing)
    pub show_pause_button: bool,
    pub final_score: u64,
    pub final_wave: u32,
}

impl HudModel {
    pub fn from_state(state: &GameState) -> Self {
        let phase = state.phase;
        let player = &state.player;
        let dash_text = if player.dash_ready() {
            "DASH READY".to_string()
        } else {
            let seconds = player.dash_cooldown as f64 * FRAME_MS / 1000.0;
            format!("DASH {:.1}s", seconds)
        };

        Self {
            score: state.score,
            wave: state.wave,
            high_score: state.high_score,
            health_percent: player.health_percent(),
            dash_text,
            show_menu: phase == GamePhase::Menu,
            show_pause: phase == GamePhase::Paused,
            show_game_over: phase == GamePhase::GameOver,
            show_start_button: phase != GamePhase::Playing,
            show_pause_button: phase == GamePhase::Playing,
            final_score: state.score,
            final_wave: state.wave,
        }
    }

    /// Health text shown next to the bar
    pub fn health_text(&self) -> String {
        format!("{}%", self.health_percent.round() as i32)
    }
}
