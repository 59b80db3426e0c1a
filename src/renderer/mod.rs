//! Rendering boundary
//!
//! The simulation exposes a read-only `RenderSnapshot` after each frame.
//! `build_frame` turns it into backend-neutral draw commands which the host
//! paints (canvas 2D on the web). Nothing here writes back to the game.

pub mod shapes;
pub mod starfield;

use glam::Vec2;

use crate::sim::{Bullet, Enemy, GamePhase, GameState, Particle, Player};

pub use shapes::{DrawCmd, Rgba, build_frame};
pub use starfield::{Star, Starfield};

/// Read-only view of everything the renderer may draw
#[derive(Debug, Clone, Copy)]
pub struct RenderSnapshot<'a> {
    pub player: &'a Player,
    pub bullets: &'a [Bullet],
    pub enemy_bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub particles: &'a [Particle],
    pub score: u64,
    pub wave: u32,
    pub health: u32,
    pub dash_cooldown: f32,
    pub phase: GamePhase,
    pub viewport: Vec2,
    /// Frames simulated, for blink effects
    pub time_ticks: u64,
}

impl<'a> RenderSnapshot<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            player: &state.player,
            bullets: &state.bullets,
            enemy_bullets: &state.enemy_bullets,
            enemies: &state.enemies,
            particles: &state.particles,
            score: state.score,
            wave: state.wave,
            health: state.player.health,
            dash_cooldown: state.player.dash_cooldown,
            phase: state.phase,
            viewport: state.viewport,
            time_ticks: state.time_ticks,
        }
    }
}
