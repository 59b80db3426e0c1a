//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One owned `GameState`, passed explicitly
//! - Seeded RNG only
//! - Removals are collected during scans and applied afterwards

pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod particles;
pub mod phase;
pub mod spawner;
pub mod state;
pub mod tick;

pub use geometry::{Rect, clamp_to_bounds, overlaps};
pub use particles::Burst;
pub use phase::{Command, Transition};
pub use state::{
    Archetype, Bullet, BulletOwner, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Particle,
    Player,
};
pub use tick::{TickInput, tick, wave_for_score};
