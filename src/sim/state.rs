//! Game state and core simulation types
//!
//! Everything a session mutates lives in `GameState`. Nothing here outlives a
//! session except `high_score`, which is carried across resets.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geometry::{Rect, clamp_to_bounds};
use crate::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::tuning::{ArchetypeStats, Tuning};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-run
    Paused,
    /// Run ended, waiting for restart or menu
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameover",
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    /// Frames left of an active dash
    pub dash_time: f32,
    /// Frames until the dash is available again
    pub dash_cooldown: f32,
    /// Frames of immunity to damage
    pub invulnerable: f32,
    /// Frames until the next shot
    pub shoot_cooldown: f32,
}

impl Player {
    /// Spawn centred horizontally, near the bottom edge
    pub fn new(tuning: &Tuning, viewport: Vec2) -> Self {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        let pos = Vec2::new(
            viewport.x / 2.0 - size.x / 2.0,
            viewport.y - tuning.player_spawn_offset,
        );
        Self {
            pos: clamp_to_bounds(pos, size, viewport),
            size,
            speed: tuning.player_speed,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            dash_time: 0.0,
            dash_cooldown: 0.0,
            invulnerable: 0.0,
            shoot_cooldown: 0.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_time > 0.0
    }

    pub fn dash_ready(&self) -> bool {
        self.dash_cooldown <= 0.0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    /// Health as a 0-100 percentage
    pub fn health_percent(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32 * 100.0
    }
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A projectile. `vy` is signed: negative travels up, positive travels down.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub vy: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Enemy archetype tag (stats and rewards are keyed by this)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    Basic,
    Charger,
    Shooter,
}

impl Archetype {
    pub fn stats<'a>(&self, tuning: &'a Tuning) -> &'a ArchetypeStats {
        match self {
            Archetype::Basic => &tuning.basic,
            Archetype::Charger => &tuning.charger,
            Archetype::Shooter => &tuning.shooter,
        }
    }

    pub fn reward(&self, tuning: &Tuning) -> u64 {
        self.stats(tuning).reward
    }
}

/// Behaviour of an enemy, carrying only the state that behaviour needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyKind {
    /// Falls straight down
    Basic,
    /// Homes toward the player
    Charger,
    /// Falls straight down, firing when its timer elapses
    Shooter { shoot_timer: f32 },
}

impl EnemyKind {
    pub fn archetype(&self) -> Archetype {
        match self {
            EnemyKind::Basic => Archetype::Basic,
            EnemyKind::Charger => Archetype::Charger,
            EnemyKind::Shooter { .. } => Archetype::Shooter,
        }
    }
}

/// An enemy ship
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: u32,
    pub kind: EnemyKind,
}

impl Enemy {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn archetype(&self) -> Archetype {
        self.kind.archetype()
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames remaining
    pub life: f32,
    /// Frames at spawn (for fade-out)
    pub max_life: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub size: f32,
    /// Downward acceleration per frame
    pub gravity: f32,
}

impl Particle {
    /// Remaining life as 0-1
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Notable things that happened during a frame, for host-side effects/logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShotFired,
    Dashed,
    EnemySpawned { archetype: Archetype },
    EnemyFired,
    EnemyHit { archetype: Archetype },
    EnemyDestroyed { archetype: Archetype, reward: u64 },
    PlayerHit { damage: u32, health: u32 },
    GameOver { score: u64, wave: u32, new_high_score: bool },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Canvas size; all bounds are derived from it every frame
    pub viewport: Vec2,
    pub phase: GamePhase,

    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,

    pub score: u64,
    pub wave: u32,
    pub high_score: u64,
    /// Frames until the spawner fires
    pub spawn_timer: f32,
    /// Frames simulated this session
    pub time_ticks: u64,

    /// Maximum live particles (0 disables effects)
    pub particle_cap: usize,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh state in the menu phase
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let viewport = Vec2::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning, viewport),
            tuning,
            viewport,
            phase: GamePhase::Menu,
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            score: 0,
            wave: 1,
            high_score: 0,
            spawn_timer: 0.0,
            time_ticks: 0,
            particle_cap: 500,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Reset all session state; keeps RNG, tuning, viewport and particle cap
    pub fn reset(&mut self, high_score: u64) {
        self.player = Player::new(&self.tuning, self.viewport);
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.score = 0;
        self.wave = 1;
        self.high_score = high_score;
        self.spawn_timer = 0.0;
        self.time_ticks = 0;
        self.events.clear();
        self.next_id = 1;
    }

    /// Apply a new canvas size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
        self.player.pos = clamp_to_bounds(self.player.pos, self.player.size, self.viewport);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Uniform float in `[lo, hi)`; degenerate ranges yield `lo`
    pub fn rand_between(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + self.rng.random::<f32>() * (hi - lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_in_menu() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.wave, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_player_spawn_position() {
        let player = Player::new(&Tuning::default(), Vec2::new(800.0, 600.0));
        assert_eq!(player.pos, Vec2::new(385.0, 500.0));
    }

    #[test]
    fn test_reset_clears_collections() {
        let mut state = GameState::new(7, Tuning::default());
        state.score = 450;
        state.wave = 5;
        state.bullets.push(Bullet {
            pos: Vec2::ZERO,
            size: Vec2::ONE,
            vy: -12.0,
            owner: BulletOwner::Player,
        });
        state.events.push(GameEvent::ShotFired);
        state.player.health = 5;

        state.reset(300);
        assert_eq!(state.score, 0);
        assert_eq!(state.wave, 1);
        assert_eq!(state.high_score, 300);
        assert!(state.bullets.is_empty());
        assert!(state.events.is_empty());
        assert_eq!(state.player.health, state.player.max_health);
    }

    #[test]
    fn test_resize_reclamps_player() {
        let mut state = GameState::new(7, Tuning::default());
        state.player.pos = Vec2::new(700.0, 500.0);
        state.resize(400.0, 300.0);
        assert_eq!(state.player.pos, Vec2::new(370.0, 260.0));
    }

    #[test]
    fn test_rand_between_degenerate_range() {
        let mut state = GameState::new(7, Tuning::default());
        assert_eq!(state.rand_between(5.0, 5.0), 5.0);
        assert_eq!(state.rand_between(5.0, 1.0), 5.0);
        let v = state.rand_between(1.0, 2.0);
        assert!((1.0..2.0).contains(&v));
    }

    #[test]
    fn test_health_percent() {
        let mut player = Player::new(&Tuning::default(), Vec2::new(800.0, 600.0));
        player.health = 35;
        assert!((player.health_percent() - 35.0).abs() < 1e-4);
    }
}
