//! Per-frame simulation update
//!
//! Runs only while playing, in a fixed order: player, bullets, enemies
//! (including spawning), particles, collisions, wave. Later stages read
//! positions written by earlier ones in the same frame.

use glam::Vec2;

use super::autopilot;
use super::collision;
use super::geometry::clamp_to_bounds;
use super::particles::{self, Burst};
use super::spawner;
use super::state::{Bullet, BulletOwner, EnemyKind, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire (held; rate limited by the shoot cooldown)
    pub shoot: bool,
    /// Dash (edge triggered by the input layer)
    pub dash: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Wave reached at a given score
pub fn wave_for_score(score: u64) -> u32 {
    u32::try_from(score / SCORE_PER_WAVE)
        .unwrap_or(u32::MAX)
        .saturating_add(1)
}

/// Advance the game state by one frame.
///
/// `dt` is measured in nominal frames (1.0 at 60 Hz) and is clamped to
/// `MAX_FRAME_DELTA`. Does nothing outside the playing phase.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let dt = dt.clamp(0.0, MAX_FRAME_DELTA);

    let input = if input.idle_mode {
        autopilot::drive(state)
    } else {
        input.clone()
    };

    state.time_ticks += 1;

    update_player(state, &input, dt);
    update_bullets(state, dt);
    update_enemies(state, dt);
    particles::update(&mut state.particles, dt);
    collision::resolve(state);
    state.wave = wave_for_score(state.score);
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.shoot_cooldown = (player.shoot_cooldown - dt).max(0.0);
    player.dash_cooldown = (player.dash_cooldown - dt).max(0.0);
    player.dash_time = (player.dash_time - dt).max(0.0);
    player.invulnerable = (player.invulnerable - dt).max(0.0);

    let mut dashed = false;
    if input.dash && player.dash_ready() {
        player.dash_time = tuning.dash_duration;
        player.dash_cooldown = tuning.dash_cooldown;
        player.invulnerable = player.invulnerable.max(tuning.dash_invulnerability);
        dashed = true;
    }

    let mut dir = Vec2::ZERO;
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }
    if dir.x != 0.0 && dir.y != 0.0 {
        dir *= DIAGONAL_FACTOR;
    }

    let mut speed = player.speed;
    if player.is_dashing() {
        speed *= tuning.dash_speed_multiplier;
    }
    player.pos += dir * speed * dt;
    player.pos = clamp_to_bounds(player.pos, player.size, state.viewport);

    let fire = input.shoot && player.shoot_cooldown <= 0.0;
    if fire {
        player.shoot_cooldown = tuning.shoot_cooldown;
    }

    if dashed {
        state.events.push(GameEvent::Dashed);
    }
    if fire {
        fire_player_bullet(state);
    }
}

fn fire_player_bullet(state: &mut GameState) {
    let tuning = &state.tuning;
    let player = &state.player;
    let size = Vec2::new(tuning.bullet_width, tuning.bullet_height);
    let muzzle = Vec2::new(player.pos.x + player.size.x / 2.0, player.pos.y);

    state.bullets.push(Bullet {
        pos: Vec2::new(muzzle.x - size.x / 2.0, muzzle.y),
        size,
        vy: -tuning.bullet_speed,
        owner: BulletOwner::Player,
    });
    state.events.push(GameEvent::ShotFired);
    particles::emit(state, Burst::MuzzleFlash, muzzle);
}

fn update_bullets(state: &mut GameState, dt: f32) {
    let bottom = state.viewport.y + BULLET_CULL_MARGIN;
    let in_bounds = |b: &Bullet| b.pos.y >= -BULLET_CULL_MARGIN && b.pos.y <= bottom;

    for bullet in state.bullets.iter_mut().chain(state.enemy_bullets.iter_mut()) {
        bullet.pos.y += bullet.vy * dt;
    }
    state.bullets.retain(in_bounds);
    state.enemy_bullets.retain(in_bounds);
}

fn update_enemies(state: &mut GameState, dt: f32) {
    spawner::try_spawn(state, dt);

    let target = state.player.center();
    let mut muzzles = Vec::new();

    for enemy in state.enemies.iter_mut() {
        let center = enemy.center();
        match &mut enemy.kind {
            EnemyKind::Charger => {
                let to_player = target - center;
                let dist = to_player.length();
                // Already on top of the player: hold position
                if dist > f32::EPSILON {
                    enemy.pos += to_player / dist * enemy.speed * dt;
                }
            }
            EnemyKind::Basic => {
                enemy.pos.y += enemy.speed * dt;
            }
            EnemyKind::Shooter { shoot_timer } => {
                enemy.pos.y += enemy.speed * dt;
                *shoot_timer -= dt;
                if *shoot_timer <= 0.0 {
                    *shoot_timer = spawner::shoot_interval(&mut state.rng, &state.tuning);
                    muzzles.push(Vec2::new(
                        enemy.pos.x + enemy.size.x / 2.0,
                        enemy.pos.y + enemy.size.y,
                    ));
                }
            }
        }
    }

    let size = Vec2::new(
        state.tuning.enemy_bullet_width,
        state.tuning.enemy_bullet_height,
    );
    for muzzle in muzzles {
        state.enemy_bullets.push(Bullet {
            pos: Vec2::new(muzzle.x - size.x / 2.0, muzzle.y),
            size,
            vy: state.tuning.enemy_bullet_speed,
            owner: BulletOwner::Enemy,
        });
        state.events.push(GameEvent::EnemyFired);
    }

    let cull_below = state.viewport.y + ENEMY_CULL_MARGIN;
    state.enemies.retain(|e| e.pos.y <= cull_below);
}
