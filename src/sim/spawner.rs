//! Timer-driven enemy spawner
//!
//! The countdown shrinks with the wave. A whole batch is created on the tick
//! the countdown elapses; nothing is deferred to later ticks.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Archetype, Enemy, EnemyKind, GameEvent, GameState};
use crate::tuning::Tuning;

/// Weighted archetype draw: `special_chance` splits evenly between chargers
/// and shooters, the rest are basic.
pub fn roll_archetype(state: &mut GameState) -> Archetype {
    let special = state.tuning.special_chance.clamp(0.0, 1.0);
    if state.rng.random_bool(special) {
        if state.rng.random_bool(0.5) {
            Archetype::Charger
        } else {
            Archetype::Shooter
        }
    } else {
        Archetype::Basic
    }
}

/// Fresh shoot timer, jittered between the configured bounds
pub fn shoot_interval(rng: &mut Pcg32, tuning: &Tuning) -> f32 {
    let lo = tuning.enemy_shoot_min_interval;
    let hi = tuning.enemy_shoot_max_interval;
    if hi <= lo {
        return lo;
    }
    lo + rng.random::<f32>() * (hi - lo)
}

/// Create one enemy of the given archetype just above the top edge
pub fn spawn_enemy(state: &mut GameState, archetype: Archetype) {
    let stats = *archetype.stats(&state.tuning);
    let size = Vec2::new(stats.width, stats.height);
    let x = state.rand_between(0.0, state.viewport.x - size.x);
    let speed = state.rand_between(stats.min_speed, stats.max_speed);
    let kind = match archetype {
        Archetype::Basic => EnemyKind::Basic,
        Archetype::Charger => EnemyKind::Charger,
        Archetype::Shooter => EnemyKind::Shooter {
            shoot_timer: shoot_interval(&mut state.rng, &state.tuning),
        },
    };

    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos: Vec2::new(x, -size.y),
        size,
        speed,
        health: stats.health.max(1),
        kind,
    });
    state.events.push(GameEvent::EnemySpawned { archetype });
}

/// Count down and spawn a batch when the timer elapses
pub fn try_spawn(state: &mut GameState, dt: f32) {
    state.spawn_timer -= dt;
    if state.spawn_timer > 0.0 {
        return;
    }

    let batch = state.tuning.batch_size(state.wave);
    for _ in 0..batch {
        let archetype = roll_archetype(state);
        spawn_enemy(state, archetype);
    }
    state.spawn_timer = state.tuning.spawn_interval(state.wave);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawns_on_first_tick_then_waits() {
        let mut state = GameState::new(11, Tuning::default());
        try_spawn(&mut state, 1.0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawn_timer, 57.0);

        for _ in 0..56 {
            try_spawn(&mut state, 1.0);
        }
        assert_eq!(state.enemies.len(), 1);
        try_spawn(&mut state, 1.0);
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_interval_uses_current_wave() {
        let mut state = GameState::new(11, Tuning::default());
        state.wave = 20;
        try_spawn(&mut state, 1.0);
        assert_eq!(state.spawn_timer, 20.0);
        // Wave 20 batches are capped at 3
        assert_eq!(state.enemies.len(), 3);
    }

    #[test]
    fn test_spawn_position_inside_horizontal_range() {
        let mut state = GameState::new(11, Tuning::default());
        state.resize(300.0, 400.0);
        for _ in 0..200 {
            let archetype = roll_archetype(&mut state);
            spawn_enemy(&mut state, archetype);
        }
        for enemy in &state.enemies {
            assert!(enemy.pos.x >= 0.0);
            assert!(enemy.pos.x + enemy.size.x <= 300.0);
            assert_eq!(enemy.pos.y, -enemy.size.y);
            assert!(enemy.health >= 1);
        }
    }

    #[test]
    fn test_archetype_mix_roughly_weighted() {
        let mut state = GameState::new(1234, Tuning::default());
        let draws = 4000;
        let specials = (0..draws)
            .filter(|_| roll_archetype(&mut state) != Archetype::Basic)
            .count();
        let ratio = specials as f64 / draws as f64;
        assert!((0.25..0.35).contains(&ratio), "special ratio {}", ratio);
    }

    #[test]
    fn test_only_shooters_carry_timer() {
        let mut state = GameState::new(5, Tuning::default());
        spawn_enemy(&mut state, Archetype::Shooter);
        spawn_enemy(&mut state, Archetype::Basic);
        match state.enemies[0].kind {
            EnemyKind::Shooter { shoot_timer } => assert!((60.0..120.0).contains(&shoot_timer)),
            other => panic!("expected shooter, got {:?}", other),
        }
        assert_eq!(state.enemies[1].kind, EnemyKind::Basic);
        assert_eq!(state.enemies[0].health, 2);
    }
}
