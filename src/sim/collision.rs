//! Collision resolution
//!
//! Three passes over the entity stores: enemy bullets vs player, player
//! bullets vs enemies, player vs enemies. Removals are marked during the scan
//! and applied afterwards, so indices stay valid while scanning.

use super::geometry::overlaps;
use super::particles::{self, Burst};
use super::phase;
use super::state::{GameEvent, GamePhase, GameState};

/// Run all collision passes for this frame.
///
/// Once the player dies the rest of the frame's collisions are skipped.
pub fn resolve(state: &mut GameState) {
    enemy_bullets_vs_player(state);
    if state.phase == GamePhase::GameOver {
        return;
    }
    player_bullets_vs_enemies(state);
    player_vs_enemies(state);
}

/// Drop every item whose mark is set
fn retain_unmarked<T>(items: &mut Vec<T>, removed: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !removed.get(index).copied().unwrap_or(false);
        index += 1;
        keep
    });
}

/// Subtract health (clamped at 0). Returns true if the hit was fatal.
fn damage_player(state: &mut GameState, damage: u32) -> bool {
    let player = &mut state.player;
    player.health = player.health.saturating_sub(damage);
    state.events.push(GameEvent::PlayerHit {
        damage,
        health: player.health,
    });
    player.health == 0
}

fn kill_player(state: &mut GameState) {
    let at = state.player.center();
    particles::emit(state, Burst::Death, at);
    phase::enter_game_over(state);
}

fn enemy_bullets_vs_player(state: &mut GameState) {
    if state.player.is_invulnerable() {
        return;
    }

    let player_rect = state.player.rect();
    let damage = state.tuning.bullet_damage;
    let mut removed = vec![false; state.enemy_bullets.len()];

    for i in 0..state.enemy_bullets.len() {
        let bullet_rect = state.enemy_bullets[i].rect();
        if !overlaps(&player_rect, &bullet_rect) {
            continue;
        }
        removed[i] = true;
        particles::emit(state, Burst::Damage, bullet_rect.center());

        if damage_player(state, damage) {
            kill_player(state);
            break;
        }
    }

    retain_unmarked(&mut state.enemy_bullets, &removed);
}

fn player_bullets_vs_enemies(state: &mut GameState) {
    let mut bullet_removed = vec![false; state.bullets.len()];
    let mut enemy_removed = vec![false; state.enemies.len()];

    for bi in 0..state.bullets.len() {
        let bullet_rect = state.bullets[bi].rect();

        for ei in 0..state.enemies.len() {
            if enemy_removed[ei] || !overlaps(&bullet_rect, &state.enemies[ei].rect()) {
                continue;
            }
            bullet_removed[bi] = true;

            let enemy = &mut state.enemies[ei];
            enemy.health = enemy.health.saturating_sub(1);
            let center = enemy.center();
            let archetype = enemy.archetype();

            if enemy.health == 0 {
                enemy_removed[ei] = true;
                let reward = archetype.reward(&state.tuning);
                state.score += reward;
                state
                    .events
                    .push(GameEvent::EnemyDestroyed { archetype, reward });
                particles::emit(state, Burst::Explosion, center);
            } else {
                state.events.push(GameEvent::EnemyHit { archetype });
                particles::emit(state, Burst::HitSpark, center);
            }

            // One hit per bullet per frame
            break;
        }
    }

    retain_unmarked(&mut state.bullets, &bullet_removed);
    retain_unmarked(&mut state.enemies, &enemy_removed);
}

fn player_vs_enemies(state: &mut GameState) {
    if state.player.is_invulnerable() {
        return;
    }

    let player_rect = state.player.rect();
    let damage = state.tuning.collision_damage;
    let mut removed = vec![false; state.enemies.len()];

    for i in 0..state.enemies.len() {
        let enemy_rect = state.enemies[i].rect();
        if !overlaps(&player_rect, &enemy_rect) {
            continue;
        }
        removed[i] = true;
        particles::emit(state, Burst::Explosion, enemy_rect.center());

        if damage_player(state, damage) {
            kill_player(state);
            break;
        }
    }

    retain_unmarked(&mut state.enemies, &removed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, BulletOwner, Enemy, EnemyKind};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, Tuning::default());
        state.reset(0);
        state.phase = GamePhase::Playing;
        state
    }

    fn enemy_at(state: &mut GameState, x: f32, y: f32, kind: EnemyKind, health: u32) {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::new(25.0, 25.0),
            speed: 2.0,
            health,
            kind,
        });
    }

    fn bullet_at(x: f32, y: f32, owner: BulletOwner) -> Bullet {
        Bullet {
            pos: Vec2::new(x, y),
            size: Vec2::new(4.0, 12.0),
            vy: if owner == BulletOwner::Player { -12.0 } else { 5.0 },
            owner,
        }
    }

    fn count_destroyed(state: &GameState) -> usize {
        state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
            .count()
    }

    #[test]
    fn test_bullet_kills_basic_enemy() {
        let mut state = playing_state();
        enemy_at(&mut state, 100.0, 100.0, EnemyKind::Basic, 1);
        state.bullets.push(bullet_at(110.0, 105.0, BulletOwner::Player));

        resolve(&mut state);

        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(count_destroyed(&state), 1);
        // Exactly one explosion burst
        assert_eq!(state.particles.len(), 12);
    }

    #[test]
    fn test_tough_enemy_survives_first_hit() {
        let mut state = playing_state();
        enemy_at(&mut state, 100.0, 100.0, EnemyKind::Shooter { shoot_timer: 50.0 }, 2);
        state.bullets.push(bullet_at(110.0, 105.0, BulletOwner::Player));

        resolve(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 1);
        assert_eq!(state.score, 0);
        assert!(state.bullets.is_empty());

        state.bullets.push(bullet_at(110.0, 105.0, BulletOwner::Player));
        resolve(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 30);
    }

    #[test]
    fn test_bullet_hits_only_one_enemy() {
        let mut state = playing_state();
        // Two stacked enemies both overlapped by the same bullet
        enemy_at(&mut state, 100.0, 100.0, EnemyKind::Basic, 1);
        enemy_at(&mut state, 100.0, 104.0, EnemyKind::Basic, 1);
        state.bullets.push(bullet_at(110.0, 105.0, BulletOwner::Player));

        resolve(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 10);
        assert_eq!(count_destroyed(&state), 1);
    }

    #[test]
    fn test_two_bullets_two_enemies_same_frame() {
        let mut state = playing_state();
        enemy_at(&mut state, 100.0, 100.0, EnemyKind::Basic, 1);
        enemy_at(&mut state, 300.0, 100.0, EnemyKind::Basic, 1);
        state.bullets.push(bullet_at(310.0, 105.0, BulletOwner::Player));
        state.bullets.push(bullet_at(110.0, 105.0, BulletOwner::Player));
        state.bullets.push(bullet_at(500.0, 105.0, BulletOwner::Player));

        resolve(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.x, 500.0);
        assert_eq!(state.score, 20);
    }

    #[test]
    fn test_second_bullet_skips_dead_enemy() {
        let mut state = playing_state();
        enemy_at(&mut state, 100.0, 100.0, EnemyKind::Basic, 1);
        state.bullets.push(bullet_at(110.0, 105.0, BulletOwner::Player));
        state.bullets.push(bullet_at(112.0, 108.0, BulletOwner::Player));

        resolve(&mut state);
        assert!(state.enemies.is_empty());
        // Second bullet found nothing alive and keeps flying
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_enemy_bullet_damages_player() {
        let mut state = playing_state();
        let p = state.player.pos;
        state.enemy_bullets.push(bullet_at(p.x + 10.0, p.y + 10.0, BulletOwner::Enemy));

        resolve(&mut state);
        assert_eq!(state.player.health, 90);
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_invulnerable_player_ignores_damage() {
        let mut state = playing_state();
        state.player.invulnerable = 5.0;
        let p = state.player.pos;
        state.enemy_bullets.push(bullet_at(p.x + 10.0, p.y + 10.0, BulletOwner::Enemy));
        enemy_at(&mut state, p.x, p.y, EnemyKind::Basic, 1);

        resolve(&mut state);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.enemy_bullets.len(), 1);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_ram_kills_low_health_player_same_frame() {
        let mut state = playing_state();
        state.score = 70;
        state.high_score = 50;
        state.player.health = 10;
        let p = state.player.pos;
        enemy_at(&mut state, p.x, p.y, EnemyKind::Charger, 1);

        resolve(&mut state);
        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 70);
        assert!(state.enemies.is_empty());
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver {
                score: 70,
                new_high_score: true,
                ..
            }
        )));
    }

    #[test]
    fn test_game_over_keeps_higher_stored_score() {
        let mut state = playing_state();
        state.score = 40;
        state.high_score = 500;
        state.player.health = 5;
        let p = state.player.pos;
        state.enemy_bullets.push(bullet_at(p.x + 10.0, p.y + 10.0, BulletOwner::Enemy));

        resolve(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 500);
    }

    #[test]
    fn test_fatal_bullet_emits_damage_and_death_bursts() {
        let mut state = playing_state();
        state.player.health = 10;
        let p = state.player.pos;
        state.enemy_bullets.push(bullet_at(p.x + 10.0, p.y + 10.0, BulletOwner::Enemy));

        resolve(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        // 6 damage + 40 death
        assert_eq!(state.particles.len(), 46);
    }

    #[test]
    fn test_kill_then_ram_reports_new_wave() {
        let mut state = playing_state();
        state.score = 90;
        state.player.health = 10;
        enemy_at(&mut state, 100.0, 100.0, EnemyKind::Basic, 1);
        state.bullets.push(bullet_at(110.0, 105.0, BulletOwner::Player));
        let p = state.player.pos;
        enemy_at(&mut state, p.x, p.y, EnemyKind::Basic, 1);

        resolve(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 100);
        assert_eq!(state.wave, 2);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver {
                score: 100,
                wave: 2,
                ..
            }
        )));
    }

    #[test]
    fn test_death_skips_remaining_passes() {
        let mut state = playing_state();
        state.player.health = 10;
        let p = state.player.pos;
        state.enemy_bullets.push(bullet_at(p.x + 10.0, p.y + 10.0, BulletOwner::Enemy));
        enemy_at(&mut state, 100.0, 100.0, EnemyKind::Basic, 1);
        state.bullets.push(bullet_at(110.0, 105.0, BulletOwner::Player));

        resolve(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_multiple_enemy_hits_in_one_frame() {
        let mut state = playing_state();
        let p = state.player.pos;
        enemy_at(&mut state, p.x, p.y, EnemyKind::Basic, 1);
        enemy_at(&mut state, p.x + 5.0, p.y + 5.0, EnemyKind::Basic, 1);
        enemy_at(&mut state, 10.0, 10.0, EnemyKind::Basic, 1);

        resolve(&mut state);
        assert_eq!(state.player.health, 60);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos, Vec2::new(10.0, 10.0));
    }
}
