//! Particle bursts and particle update
//!
//! Particles are purely visual; nothing in the simulation reads them back.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle};

/// Burst recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Burst {
    /// Enemy destroyed or rammed
    Explosion,
    /// Enemy damaged but still alive
    HitSpark,
    /// Player struck by a bullet
    Damage,
    /// Player destroyed
    Death,
    /// Player fired
    MuzzleFlash,
}

struct Recipe {
    count: usize,
    speed: f32,
    life: f32,
    size: f32,
    gravity: f32,
    colors: &'static [u32],
}

impl Burst {
    fn recipe(&self) -> Recipe {
        match self {
            Burst::Explosion => Recipe {
                count: 12,
                speed: 4.0,
                life: 30.0,
                size: 3.0,
                gravity: 0.0,
                colors: &[0xff8800, 0xffaa00, 0xff4444],
            },
            Burst::HitSpark => Recipe {
                count: 4,
                speed: 3.0,
                life: 12.0,
                size: 2.0,
                gravity: 0.0,
                colors: &[0xffff00, 0xffffff],
            },
            Burst::Damage => Recipe {
                count: 6,
                speed: 3.0,
                life: 20.0,
                size: 3.0,
                gravity: 0.0,
                colors: &[0xff2255, 0xff6688],
            },
            Burst::Death => Recipe {
                count: 40,
                speed: 6.0,
                life: 60.0,
                size: 4.0,
                gravity: 0.1,
                colors: &[0x00ffff, 0xffffff, 0x66ccff],
            },
            Burst::MuzzleFlash => Recipe {
                count: 3,
                speed: 1.5,
                life: 6.0,
                size: 2.0,
                gravity: 0.0,
                colors: &[0xffff88],
            },
        }
    }
}

/// Spawn a burst centred on `at`, honouring the particle cap
pub fn emit(state: &mut GameState, burst: Burst, at: Vec2) {
    let recipe = burst.recipe();
    let room = state.particle_cap.saturating_sub(state.particles.len());
    let count = recipe.count.min(room);

    for _ in 0..count {
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * 2.0 * recipe.speed,
            (state.rng.random::<f32>() - 0.5) * 2.0 * recipe.speed,
        );
        let life = recipe.life * (0.75 + state.rng.random::<f32>() * 0.5);
        let color = recipe.colors[state.rng.random_range(0..recipe.colors.len())];
        state.particles.push(Particle {
            pos: at,
            vel,
            life,
            max_life: life,
            color,
            size: recipe.size,
            gravity: recipe.gravity,
        });
    }
}

/// Advance every particle and drop the expired ones
pub fn update(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel.y += particle.gravity * dt;
        particle.life -= dt;
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn spark(life: f32, gravity: f32) -> Particle {
        Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            life,
            max_life: life,
            color: 0xffffff,
            size: 2.0,
            gravity,
        }
    }

    #[test]
    fn test_particles_expire() {
        let mut particles = vec![spark(1.0, 0.0), spark(3.0, 0.0)];
        update(&mut particles, 1.0);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].pos, Vec2::new(1.0, 0.0));
        update(&mut particles, 1.0);
        update(&mut particles, 1.0);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut particles = vec![spark(10.0, 0.5)];
        update(&mut particles, 1.0);
        update(&mut particles, 1.0);
        assert!(particles[0].vel.y > 0.9);
        assert!(particles[0].pos.y > 0.0);
    }

    #[test]
    fn test_emit_respects_cap() {
        let mut state = GameState::new(3, Tuning::default());
        state.particle_cap = 5;
        emit(&mut state, Burst::Explosion, Vec2::new(10.0, 10.0));
        assert_eq!(state.particles.len(), 5);
        emit(&mut state, Burst::HitSpark, Vec2::ZERO);
        assert_eq!(state.particles.len(), 5);

        state.particle_cap = 0;
        state.particles.clear();
        emit(&mut state, Burst::Death, Vec2::ZERO);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_emit_positions_at_origin() {
        let mut state = GameState::new(3, Tuning::default());
        emit(&mut state, Burst::Explosion, Vec2::new(40.0, 60.0));
        assert_eq!(state.particles.len(), 12);
        assert!(state.particles.iter().all(|p| p.pos == Vec2::new(40.0, 60.0)));
        assert!(state.particles.iter().all(|p| p.life > 0.0 && p.life == p.max_life));
    }
}
