//! Decorative falling starfield
//!
//! Reads no game state and affects nothing; it only needs the canvas size.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per frame
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    rng: Pcg32,
}

impl Starfield {
    pub fn new(count: usize, viewport: Vec2, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random::<f32>() * viewport.x,
                    rng.random::<f32>() * viewport.y,
                ),
                size: 1.0 + rng.random::<f32>() * 2.0,
                speed: 0.5 + rng.random::<f32>() * 2.0,
            })
            .collect();
        Self { stars, rng }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Fall, wrapping to the top at a fresh column once past the bottom
    pub fn update(&mut self, dt: f32, viewport: Vec2) {
        for star in &mut self.stars {
            star.pos.y += star.speed * dt;
            if star.pos.y > viewport.y {
                star.pos.y = 0.0;
                star.pos.x = self.rng.random::<f32>() * viewport.x;
            }
        }
    }
}
