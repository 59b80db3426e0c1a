//! Draw command generation for 2D primitives

use glam::Vec2;

use super::RenderSnapshot;
use super::starfield::Starfield;
use crate::sim::{Archetype, BulletOwner, GamePhase};

/// 8-bit colour with float alpha (canvas style)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// From 0xRRGGBB
    pub const fn hex(rgb: u32, a: f32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` string
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Backdrop: slightly transparent so moving shapes leave a short trail
const BACKDROP: Rgba = Rgba::hex(0x000811, 0.1);
const PLAYER: Rgba = Rgba::hex(0x00ffff, 1.0);
const PLAYER_BULLET: Rgba = Rgba::hex(0xffff00, 1.0);
const ENEMY_BULLET: Rgba = Rgba::hex(0xff6666, 1.0);
const STAR: Rgba = Rgba::hex(0xaaccff, 0.8);

fn enemy_color(archetype: Archetype) -> Rgba {
    match archetype {
        Archetype::Basic => Rgba::hex(0xff4444, 1.0),
        Archetype::Charger => Rgba::hex(0xff00ff, 1.0),
        Archetype::Shooter => Rgba::hex(0xffaa00, 1.0),
    }
}

/// One primitive. `glow` is a shadow blur radius in pixels (0 = none).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        color: Rgba,
    },
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Rgba,
        glow: f32,
    },
    Triangle {
        points: [Vec2; 3],
        color: Rgba,
        glow: f32,
    },
}

/// Build the frame back to front: backdrop, stars, particles, enemies,
/// bullets, ship.
pub fn build_frame(snapshot: &RenderSnapshot, stars: &Starfield, glow: bool) -> Vec<DrawCmd> {
    let glow_px = |px: f32| if glow { px } else { 0.0 };
    let mut cmds = Vec::with_capacity(
        2 + stars.stars().len()
            + snapshot.particles.len()
            + snapshot.enemies.len()
            + snapshot.bullets.len()
            + snapshot.enemy_bullets.len(),
    );

    cmds.push(DrawCmd::Clear { color: BACKDROP });

    for star in stars.stars() {
        cmds.push(DrawCmd::Rect {
            pos: star.pos,
            size: Vec2::splat(star.size),
            color: STAR,
            glow: 0.0,
        });
    }

    for particle in snapshot.particles {
        cmds.push(DrawCmd::Rect {
            pos: particle.pos - Vec2::splat(particle.size / 2.0),
            size: Vec2::splat(particle.size),
            color: Rgba::hex(particle.color, particle.alpha()),
            glow: 0.0,
        });
    }

    for enemy in snapshot.enemies {
        cmds.push(DrawCmd::Rect {
            pos: enemy.pos,
            size: enemy.size,
            color: enemy_color(enemy.archetype()),
            glow: glow_px(10.0),
        });
    }

    for bullet in snapshot.bullets.iter().chain(snapshot.enemy_bullets) {
        let color = match bullet.owner {
            BulletOwner::Player => PLAYER_BULLET,
            BulletOwner::Enemy => ENEMY_BULLET,
        };
        cmds.push(DrawCmd::Rect {
            pos: bullet.pos,
            size: bullet.size,
            color,
            glow: glow_px(8.0),
        });
    }

    if snapshot.phase != GamePhase::Menu {
        cmds.push(ship(snapshot, glow_px(15.0)));
    }

    cmds
}

/// Ship triangle, blinking while invulnerable
fn ship(snapshot: &RenderSnapshot, glow: f32) -> DrawCmd {
    let player = snapshot.player;
    let blink = player.is_invulnerable() && (snapshot.time_ticks / 4) % 2 == 0;
    let color = if blink { PLAYER.with_alpha(0.35) } else { PLAYER };
    let (pos, size) = (player.pos, player.size);

    DrawCmd::Triangle {
        points: [
            Vec2::new(pos.x + size.x / 2.0, pos.y),
            Vec2::new(pos.x, pos.y + size.y),
            Vec2::new(pos.x + size.x, pos.y + size.y),
        ],
        color,
        glow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderSnapshot;
    use crate::sim::{Bullet, GameState, phase};
    use crate::tuning::Tuning;

    fn playing() -> GameState {
        let mut state = GameState::new(2, Tuning::default());
        phase::apply(&mut state, phase::Transition::NewRun, 0);
        state
    }

    #[test]
    fn test_hex_and_css() {
        let c = Rgba::hex(0x00ffff, 0.5);
        assert_eq!((c.r, c.g, c.b), (0, 255, 255));
        assert_eq!(c.to_css(), "rgba(0, 255, 255, 0.5)");
    }

    #[test]
    fn test_frame_order_and_ship_last() {
        let mut state = playing();
        state.bullets.push(Bullet {
            pos: Vec2::new(10.0, 10.0),
            size: Vec2::new(4.0, 12.0),
            vy: -12.0,
            owner: BulletOwner::Player,
        });
        let stars = Starfield::new(3, state.viewport, 1);
        let snapshot = RenderSnapshot::from_state(&state);
        let cmds = build_frame(&snapshot, &stars, true);

        assert!(matches!(cmds[0], DrawCmd::Clear { .. }));
        assert_eq!(cmds.len(), 1 + 3 + 1 + 1);
        match cmds.last() {
            Some(DrawCmd::Triangle { color, glow, .. }) => {
                assert_eq!(*color, PLAYER);
                assert_eq!(*glow, 15.0);
            }
            other => panic!("expected ship triangle, got {:?}", other),
        }
    }

    #[test]
    fn test_menu_hides_ship_and_glow_toggle() {
        let mut state = GameState::new(2, Tuning::default());
        state.bullets.push(Bullet {
            pos: Vec2::ZERO,
            size: Vec2::ONE,
            vy: -1.0,
            owner: BulletOwner::Player,
        });
        let stars = Starfield::new(0, state.viewport, 1);
        let cmds = build_frame(&RenderSnapshot::from_state(&state), &stars, false);
        assert_eq!(cmds.len(), 2);
        assert!(matches!(cmds[1], DrawCmd::Rect { glow, .. } if glow == 0.0));
    }

    #[test]
    fn test_invulnerable_ship_blinks() {
        let mut state = playing();
        state.player.invulnerable = 10.0;
        state.time_ticks = 0;
        let stars = Starfield::new(0, state.viewport, 1);
        let cmds = build_frame(&RenderSnapshot::from_state(&state), &stars, true);
        match cmds.last() {
            Some(DrawCmd::Triangle { color, .. }) => assert!(color.a < 1.0),
            other => panic!("expected ship triangle, got {:?}", other),
        }
    }
}
