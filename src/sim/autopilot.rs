//! Idle/demo mode autopilot
//!
//! Produces the input a simple human would: dodge whatever is about to hit
//! the ship, otherwise line up under the lowest enemy and keep firing.

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;

/// How far above the ship a threat is considered
const LOOKAHEAD: f32 = 160.0;
/// Horizontal slack added to the ship's width when checking threats
const DODGE_MARGIN: f32 = 12.0;
/// Horizontal alignment tolerance for firing
const AIM_TOLERANCE: f32 = 14.0;
/// Threat closer than this triggers a dash
const PANIC_DISTANCE: f32 = 50.0;
/// Preferred cruising height, as a fraction of the canvas height
const CRUISE_HEIGHT: f32 = 0.8;

/// Compute this frame's input from the current state
pub fn drive(state: &GameState) -> TickInput {
    let player = &state.player;
    let center = player.center();
    let half_width = player.size.x / 2.0 + DODGE_MARGIN;

    let mut input = TickInput::default();

    // Closest threat in the column above the ship
    let threats = state
        .enemy_bullets
        .iter()
        .map(|b| b.rect().center())
        .chain(state.enemies.iter().map(|e| e.center()));
    let nearest_threat = threats
        .filter(|p| {
            let dy = center.y - p.y;
            (center.x - p.x).abs() < half_width + 15.0 && dy > -player.size.y && dy < LOOKAHEAD
        })
        .min_by(|a, b| {
            a.distance_squared(center)
                .partial_cmp(&b.distance_squared(center))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(threat) = nearest_threat {
        // Step away from the threat, toward the roomier side when centred
        let go_left = if (threat.x - center.x).abs() < 1.0 {
            center.x > state.viewport.x / 2.0
        } else {
            threat.x > center.x
        };
        input.left = go_left;
        input.right = !go_left;
        input.dash = threat.distance(center) < PANIC_DISTANCE && player.dash_ready();
    } else if let Some(target) = lowest_enemy(state) {
        if target.x < center.x - AIM_TOLERANCE / 2.0 {
            input.left = true;
        } else if target.x > center.x + AIM_TOLERANCE / 2.0 {
            input.right = true;
        }
    }

    // Hold a cruising height near the bottom
    let cruise_y = state.viewport.y * CRUISE_HEIGHT;
    if center.y < cruise_y - player.speed {
        input.down = true;
    } else if center.y > cruise_y + player.speed {
        input.up = true;
    }

    input.shoot = state
        .enemies
        .iter()
        .any(|e| (e.center().x - center.x).abs() < e.size.x / 2.0 + AIM_TOLERANCE && e.pos.y < center.y);

    input
}

/// Centre of the enemy closest to the bottom edge that is above the ship
fn lowest_enemy(state: &GameState) -> Option<Vec2> {
    let ship_y = state.player.pos.y;
    state
        .enemies
        .iter()
        .map(|e| e.center())
        .filter(|c| c.y < ship_y)
        .max_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
}
