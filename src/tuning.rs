//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON override can rebalance a run
//! without a rebuild. Missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Per-archetype enemy stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeStats {
    pub width: f32,
    pub height: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub health: u32,
    pub reward: u64,
}

/// Balance constants for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_max_health: u32,
    /// Distance from the bottom edge at spawn
    pub player_spawn_offset: f32,

    // === Dash ===
    pub dash_speed_multiplier: f32,
    /// Frames the dash lasts
    pub dash_duration: f32,
    /// Frames before the dash can be used again
    pub dash_cooldown: f32,
    /// Invulnerability frames granted by a dash
    pub dash_invulnerability: f32,

    // === Player weapon ===
    pub shoot_cooldown: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,

    // === Enemy weapon ===
    pub enemy_bullet_width: f32,
    pub enemy_bullet_height: f32,
    pub enemy_bullet_speed: f32,
    pub enemy_shoot_min_interval: f32,
    pub enemy_shoot_max_interval: f32,

    // === Damage ===
    pub bullet_damage: u32,
    pub collision_damage: u32,

    // === Spawner ===
    pub spawn_base_interval: f32,
    pub spawn_decay_per_wave: f32,
    pub spawn_min_interval: f32,
    /// Probability of an aggressive archetype (charger or shooter)
    pub special_chance: f64,
    /// Waves per extra enemy in a spawn batch
    pub batch_every_waves: u32,
    pub max_batch: u32,

    // === Archetypes ===
    pub basic: ArchetypeStats,
    pub charger: ArchetypeStats,
    pub shooter: ArchetypeStats,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width: 30.0,
            player_height: 40.0,
            player_speed: 8.0,
            player_max_health: 100,
            player_spawn_offset: 100.0,

            dash_speed_multiplier: 2.5,
            dash_duration: 10.0,
            dash_cooldown: 90.0,
            dash_invulnerability: 20.0,

            shoot_cooldown: 8.0,
            bullet_width: 4.0,
            bullet_height: 12.0,
            bullet_speed: 12.0,

            enemy_bullet_width: 4.0,
            enemy_bullet_height: 10.0,
            enemy_bullet_speed: 5.0,
            enemy_shoot_min_interval: 60.0,
            enemy_shoot_max_interval: 120.0,

            bullet_damage: 10,
            collision_damage: 20,

            spawn_base_interval: 60.0,
            spawn_decay_per_wave: 3.0,
            spawn_min_interval: 20.0,
            special_chance: 0.3,
            batch_every_waves: 5,
            max_batch: 3,

            basic: ArchetypeStats {
                width: 25.0,
                height: 25.0,
                min_speed: 2.0,
                max_speed: 4.0,
                health: 1,
                reward: 10,
            },
            charger: ArchetypeStats {
                width: 22.0,
                height: 22.0,
                min_speed: 2.5,
                max_speed: 3.5,
                health: 1,
                reward: 20,
            },
            shooter: ArchetypeStats {
                width: 30.0,
                height: 30.0,
                min_speed: 1.5,
                max_speed: 2.5,
                health: 2,
                reward: 30,
            },
        }
    }
}

impl Tuning {
    /// Storage key for tuning overrides
    pub const STORAGE_KEY: &'static str = "void_breacher_tuning";

    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load overrides from a store, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning overrides: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Spawn countdown reset value for a wave
    pub fn spawn_interval(&self, wave: u32) -> f32 {
        (self.spawn_base_interval - wave as f32 * self.spawn_decay_per_wave)
            .max(self.spawn_min_interval)
    }

    /// Enemies created per spawner trigger
    pub fn batch_size(&self, wave: u32) -> u32 {
        let every = self.batch_every_waves.max(1);
        (1 + wave.saturating_sub(1) / every).min(self.max_batch.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_spawn_interval_decays_to_floor() {
        let tuning = Tuning::default();
        assert_eq!(tuning.spawn_interval(1), 57.0);
        assert_eq!(tuning.spawn_interval(10), 30.0);
        assert_eq!(tuning.spawn_interval(14), 20.0);
        assert_eq!(tuning.spawn_interval(100), 20.0);
    }

    #[test]
    fn test_batch_size_grows_and_caps() {
        let tuning = Tuning::default();
        assert_eq!(tuning.batch_size(1), 1);
        assert_eq!(tuning.batch_size(5), 1);
        assert_eq!(tuning.batch_size(6), 2);
        assert_eq!(tuning.batch_size(50), 3);
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{"player_speed": 5.0, "collision_damage": 35}"#).unwrap();
        assert_eq!(tuning.player_speed, 5.0);
        assert_eq!(tuning.collision_damage, 35);
        assert_eq!(tuning.bullet_damage, Tuning::default().bullet_damage);
    }

    #[test]
    fn test_load_falls_back_on_garbage() {
        let mut store = MemoryStore::default();
        store.set(Tuning::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Tuning::load(&store), Tuning::default());
    }
}
