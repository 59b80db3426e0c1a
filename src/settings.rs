//! Player preferences
//!
//! Persisted separately from the high score, as JSON under its own key.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Number of background stars
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 80,
            QualityPreset::High => 200,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle effects (explosions, sparks, muzzle flash)
    pub particles: bool,
    /// Scrolling starfield behind the playfield
    pub starfield: bool,
    /// Ship glow (canvas shadow blur)
    pub glow: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Behaviour ===
    /// Pause when the tab is hidden or the window loses focus
    pub pause_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no starfield scrolling, no glow)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            starfield: true,
            glow: true,
            show_fps: false,
            pause_on_blur: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "void_breacher_settings";

    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset disables the expensive effects
        if preset == QualityPreset::Low {
            self.glow = false;
            self.starfield = false;
        }
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective star count (respects reduced_motion)
    pub fn star_count(&self) -> usize {
        if !self.starfield || self.reduced_motion {
            0
        } else {
            self.quality.star_count()
        }
    }

    /// Effective glow (respects reduced_motion)
    pub fn effective_glow(&self) -> bool {
        self.glow && !self.reduced_motion
    }

    /// Load settings from a store, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to a store
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => match store.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings: {}", e),
            },
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_low_preset_disables_effects() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert!(!settings.effective_glow());
        assert_eq!(settings.star_count(), 0);
        assert_eq!(settings.max_particles(), 100);
    }

    #[test]
    fn test_particles_off_means_zero_cap() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_reduced_motion_hides_stars() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert_eq!(settings.star_count(), 0);
        assert!(!settings.effective_glow());
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(QualityPreset::Low.as_str(), "Low");
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_save_load_roundtrip_and_partial_json() {
        let mut store = MemoryStore::new();
        let settings = Settings::from_preset(QualityPreset::High);
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);

        store.set(Settings::STORAGE_KEY, r#"{"show_fps": true}"#).unwrap();
        let loaded = Settings::load(&store);
        assert!(loaded.show_fps);
        assert_eq!(loaded.quality, QualityPreset::Medium);
    }
}
