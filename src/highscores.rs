//! Best-score tracking
//!
//! Persisted as a single integer under `highScore`.

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::KeyValueStore;

/// The best score seen across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore(pub u64);

impl HighScore {
    /// Parse a stored value. Absent, empty or unparsable values count as 0.
    pub fn parse(raw: Option<&str>) -> Self {
        let value = raw
            .map(str::trim)
            .and_then(|s| {
                // Stored by older builds as a float string ("120.0"); keep the integer part
                s.parse::<u64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite() && *v >= 0.0)
                        .map(|v| v as u64)
                })
            })
            .unwrap_or(0);
        Self(value)
    }

    /// Read from a store
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self::parse(store.get(HIGH_SCORE_KEY).as_deref())
    }

    /// Whether a final score beats this one
    pub fn beaten_by(&self, score: u64) -> bool {
        score > self.0
    }

    /// Record a final score, returning true when it became the new best
    pub fn record(&mut self, score: u64) -> bool {
        if self.beaten_by(score) {
            self.0 = score;
            true
        } else {
            false
        }
    }

    /// Write to a store. Failures are logged, not propagated.
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match store.set(HIGH_SCORE_KEY, &self.0.to_string()) {
            Ok(()) => log::info!("High score saved ({})", self.0),
            Err(e) => log::warn!("Could not save high score: {}", e),
        }
    }
}
