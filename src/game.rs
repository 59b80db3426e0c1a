//! Host-facing game controller
//!
//! Owns the session state together with everything around it: the key-value
//! store, settings, input, frame clock and starfield. The host forwards DOM
//! events and calls `frame` once per animation frame; it reads back the HUD
//! model and draw commands.

use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::platform::{FrameClock, HostAction, InputState};
use crate::renderer::{DrawCmd, RenderSnapshot, Starfield, build_frame};
use crate::settings::Settings;
use crate::sim::{Command, GameEvent, GamePhase, GameState, Transition, phase, tick};
use crate::tuning::Tuning;
use crate::ui::HudModel;

/// Mixed into the session seed so the stars don't mirror enemy spawns
const STAR_SEED_SALT: u64 = 0x5eed_57a2;

pub struct Game<S: KeyValueStore> {
    state: GameState,
    store: S,
    settings: Settings,
    input: InputState,
    clock: FrameClock,
    stars: Starfield,
    high_score: HighScore,
}

impl<S: KeyValueStore> Game<S> {
    /// Load tuning, settings and the high score from `store` and sit in the menu
    pub fn new(seed: u64, store: S) -> Self {
        let tuning = Tuning::load(&store);
        let settings = Settings::load(&store);
        let high_score = HighScore::load(&store);

        let mut state = GameState::new(seed, tuning);
        state.high_score = high_score.0;
        state.particle_cap = settings.max_particles();
        let stars = Starfield::new(settings.star_count(), state.viewport, seed ^ STAR_SEED_SALT);

        log::info!(
            "Game ready (seed {}, quality {}, high score {})",
            seed,
            settings.quality.as_str(),
            high_score.0
        );

        Self {
            state,
            store,
            settings,
            input: InputState::new(),
            clock: FrameClock::new(),
            stars,
            high_score,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings, apply them and persist them
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.state.particle_cap = self.settings.max_particles();
        self.state.particles.truncate(self.state.particle_cap);
        self.stars = Starfield::new(
            self.settings.star_count(),
            self.state.viewport,
            self.state.seed ^ STAR_SEED_SALT,
        );
        self.settings.save(&mut self.store);
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.set_idle_mode(idle);
    }

    /// Apply a phase command. Returns false when it is not legal right now.
    pub fn command(&mut self, command: Command) -> bool {
        let Some(transition) = phase::transition(self.state.phase, command) else {
            log::debug!("Ignoring {:?} while {}", command, self.state.phase.as_str());
            return false;
        };

        let stored = if transition == Transition::NewRun {
            self.high_score = HighScore::load(&self.store);
            self.high_score.0
        } else {
            self.state.high_score
        };
        phase::apply(&mut self.state, transition, stored);
        if matches!(transition, Transition::NewRun | Transition::Resume) {
            // First frame back gets a nominal delta
            self.clock.reset();
        }
        true
    }

    /// Key press. Phase commands are handled here; anything that needs the
    /// browser (fullscreen) is handed back.
    pub fn key_down(&mut self, code: &str) -> Option<HostAction> {
        match self.input.key_down(code)? {
            HostAction::Command(command) => {
                self.command(command);
                None
            }
            action => Some(action),
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.key_up(code);
    }

    /// Focus lost or tab hidden: drop held keys and auto-pause if enabled
    pub fn blur(&mut self, reason: &str) {
        self.input.release_all();
        if self.settings.pause_on_blur
            && self.state.phase == GamePhase::Playing
            && self.command(Command::TogglePause)
        {
            log::info!("Auto-paused ({})", reason);
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Advance one animation frame. Returns the events raised during it.
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let dt = self.clock.advance(now_ms);
        let input = self.input.sample();

        if self.state.phase == GamePhase::Playing {
            tick(&mut self.state, &input, dt);
        }
        self.stars.update(dt, self.state.viewport);

        let events = self.state.drain_events();
        for event in &events {
            match *event {
                GameEvent::GameOver {
                    score,
                    new_high_score: true,
                    ..
                } => {
                    if self.high_score.record(score) {
                        self.high_score.save(&mut self.store);
                    }
                }
                GameEvent::EnemyDestroyed { archetype, reward } => {
                    log::debug!("{:?} destroyed (+{})", archetype, reward);
                }
                GameEvent::PlayerHit { damage, health } => {
                    log::debug!("Player hit for {} ({} left)", damage, health);
                }
                _ => {}
            }
        }
        events
    }

    pub fn hud(&self) -> HudModel {
        HudModel::from_state(&self.state)
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot::from_state(&self.state)
    }

    pub fn draw_commands(&self) -> Vec<DrawCmd> {
        build_frame(&self.snapshot(), &self.stars, self.settings.effective_glow())
    }
}
