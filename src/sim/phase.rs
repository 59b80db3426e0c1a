//! Game phase state machine
//!
//! ```text
//! Menu --Start--> Playing <--TogglePause--> Paused
//!                    |                        |
//!                 (death)                 QuitToMenu --> Menu
//!                    v
//!                 GameOver --Start/Restart--> Playing
//!                    |
//!                 QuitToMenu --> Menu
//! ```
//!
//! `transition` is a pure lookup; `apply` performs the state changes. The
//! death transition is internal and goes through `enter_game_over`.

use super::state::{GameEvent, GamePhase, GameState};
use super::tick::wave_for_score;

/// Discrete player commands that can change the phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Restart,
    TogglePause,
    QuitToMenu,
}

/// What a legal command does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Reset the session and start playing
    NewRun,
    Pause,
    Resume,
    ToMenu,
}

/// Look up the transition for a command in a phase, `None` if illegal
pub fn transition(phase: GamePhase, command: Command) -> Option<Transition> {
    use GamePhase::*;

    match (command, phase) {
        (Command::Start, Menu | GameOver) => Some(Transition::NewRun),
        (Command::Restart, Playing | Paused | GameOver) => Some(Transition::NewRun),
        (Command::TogglePause, Playing) => Some(Transition::Pause),
        (Command::TogglePause, Paused) => Some(Transition::Resume),
        (Command::QuitToMenu, Playing | Paused | GameOver) => Some(Transition::ToMenu),
        _ => None,
    }
}

/// Apply a transition. `stored_high_score` is the value just read from storage
/// and is only used when a new run starts.
pub fn apply(state: &mut GameState, transition: Transition, stored_high_score: u64) {
    match transition {
        Transition::NewRun => {
            state.reset(stored_high_score);
            state.phase = GamePhase::Playing;
            log::info!("New run started (high score {})", stored_high_score);
        }
        Transition::Pause => state.phase = GamePhase::Paused,
        Transition::Resume => state.phase = GamePhase::Playing,
        Transition::ToMenu => state.phase = GamePhase::Menu,
    }
}

/// Playing -> GameOver. Clamps health, updates the in-memory high score and
/// raises `GameEvent::GameOver` so the host can persist it.
pub fn enter_game_over(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.player.health = 0;
    state.phase = GamePhase::GameOver;
    // Kills earlier in the same frame may have crossed a wave boundary
    state.wave = wave_for_score(state.score);

    let new_high_score = state.score > state.high_score;
    if new_high_score {
        state.high_score = state.score;
    }

    log::info!(
        "Game over: score {} wave {}{}",
        state.score,
        state.wave,
        if new_high_score { " (new high score)" } else { "" }
    );
    state.events.push(GameEvent::GameOver {
        score: state.score,
        wave: state.wave,
        new_high_score,
    });
}
