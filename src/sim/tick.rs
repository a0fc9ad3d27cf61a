//! Fixed timestep simulation tick
//!
//! Core loop that advances the falling drop, fires due timers and resolves
//! catches and misses. Inputs that arrive between ticks (start, tap, shop)
//! are plain functions on the same state.

use rand::Rng;

use super::difficulty::{duration_for, select_drop_type, umbrella_open_ms};
use super::state::{DropKind, GameEvent, GameOverCause, GameState, Raindrop, SessionPhase, Umbrella};
use super::timers::TimerKind;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Screen tapped (open umbrella / leave game-over screen)
    pub tap: bool,
}

/// Advance the game state by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u64) {
    if input.tap {
        handle_tap(state);
    }

    state.now_ms += dt_ms;

    while let Some(timer) = state.timers.pop_due(state.now_ms) {
        fire_timer(state, timer.kind);
    }

    advance_drop(state, dt_ms);
}

fn fire_timer(state: &mut GameState, kind: TimerKind) {
    match kind {
        TimerKind::UmbrellaClose => {
            state.umbrella.open = false;
            state.umbrella.can_toggle = true;
            log::debug!("Umbrella closed");
            state.emit(GameEvent::UmbrellaClosed);
        }
        TimerKind::NextDrop { score } => {
            if state.is_running() {
                start_drop(state, score);
            }
        }
        TimerKind::ShopResume => {
            if state.is_running() && !state.shop_open && !state.drop.falling {
                log::debug!("Resuming after shop at score {}", state.score);
                let score = state.score;
                start_drop(state, score);
            }
        }
        TimerKind::DismissFundsBanner => {
            if state.insufficient_funds {
                state.insufficient_funds = false;
                state.emit(GameEvent::FundsBannerHidden);
            }
        }
    }
}

/// Start button: leave the start screen and drop the first drop
pub fn start_game(state: &mut GameState) {
    if state.phase != SessionPhase::NotStarted {
        log::debug!("start_game ignored in phase {:?}", state.phase);
        return;
    }
    state.phase = SessionPhase::Running;
    state.score = 0;
    state.drop = Raindrop::default();
    state.umbrella = Umbrella::default();
    log::info!("Game started (seed {})", state.seed);
    start_drop(state, 0);
}

/// Roll a kind for `score` and start a drop. No-op while a drop is falling,
/// the shop is open, or the session is not running.
pub fn start_drop(state: &mut GameState, score: u32) {
    if !can_start_drop(state) {
        return;
    }
    let kind = select_drop_type(score, &mut state.rng);
    spawn_drop(state, kind, score);
}

/// Start a drop of a known kind (same guards as [`start_drop`])
pub fn spawn_drop(state: &mut GameState, kind: DropKind, score: u32) {
    if !can_start_drop(state) {
        return;
    }
    let duration_ms = duration_for(kind, score);
    state.umbrella.used_for_current_drop = false;
    state.drop = Raindrop {
        kind,
        position: 0.0,
        elapsed_ms: 0,
        duration_ms,
        falling: true,
    };
    log::debug!(
        "Drop started: {} over {}ms at score {}",
        kind.as_str(),
        duration_ms,
        score
    );
    state.emit(GameEvent::DropStarted { kind, duration_ms });
}

fn can_start_drop(state: &GameState) -> bool {
    if !state.is_running() || state.shop_open {
        return false;
    }
    if state.drop.falling {
        log::debug!("start_drop blocked: drop already falling");
        return false;
    }
    true
}

/// Tap on the play area
pub fn handle_tap(state: &mut GameState) {
    match state.phase {
        SessionPhase::GameOver => restart_game(state),
        SessionPhase::NotStarted => {}
        SessionPhase::Running => {
            if state.shop_open {
                return;
            }
            let umbrella = &mut state.umbrella;
            if umbrella.open || !umbrella.can_toggle || umbrella.used_for_current_drop {
                return;
            }
            umbrella.open = true;
            umbrella.can_toggle = false;
            umbrella.used_for_current_drop = true;

            let close_in_ms = umbrella_open_ms(state.score);
            state
                .timers
                .cancel_where(|k| *k == TimerKind::UmbrellaClose);
            state
                .timers
                .schedule(state.now_ms, close_in_ms, TimerKind::UmbrellaClose);
            log::debug!("Umbrella opened for {}ms", close_in_ms);
            state.emit(GameEvent::UmbrellaOpened { close_in_ms });
        }
    }
}

/// Back to the start screen: cancel timers, halt the drop, zero the score
pub fn restart_game(state: &mut GameState) {
    state.timers.cancel_all();
    state.drop = Raindrop::default();
    state.umbrella = Umbrella::default();
    state.score = 0;
    state.insufficient_funds = false;
    state.phase = SessionPhase::NotStarted;
    log::info!("Game restarted");
    state.emit(GameEvent::Restarted);
}

/// Enter the shop: freeze the drop and cancel the chained next drop
pub fn open_shop(state: &mut GameState) {
    if state.shop_open {
        return;
    }
    state.shop_open = true;
    state.drop.falling = false;
    state
        .timers
        .cancel_where(|k| matches!(k, TimerKind::NextDrop { .. } | TimerKind::ShopResume));
    log::debug!("Shop opened, drops paused");
    state.emit(GameEvent::ShopOpened);
}

/// Leave the shop: close its modals and resume with a fresh drop
pub fn close_shop(state: &mut GameState) {
    if !state.shop_open {
        return;
    }
    state.shop_open = false;
    state.reset_confirm = false;
    hide_funds_banner(state);
    state.emit(GameEvent::ShopClosed);
    if state.is_running() {
        state
            .timers
            .schedule(state.now_ms, SHOP_RESUME_DELAY_MS, TimerKind::ShopResume);
    }
}

/// Show the insufficient-funds banner; a repeat re-arms the dismiss timer
pub fn show_funds_banner(state: &mut GameState) {
    state.insufficient_funds = true;
    state
        .timers
        .cancel_where(|k| *k == TimerKind::DismissFundsBanner);
    state
        .timers
        .schedule(state.now_ms, FUNDS_BANNER_MS, TimerKind::DismissFundsBanner);
    state.emit(GameEvent::FundsBannerShown);
}

pub fn hide_funds_banner(state: &mut GameState) {
    state
        .timers
        .cancel_where(|k| *k == TimerKind::DismissFundsBanner);
    if state.insufficient_funds {
        state.insufficient_funds = false;
        state.emit(GameEvent::FundsBannerHidden);
    }
}

fn advance_drop(state: &mut GameState, dt_ms: u64) {
    if !state.drop.falling || !state.is_running() || state.shop_open {
        return;
    }

    let drop = &mut state.drop;
    drop.elapsed_ms = (drop.elapsed_ms + dt_ms).min(drop.duration_ms);
    drop.position = state
        .field
        .position_at(state.easing, drop.elapsed_ms, drop.duration_ms);

    observe_position(state);

    // Animation ran to completion without anything resolving the drop
    if state.drop.falling && state.drop.elapsed_ms >= state.drop.duration_ms {
        log::debug!("Drop reached bottom without being caught");
        game_over(state, GameOverCause::Missed);
    }
}

/// Resolve the drop against the umbrella and the character
fn observe_position(state: &mut GameState) {
    let pos = state.drop.position;
    let kind = state.drop.kind;

    if state.field.in_umbrella_band(pos) {
        if state.umbrella.open {
            if kind == DropKind::Danger && breaks_through(state) {
                log::debug!("Danger drop broke through the umbrella at {:.1}", pos);
                game_over(state, GameOverCause::Breakthrough);
            } else {
                catch_drop(state);
            }
            return;
        }
        if kind == DropKind::Danger {
            log::debug!("Danger drop passed without umbrella at {:.1}", pos);
            game_over(state, GameOverCause::DangerUncovered);
            return;
        }
    }

    if state.field.past_character(pos) && !state.umbrella.open {
        log::debug!("Drop hit character, umbrella closed at {:.1}", pos);
        game_over(state, GameOverCause::HitCharacter);
    }
}

/// One trial per danger drop, taken when it meets the open umbrella
fn breaks_through(state: &mut GameState) -> bool {
    let roll: f64 = state.rng.random();
    roll < state.breakthrough_chance
}

fn catch_drop(state: &mut GameState) {
    let kind = state.drop.kind;
    let points = kind.points();
    state.drop.falling = false;
    state.score = state.score.saturating_add(points);
    let score = state.score;
    log::debug!("Caught {} drop (+{}), score {}", kind.as_str(), points, score);
    state
        .timers
        .schedule(state.now_ms, NEXT_DROP_DELAY_MS, TimerKind::NextDrop { score });
    state.emit(GameEvent::Caught {
        kind,
        points,
        score,
    });
}

fn game_over(state: &mut GameState, cause: GameOverCause) {
    state.drop.falling = false;
    state.phase = SessionPhase::GameOver;
    log::info!("Game over ({:?}) with score {}", cause, state.score);
    state.emit(GameEvent::GameOver {
        cause,
        score: state.score,
    });
}
