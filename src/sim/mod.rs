//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Timers owned by the state, never by the platform
//! - No storage, haptics or rendering dependencies

pub mod difficulty;
pub mod field;
pub mod state;
pub mod tick;
pub mod timers;

pub use difficulty::{drop_duration, duration_for, select_drop_type, umbrella_open_ms};
pub use field::{Easing, Field};
pub use state::{
    DropKind, GameEvent, GameOverCause, GameState, Raindrop, SessionPhase, Umbrella,
};
pub use tick::{
    TickInput, close_shop, handle_tap, hide_funds_banner, open_shop, restart_game,
    show_funds_banner, spawn_drop, start_drop, start_game, tick,
};
pub use timers::{Scheduler, Timer, TimerKind};
