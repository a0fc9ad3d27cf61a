//! Game state and core simulation types
//!
//! One owned struct holds everything the drop loop reads or writes. Timer
//! callbacks and input handlers all receive it by `&mut`, so every check sees
//! the current value.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::field::{Easing, Field};
use super::timers::Scheduler;
use crate::tuning::Tuning;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Start screen, waiting for the start button
    #[default]
    NotStarted,
    /// Drops are falling
    Running,
    /// Run ended; a tap goes back to the start screen
    GameOver,
}

/// Drop types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DropKind {
    #[default]
    Normal,
    Bonus,
    /// Fast, worth the most, and may break through the umbrella
    Danger,
}

impl DropKind {
    /// Score and coins awarded for a catch
    pub fn points(self) -> u32 {
        match self {
            DropKind::Normal => 1,
            DropKind::Bonus => 3,
            DropKind::Danger => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DropKind::Normal => "normal",
            DropKind::Bonus => "bonus",
            DropKind::Danger => "danger",
        }
    }
}

/// The falling drop
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Raindrop {
    pub kind: DropKind,
    /// Vertical offset from the top of the field
    pub position: f32,
    pub elapsed_ms: u64,
    pub duration_ms: u64,
    /// In flight; cleared on catch, miss and game over
    pub falling: bool,
}

/// The player's one defensive action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Umbrella {
    pub open: bool,
    /// False while the auto-close timer is pending
    pub can_toggle: bool,
    /// Consumed by the first open during a drop's flight
    pub used_for_current_drop: bool,
}

impl Default for Umbrella {
    fn default() -> Self {
        Self {
            open: false,
            can_toggle: true,
            used_for_current_drop: false,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Danger drop reached the umbrella band with the umbrella closed
    DangerUncovered,
    /// Danger drop broke through the open umbrella
    Breakthrough,
    /// Drop reached the character with the umbrella closed
    HitCharacter,
    /// Drop finished its fall without being resolved
    Missed,
}

/// Things that happened during a tick or an input, for the game layer to
/// apply to progress, storage and haptics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    DropStarted { kind: DropKind, duration_ms: u64 },
    UmbrellaOpened { close_in_ms: u64 },
    UmbrellaClosed,
    Caught { kind: DropKind, points: u32, score: u32 },
    GameOver { cause: GameOverCause, score: u32 },
    Restarted,
    ShopOpened,
    ShopClosed,
    FundsBannerShown,
    FundsBannerHidden,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: SessionPhase,
    pub score: u32,
    pub drop: Raindrop,
    pub umbrella: Umbrella,
    /// Shop screen is up; drops are paused
    pub shop_open: bool,
    /// Insufficient-funds banner is visible
    pub insufficient_funds: bool,
    /// Full-reset confirmation is visible
    pub reset_confirm: bool,
    /// Simulation clock
    pub now_ms: u64,
    pub timers: Scheduler,
    pub field: Field,
    pub easing: Easing,
    pub breakthrough_chance: f64,
    /// Pending events, drained by the owner after each call
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session state with the given seed
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::NotStarted,
            score: 0,
            drop: Raindrop::default(),
            umbrella: Umbrella::default(),
            shop_open: false,
            insufficient_funds: false,
            reset_confirm: false,
            now_ms: 0,
            timers: Scheduler::new(),
            field: Field::new(tuning.field_height)
                .with_target_offset(tuning.drop_target_offset),
            easing: tuning.easing,
            breakthrough_chance: tuning.danger_breakthrough_chance,
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points() {
        assert_eq!(DropKind::Normal.points(), 1);
        assert_eq!(DropKind::Bonus.points(), 3);
        assert_eq!(DropKind::Danger.points(), 5);
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(42, &Tuning::default());
        assert_eq!(state.phase, SessionPhase::NotStarted);
        assert_eq!(state.score, 0);
        assert!(!state.drop.falling);
        assert_eq!(state.umbrella, Umbrella::default());
        assert!(state.umbrella.can_toggle);
        assert!(state.timers.is_empty());
        assert_eq!(state.field.height, crate::consts::FIELD_HEIGHT);
    }
}
