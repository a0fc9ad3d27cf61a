//! Idle/demo mode - a bot that plays the game
//!
//! Taps one step before the drop enters the umbrella band. `skill` is the
//! chance it bothers for a given drop, so runs end eventually.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{GameState, TickInput};

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    skill: f64,
    /// Start time of the drop the current decision belongs to
    drop_started_at: Option<u64>,
    will_catch: bool,
}

impl Autopilot {
    pub fn new(seed: u64, skill: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            skill: skill.clamp(0.0, 1.0),
            drop_started_at: None,
            will_catch: false,
        }
    }

    /// Input for the next tick of `step_ms`
    pub fn decide(&mut self, state: &GameState, step_ms: u64) -> TickInput {
        let drop = &state.drop;
        if !state.is_running() || state.shop_open || !drop.falling {
            return TickInput::default();
        }

        let started_at = state.now_ms.saturating_sub(drop.elapsed_ms);
        if self.drop_started_at != Some(started_at) {
            self.drop_started_at = Some(started_at);
            let roll: f64 = self.rng.random();
            self.will_catch = roll < self.skill;
        }

        let umbrella = &state.umbrella;
        let tappable = umbrella.can_toggle && !umbrella.open && !umbrella.used_for_current_drop;
        if !self.will_catch || !tappable {
            return TickInput::default();
        }

        let next = state
            .field
            .position_at(state.easing, drop.elapsed_ms + step_ms, drop.duration_ms);
        TickInput {
            tap: state.field.in_umbrella_band(next),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_STEP_MS;
    use crate::sim::{self, SessionPhase};
    use crate::tuning::Tuning;

    fn play(skill: f64, max_ticks: usize) -> GameState {
        let tuning = Tuning {
            danger_breakthrough_chance: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(5, &tuning);
        let mut bot = Autopilot::new(6, skill);
        sim::start_game(&mut state);
        for _ in 0..max_ticks {
            if state.is_game_over() {
                break;
            }
            let input = bot.decide(&state, SIM_STEP_MS);
            sim::tick(&mut state, &input, SIM_STEP_MS);
        }
        state
    }

    #[test]
    fn test_perfect_bot_never_misses() {
        // 32 seconds of play: at least one catch per 3.7s drop cycle
        let state = play(1.0, 2_000);
        assert_eq!(state.phase, SessionPhase::Running);
        assert!(state.score >= 8);
    }

    #[test]
    fn test_hopeless_bot_loses_first_drop() {
        let state = play(0.0, 2_000);
        assert_eq!(state.phase, SessionPhase::GameOver);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_idle_outside_running() {
        let state = GameState::new(5, &Tuning::default());
        let mut bot = Autopilot::new(1, 1.0);
        assert!(!bot.decide(&state, SIM_STEP_MS).tap);
    }
}
