//! Read-only snapshot for the presentation layer
//!
//! Built once per render tick. The renderer only ever reads it; nothing in
//! the game reads rendering state back.

use serde::Serialize;

use crate::profile::Profile;
use crate::sim::{DropKind, GameState, SessionPhase};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub phase: SessionPhase,
    pub drop_position: f32,
    pub drop_kind: DropKind,
    pub drop_falling: bool,
    pub umbrella_open: bool,
    pub score: u32,
    pub high_score: u32,
    pub total_coins: u64,
    pub shop_open: bool,
    pub insufficient_funds: bool,
    pub reset_confirm: bool,
    pub character: String,
    pub umbrella: String,
}

impl Frame {
    pub fn capture(state: &GameState, profile: &Profile) -> Self {
        Self {
            phase: state.phase,
            drop_position: state.drop.position,
            drop_kind: state.drop.kind,
            drop_falling: state.drop.falling,
            umbrella_open: state.umbrella.open,
            score: state.score,
            high_score: profile.high_score,
            total_coins: profile.total_coins,
            shop_open: state.shop_open,
            insufficient_funds: state.insufficient_funds,
            reset_confirm: state.reset_confirm,
            character: profile.inventory.selected_character.clone(),
            umbrella: profile.inventory.selected_umbrella.clone(),
        }
    }

    /// One-line text rendering for logs and the headless runner
    pub fn status_line(&self) -> String {
        let phase = match self.phase {
            SessionPhase::NotStarted => "ready",
            SessionPhase::Running => "playing",
            SessionPhase::GameOver => "game over",
        };
        format!(
            "{} {} | score {} | best {} | coins {} | drop {} @ {:.0}{}",
            self.character,
            if self.umbrella_open { self.umbrella.as_str() } else { "-" },
            self.score,
            self.high_score,
            self.total_coins,
            self.drop_kind.as_str(),
            self.drop_position,
            if self.shop_open {
                " [shop]".to_string()
            } else {
                format!(" [{}]", phase)
            }
        )
    }
}
