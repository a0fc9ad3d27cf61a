//! Data-driven game balance
//!
//! Defaults reproduce the shipped game. A tuning file can override them for
//! play-testing (`--tuning` on the binary).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::StoreError;
use crate::sim::Easing;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield height; every collision line is measured up from the bottom
    pub field_height: f32,
    /// Where a drop's fall ends, measured up from the bottom
    pub drop_target_offset: f32,
    /// Position curve of a falling drop
    pub easing: Easing,
    /// Fixed simulation step in milliseconds
    pub step_ms: u64,
    /// Probability a danger drop breaks an open umbrella
    pub danger_breakthrough_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_height: FIELD_HEIGHT,
            drop_target_offset: DROP_TARGET_OFFSET,
            easing: Easing::EaseInOut,
            step_ms: SIM_STEP_MS,
            danger_breakthrough_chance: DANGER_BREAKTHROUGH_CHANCE,
        }
    }
}

impl Tuning {
    /// Read a JSON tuning file. Missing fields fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)?;
        let mut tuning: Tuning = serde_json::from_str(&json)?;
        tuning.sanitize();
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Clamp values the simulation cannot run with
    pub fn sanitize(&mut self) {
        if !(self.field_height.is_finite() && self.field_height > UMBRELLA_BAND_TOP_OFFSET) {
            log::warn!(
                "Field height {} too small, using {}",
                self.field_height,
                FIELD_HEIGHT
            );
            self.field_height = FIELD_HEIGHT;
        }
        let offset = self.drop_target_offset;
        if !(offset.is_finite() && offset >= 0.0 && offset < self.field_height) {
            log::warn!(
                "Drop target offset {} off the field, using {}",
                offset,
                DROP_TARGET_OFFSET
            );
            self.drop_target_offset = DROP_TARGET_OFFSET;
        }
        self.step_ms = self.step_ms.clamp(1, 100);
        self.danger_breakthrough_chance = if self.danger_breakthrough_chance.is_finite() {
            self.danger_breakthrough_chance.clamp(0.0, 1.0)
        } else {
            DANGER_BREAKTHROUGH_CHANCE
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"field_height": 1000.0}"#).unwrap();
        assert_eq!(tuning.field_height, 1000.0);
        assert_eq!(tuning.step_ms, SIM_STEP_MS);
        assert_eq!(tuning.easing, Easing::EaseInOut);
    }

    #[test]
    fn test_sanitize() {
        let mut tuning = Tuning {
            field_height: 10.0,
            drop_target_offset: -5.0,
            easing: Easing::Linear,
            step_ms: 0,
            danger_breakthrough_chance: 3.0,
        };
        tuning.sanitize();
        assert_eq!(tuning.field_height, FIELD_HEIGHT);
        assert_eq!(tuning.drop_target_offset, DROP_TARGET_OFFSET);
        assert_eq!(tuning.step_ms, 1);
        assert_eq!(tuning.danger_breakthrough_chance, 1.0);
    }
}
