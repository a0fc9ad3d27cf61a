//! Playfield geometry and the drop position curve
//!
//! Positions grow downward from 0 (top of the field). All collision lines are
//! offsets from the bottom of the field.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Position curve over normalized time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Cubic bezier (0.42, 0, 0.58, 1) approximation - slow start, slow finish
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map progress `t` in [0, 1] to eased progress in [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

/// Collision lines derived from the field height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub height: f32,
    /// Distance above the bottom where a drop's fall ends
    pub target_offset: f32,
}

impl Field {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            target_offset: DROP_TARGET_OFFSET,
        }
    }

    pub fn with_target_offset(self, target_offset: f32) -> Self {
        Self {
            target_offset,
            ..self
        }
    }

    /// Where an uncaught drop comes to rest
    pub fn target(&self) -> f32 {
        self.height - self.target_offset
    }

    /// Open interval in which an open umbrella intercepts the drop
    pub fn in_umbrella_band(&self, pos: f32) -> bool {
        let top = self.height - UMBRELLA_BAND_TOP_OFFSET;
        let bottom = self.height - UMBRELLA_BAND_BOTTOM_OFFSET;
        pos > top && pos < bottom
    }

    /// Drop has reached the character
    pub fn past_character(&self, pos: f32) -> bool {
        pos > self.height - CHARACTER_OFFSET
    }

    /// Position after `elapsed_ms` of a drop lasting `duration_ms`
    pub fn position_at(&self, easing: Easing, elapsed_ms: u64, duration_ms: u64) -> f32 {
        if duration_ms == 0 {
            return self.target();
        }
        let t = elapsed_ms as f32 / duration_ms as f32;
        self.target() * easing.apply(t)
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(FIELD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
            assert!((easing.apply(0.5) - 0.5).abs() < 1e-6);
        }
        assert_eq!(Easing::EaseInOut.apply(2.0), 1.0);
    }

    #[test]
    fn test_ease_in_out_is_monotonic() {
        let mut last = 0.0;
        for i in 0..=100 {
            let v = Easing::EaseInOut.apply(i as f32 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_field_lines() {
        let field = Field::new(800.0);
        assert_eq!(field.target(), 620.0);
        // Band is exclusive at both ends
        assert!(!field.in_umbrella_band(550.0));
        assert!(field.in_umbrella_band(551.0));
        assert!(field.in_umbrella_band(649.0));
        assert!(!field.in_umbrella_band(650.0));
        assert!(!field.past_character(600.0));
        assert!(field.past_character(600.5));
        // Resting point sits inside the band, below the character line
        assert!(field.in_umbrella_band(field.target()));
        assert!(field.past_character(field.target()));

        let short = field.with_target_offset(300.0);
        assert_eq!(short.target(), 500.0);
        assert!(!short.in_umbrella_band(short.target()));
        assert!(!short.past_character(short.target()));
    }

    #[test]
    fn test_position_at() {
        let field = Field::new(800.0);
        assert_eq!(field.position_at(Easing::Linear, 0, 1000), 0.0);
        assert_eq!(field.position_at(Easing::Linear, 500, 1000), 310.0);
        assert_eq!(field.position_at(Easing::Linear, 1500, 1000), 620.0);
        assert_eq!(field.position_at(Easing::Linear, 0, 0), 620.0);
    }
}
