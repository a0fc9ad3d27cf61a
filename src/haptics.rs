//! Haptic feedback
//!
//! Fire-and-forget vibration cues. The device layer sits behind
//! [`HapticsBackend`]; a backend failure is logged and never reaches gameplay.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

/// Feedback categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticFeedback {
    /// Purchase done, progress reset
    Success,
    /// Umbrella opened, item selected
    LightImpact,
    /// Drop caught
    MediumImpact,
    /// Danger failure, not enough coins
    Error,
}

#[derive(Debug, Error)]
pub enum HapticsError {
    #[error("Haptics not supported on this device")]
    Unsupported,
}

/// Device vibration API
pub trait HapticsBackend {
    fn trigger(&mut self, feedback: HapticFeedback) -> Result<(), HapticsError>;
}

/// Writes each cue to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogBackend;

impl HapticsBackend for LogBackend {
    fn trigger(&mut self, feedback: HapticFeedback) -> Result<(), HapticsError> {
        log::debug!("Haptic: {:?}", feedback);
        Ok(())
    }
}

/// Keeps every cue; clones share the same list so a test can hand one to
/// the game and inspect the other
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    played: Rc<RefCell<Vec<HapticFeedback>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<HapticFeedback> {
        self.played.borrow().clone()
    }
}

impl HapticsBackend for RecordingBackend {
    fn trigger(&mut self, feedback: HapticFeedback) -> Result<(), HapticsError> {
        self.played.borrow_mut().push(feedback);
        Ok(())
    }
}

/// Haptics manager for the game
pub struct Haptics {
    backend: Box<dyn HapticsBackend>,
    enabled: bool,
}

impl Default for Haptics {
    fn default() -> Self {
        Self::new(Box::new(LogBackend))
    }
}

impl std::fmt::Debug for Haptics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Haptics")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl Haptics {
    pub fn new(backend: Box<dyn HapticsBackend>) -> Self {
        Self {
            backend,
            enabled: true,
        }
    }

    /// Turn all feedback on/off (user setting)
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Play a cue; errors are logged and swallowed
    pub fn play(&mut self, feedback: HapticFeedback) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.backend.trigger(feedback) {
            log::warn!("Haptic feedback error: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenBackend;

    impl HapticsBackend for BrokenBackend {
        fn trigger(&mut self, _feedback: HapticFeedback) -> Result<(), HapticsError> {
            Err(HapticsError::Unsupported)
        }
    }

    #[test]
    fn test_records_cues() {
        let recorder = RecordingBackend::new();
        let mut haptics = Haptics::new(Box::new(recorder.clone()));
        haptics.play(HapticFeedback::LightImpact);
        haptics.play(HapticFeedback::MediumImpact);
        assert_eq!(
            recorder.played(),
            vec![HapticFeedback::LightImpact, HapticFeedback::MediumImpact]
        );
    }

    #[test]
    fn test_disabled_plays_nothing() {
        let recorder = RecordingBackend::new();
        let mut haptics = Haptics::new(Box::new(recorder.clone()));
        haptics.set_enabled(false);
        haptics.play(HapticFeedback::Error);
        assert!(recorder.played().is_empty());
    }

    #[test]
    fn test_backend_failure_is_swallowed() {
        let mut haptics = Haptics::new(Box::new(BrokenBackend));
        haptics.play(HapticFeedback::Success);
        assert!(haptics.is_enabled());
    }
}
