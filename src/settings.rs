//! App settings
//!
//! Each setting is a plain string under its own key. Passed to the game
//! explicitly; nothing reads it from global state.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::persistence::{self, KeyValueStore, StoreError, keys};

/// First and last light hour of the auto theme (inclusive)
pub const DAY_START_HOUR: u32 = 7;
pub const DAY_END_HOUR: u32 = 19;

#[derive(Debug, Error)]
#[error("Unknown {what} {value:?}")]
pub struct UnknownSetting {
    what: &'static str,
    value: String,
}

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Turkish,
    English,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Turkish => "tr",
            Language::English => "en",
        }
    }
}

impl FromStr for Language {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tr" | "turkish" | "türkçe" => Ok(Language::Turkish),
            "en" | "english" => Ok(Language::English),
            _ => Err(UnknownSetting {
                what: "language",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    /// Dark when the system is dark or it is night
    #[default]
    Auto,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "auto",
        }
    }

    /// Resolve the theme for the current system scheme and local hour (0-23)
    pub fn is_dark(&self, system_dark: bool, hour: u32) -> bool {
        match self {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::Auto => system_dark || !(DAY_START_HOUR..=DAY_END_HOUR).contains(&hour),
        }
    }
}

impl FromStr for Theme {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "auto" | "system" => Ok(Theme::Auto),
            _ => Err(UnknownSetting {
                what: "theme",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub language: Language,
    pub theme: Theme,
    /// Vibration cues in the game
    pub haptics: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::Turkish,
            theme: Theme::Auto,
            haptics: true,
        }
    }
}

impl Settings {
    /// Load settings; a missing or unreadable key keeps its default
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut settings = Self::default();
        if let Some(theme) = load_key(store, keys::THEME) {
            settings.theme = theme;
        }
        if let Some(language) = load_key(store, keys::LANGUAGE) {
            settings.language = language;
        }
        if let Some(haptics) = load_key(store, keys::HAPTICS) {
            settings.haptics = haptics;
        }
        log::info!(
            "Settings: language {}, theme {}, haptics {}",
            settings.language,
            settings.theme,
            settings.haptics
        );
        settings
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(keys::THEME, self.theme.as_str())?;
        store.set(keys::LANGUAGE, self.language.as_str())?;
        store.set(keys::HAPTICS, if self.haptics { "true" } else { "false" })?;
        log::info!("Settings saved");
        Ok(())
    }
}

fn load_key<T: FromStr>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    persistence::get_parsed(store, key).unwrap_or_else(|e| {
        log::warn!("Ignoring stored setting: {}", e);
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_round_trip_through_store() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            language: Language::English,
            theme: Theme::Dark,
            haptics: false,
        };
        settings.save(&mut store).unwrap();
        assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("dark"));
        assert_eq!(store.get(keys::LANGUAGE).unwrap().as_deref(), Some("en"));
        assert_eq!(store.get(keys::HAPTICS).unwrap().as_deref(), Some("false"));
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_reads_theme_written_by_older_builds() {
        let mut store = MemoryStore::new();
        store.set(keys::THEME, "light").unwrap();
        let settings = Settings::load(&store);
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.language, Language::Turkish);
        assert!(settings.haptics);
    }

    #[test]
    fn test_bad_value_keeps_other_settings() {
        let mut store = MemoryStore::new();
        store.set(keys::THEME, "purple").unwrap();
        store.set(keys::LANGUAGE, "en").unwrap();
        store.set(keys::HAPTICS, "sometimes").unwrap();
        let settings = Settings::load(&store);
        assert_eq!(settings.theme, Theme::Auto);
        assert_eq!(settings.language, Language::English);
        assert!(settings.haptics);
    }

    #[test]
    fn test_offline_store_gives_defaults() {
        let mut store = MemoryStore::new();
        store.set_offline(true);
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::English);
        assert!("de".parse::<Language>().is_err());
        assert_eq!("Auto".parse::<Theme>().unwrap(), Theme::Auto);
        assert_eq!("system".parse::<Theme>().unwrap(), Theme::Auto);
        assert_eq!(
            "neon".parse::<Theme>().unwrap_err().to_string(),
            r#"Unknown theme "neon""#
        );
    }

    #[test]
    fn test_auto_theme_follows_clock_and_system() {
        assert!(Theme::Auto.is_dark(false, 6));
        assert!(!Theme::Auto.is_dark(false, 7));
        assert!(!Theme::Auto.is_dark(false, 12));
        assert!(!Theme::Auto.is_dark(false, 19));
        assert!(Theme::Auto.is_dark(false, 20));
        assert!(Theme::Auto.is_dark(true, 12));
        assert!(!Theme::Light.is_dark(true, 23));
        assert!(Theme::Dark.is_dark(false, 12));
    }
}
