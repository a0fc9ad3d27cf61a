//! Storage keys. Everything except language and haptics matches what shipped
//! builds already wrote.

pub const HIGH_SCORE: &str = "@umbrella_high_score";
pub const TOTAL_COINS: &str = "@umbrella_total_coins";
pub const SELECTED_CHARACTER: &str = "@umbrella_selected_character";
pub const SELECTED_UMBRELLA: &str = "@umbrella_selected_umbrella";
pub const OWNED_CHARACTERS: &str = "@umbrella_owned_characters";
pub const OWNED_UMBRELLAS: &str = "@umbrella_owned_umbrellas";

/// Everything a full progress reset removes
pub const GAME_KEYS: [&str; 6] = [
    HIGH_SCORE,
    TOTAL_COINS,
    SELECTED_CHARACTER,
    SELECTED_UMBRELLA,
    OWNED_CHARACTERS,
    OWNED_UMBRELLAS,
];

/// App preferences, one plain string each
pub const THEME: &str = "APP_THEME";
pub const LANGUAGE: &str = "APP_LANGUAGE";
pub const HAPTICS: &str = "APP_HAPTICS";

/// JSON string lists
pub const FAVORITE_CITIES: &str = "FAVORITE_CITIES";
pub const RECENT_CITIES: &str = "RECENT_CITIES";
pub const BIRTHDAYS: &str = "BIRTHDAYS";
