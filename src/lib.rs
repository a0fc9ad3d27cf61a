//! Umbrella Drop - a reaction-timing tap game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (drop timing, catch detection, timers)
//! - `game`: Session façade wiring the simulation to storage and haptics
//! - `profile` / `shop`: Persisted progress and the cosmetic shop
//! - `persistence`: Opaque key-value store collaborator
//! - `settings` / `preferences`: Theme, language, favorite and recent cities
//! - `tuning`: Data-driven game balance

pub mod autopilot;
pub mod birthdays;
pub mod game;
pub mod haptics;
pub mod persistence;
pub mod preferences;
pub mod profile;
pub mod settings;
pub mod shop;
pub mod sim;
pub mod tuning;
pub mod view;

pub use game::UmbrellaGame;
pub use profile::Profile;
pub use settings::{Language, Settings, Theme};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const SIM_STEP_MS: u64 = 16;

    /// Default playfield height (logical pixels)
    pub const FIELD_HEIGHT: f32 = 800.0;
    /// Drop falls to `height - DROP_TARGET_OFFSET`
    pub const DROP_TARGET_OFFSET: f32 = 180.0;
    /// Umbrella band is the open interval (height - TOP, height - BOTTOM)
    pub const UMBRELLA_BAND_TOP_OFFSET: f32 = 250.0;
    pub const UMBRELLA_BAND_BOTTOM_OFFSET: f32 = 150.0;
    /// Character contact point (also where a danger drop may break through)
    pub const CHARACTER_OFFSET: f32 = 200.0;

    /// Drop duration: base minus a step every `DURATION_SCORE_STEP` points
    pub const BASE_DROP_MS: u64 = 2500;
    pub const DROP_SPEEDUP_MS: u64 = 100;
    pub const DURATION_SCORE_STEP: u32 = 2;
    /// Floor for every drop; danger drops always use it
    pub const MIN_DROP_MS: u64 = 800;

    /// Umbrella stays open for max(MIN, BASE - score * PER_POINT)
    pub const UMBRELLA_BASE_MS: u64 = 650;
    pub const UMBRELLA_PER_POINT_MS: u64 = 8;
    pub const UMBRELLA_MIN_MS: u64 = 400;

    /// Pause between a catch and the next drop
    pub const NEXT_DROP_DELAY_MS: u64 = 1200;
    /// Delay before a drop resumes after the shop closes
    pub const SHOP_RESUME_DELAY_MS: u64 = 100;
    /// Insufficient-funds banner lifetime
    pub const FUNDS_BANNER_MS: u64 = 3000;

    /// Danger drops never appear below this score
    pub const DANGER_MIN_SCORE: u32 = 3;
    /// Chance that a danger drop breaks through an open umbrella
    pub const DANGER_BREAKTHROUGH_CHANCE: f64 = 0.2;

    /// Coin balance ceiling
    pub const MAX_COINS: u64 = 500_000;
}
