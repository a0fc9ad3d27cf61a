//! Game session façade
//!
//! Owns the simulation state together with its collaborators (progress,
//! storage, haptics) and applies simulation events to them. Every storage
//! write is best-effort: failures are logged and play continues.

use crate::haptics::{HapticFeedback, Haptics};
use crate::persistence::{KeyValueStore, StoreError};
use crate::profile::Profile;
use crate::settings::Settings;
use crate::shop::{self, ItemKind, PurchaseOutcome};
use crate::sim::{self, GameEvent, GameOverCause, GameState, TickInput};
use crate::tuning::Tuning;
use crate::view::Frame;

pub struct UmbrellaGame {
    state: GameState,
    profile: Profile,
    settings: Settings,
    tuning: Tuning,
    store: Box<dyn KeyValueStore>,
    haptics: Haptics,
    /// Leftover time below one simulation step
    accumulator_ms: u64,
}

impl UmbrellaGame {
    /// Load progress and settings from `store` and set up a fresh session
    pub fn new(store: Box<dyn KeyValueStore>, haptics: Haptics, tuning: Tuning, seed: u64) -> Self {
        let profile = Profile::load(store.as_ref());
        let settings = Settings::load(store.as_ref());
        let mut haptics = haptics;
        haptics.set_enabled(settings.haptics);
        Self {
            state: GameState::new(seed, &tuning),
            profile,
            settings,
            tuning,
            store,
            haptics,
            accumulator_ms: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Snapshot for the renderer
    pub fn frame(&self) -> Frame {
        Frame::capture(&self.state, &self.profile)
    }

    // === Session ===

    pub fn start_game(&mut self) {
        sim::start_game(&mut self.state);
        self.apply_events();
    }

    pub fn handle_tap(&mut self) {
        sim::handle_tap(&mut self.state);
        self.apply_events();
    }

    pub fn restart_game(&mut self) {
        sim::restart_game(&mut self.state);
        self.apply_events();
    }

    /// One fixed simulation step
    pub fn tick(&mut self, input: &TickInput) {
        sim::tick(&mut self.state, input, self.tuning.step_ms);
        self.apply_events();
    }

    /// Advance by wall-clock time in fixed steps; returns the steps taken
    pub fn update(&mut self, elapsed_ms: u64) -> u32 {
        self.accumulator_ms += elapsed_ms;
        let step = self.tuning.step_ms;
        let mut steps = 0;
        while self.accumulator_ms >= step {
            self.tick(&TickInput::default());
            self.accumulator_ms -= step;
            steps += 1;
        }
        steps
    }

    /// Wipe high score, coins and shop data, then restart. Success feedback
    /// only plays once the store has forgotten them too.
    pub fn reset_all_progress(&mut self) {
        let result = self.profile.reset(self.store.as_mut());
        self.state.shop_open = false;
        self.state.reset_confirm = false;
        sim::restart_game(&mut self.state);
        match result {
            Ok(()) => {
                self.haptics.play(HapticFeedback::Success);
                log::info!("All progress reset");
            }
            Err(e) => log::warn!("Failed to reset progress: {}", e),
        }
        self.apply_events();
    }

    // === Shop ===

    pub fn open_shop(&mut self) {
        sim::open_shop(&mut self.state);
        self.apply_events();
    }

    pub fn close_shop(&mut self) {
        sim::close_shop(&mut self.state);
        self.apply_events();
    }

    /// Buy `item` for `price` coins
    pub fn purchase(&mut self, kind: ItemKind, item: &str, price: u64) -> PurchaseOutcome {
        let Profile {
            inventory,
            total_coins,
            ..
        } = &mut self.profile;
        let outcome = inventory.purchase(total_coins, kind, item, price);
        match outcome {
            PurchaseOutcome::Purchased { remaining } => {
                log::info!("Bought {} {} for {} ({} left)", kind.as_str(), item, price, remaining);
                best_effort("save coins", self.profile.save_coins(self.store.as_mut()));
                best_effort("save shop data", self.profile.save_inventory(self.store.as_mut()));
                self.haptics.play(HapticFeedback::Success);
            }
            PurchaseOutcome::InsufficientFunds { price, available } => {
                log::info!("Not enough coins: need {}, have {}", price, available);
                sim::show_funds_banner(&mut self.state);
                self.haptics.play(HapticFeedback::Error);
            }
            PurchaseOutcome::AlreadyOwned => {
                log::debug!("{} {} already owned", kind.as_str(), item);
            }
        }
        self.apply_events();
        outcome
    }

    /// Make an owned item active; false if it is not owned
    pub fn select(&mut self, kind: ItemKind, item: &str) -> bool {
        if !self.profile.inventory.select(kind, item) {
            log::warn!("Cannot select {} {}: not owned", kind.as_str(), item);
            return false;
        }
        log::info!("Selected {} {}", kind.as_str(), item);
        best_effort("save shop data", self.profile.save_inventory(self.store.as_mut()));
        self.haptics.play(HapticFeedback::LightImpact);
        true
    }

    /// Shop button: select if owned, otherwise buy at the catalog price
    pub fn shop_action(&mut self, kind: ItemKind, item: &str) -> Option<PurchaseOutcome> {
        if self.profile.inventory.owns(kind, item) {
            self.select(kind, item);
            return None;
        }
        match shop::price_of(kind, item) {
            Some(price) => Some(self.purchase(kind, item, price)),
            None => {
                log::warn!("{} {} is not in the catalog", kind.as_str(), item);
                None
            }
        }
    }

    pub fn dismiss_insufficient_funds(&mut self) {
        sim::hide_funds_banner(&mut self.state);
        self.apply_events();
    }

    /// Show the full-reset confirmation
    pub fn request_reset(&mut self) {
        self.state.reset_confirm = true;
    }

    pub fn cancel_reset(&mut self) {
        self.state.reset_confirm = false;
    }

    /// Confirmation accepted; ignored if it was never requested
    pub fn confirm_reset(&mut self) -> bool {
        if !self.state.reset_confirm {
            return false;
        }
        self.reset_all_progress();
        true
    }

    // === Settings ===

    pub fn update_settings(&mut self, settings: Settings) {
        self.haptics.set_enabled(settings.haptics);
        best_effort("save settings", settings.save(self.store.as_mut()));
        self.settings = settings;
    }

    /// Apply simulation events to progress, storage and haptics
    fn apply_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::UmbrellaOpened { .. } => {
                    self.haptics.play(HapticFeedback::LightImpact);
                }
                GameEvent::Caught { points, score, .. } => {
                    self.haptics.play(HapticFeedback::MediumImpact);
                    self.record_score(score);
                    self.profile.add_coins(u64::from(points));
                    best_effort("save coins", self.profile.save_coins(self.store.as_mut()));
                }
                GameEvent::GameOver { cause, score } => {
                    if matches!(
                        cause,
                        GameOverCause::DangerUncovered | GameOverCause::Breakthrough
                    ) {
                        self.haptics.play(HapticFeedback::Error);
                    }
                    self.record_score(score);
                }
                _ => {}
            }
        }
    }

    fn record_score(&mut self, score: u32) {
        if self.profile.record_score(score) {
            log::debug!("New high score {}", score);
            best_effort(
                "save high score",
                self.profile.save_high_score(self.store.as_mut()),
            );
        }
    }
}

impl std::fmt::Debug for UmbrellaGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UmbrellaGame")
            .field("state", &self.state)
            .field("profile", &self.profile)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

fn best_effort(what: &str, result: Result<(), StoreError>) {
    if let Err(e) = result {
        log::warn!("Failed to {}: {}", what, e);
    }
}
