//! Persisted player progress
//!
//! High score, coin balance and shop inventory. Storage is best-effort: a
//! failed read leaves the default in place, a failed write is logged and
//! forgotten until the next successful one.

use crate::consts::MAX_COINS;
use crate::persistence::{self, KeyValueStore, StoreError, keys};
use crate::shop::Inventory;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    pub high_score: u32,
    pub total_coins: u64,
    pub inventory: Inventory,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load whatever the store holds; each key falls back independently
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut profile = Self::new();

        let high_score = persistence::get_parsed::<u32>(store, keys::HIGH_SCORE);
        if let Some(v) = or_warn("high score", high_score) {
            profile.high_score = v;
        }
        let coins = persistence::get_parsed::<u64>(store, keys::TOTAL_COINS);
        if let Some(v) = or_warn("coins", coins) {
            profile.total_coins = v.min(MAX_COINS);
        }

        // Inventory keys load independently
        let inv = &mut profile.inventory;
        if let Some(v) = or_warn("selected character", store.get(keys::SELECTED_CHARACTER)) {
            inv.selected_character = v;
        }
        if let Some(v) = or_warn("selected umbrella", store.get(keys::SELECTED_UMBRELLA)) {
            inv.selected_umbrella = v;
        }
        let characters = persistence::get_json(store, keys::OWNED_CHARACTERS);
        if let Some(v) = or_warn("owned characters", characters) {
            inv.owned_characters = v;
        }
        let umbrellas = persistence::get_json(store, keys::OWNED_UMBRELLAS);
        if let Some(v) = or_warn("owned umbrellas", umbrellas) {
            inv.owned_umbrellas = v;
        }
        profile.inventory.normalize();

        log::info!(
            "Loaded profile: best {}, {} coins, {} characters, {} umbrellas",
            profile.high_score,
            profile.total_coins,
            profile.inventory.owned_characters.len(),
            profile.inventory.owned_umbrellas.len()
        );
        profile
    }

    /// Raise the high score to `score` if it beats it; true when it did
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    /// Credit coins, capped at `MAX_COINS`; returns the new balance
    pub fn add_coins(&mut self, amount: u64) -> u64 {
        let before = self.total_coins;
        self.total_coins = self.total_coins.saturating_add(amount).min(MAX_COINS);
        if self.total_coins == MAX_COINS && before < MAX_COINS {
            log::info!("Maximum coins reached ({})", MAX_COINS);
        }
        self.total_coins
    }

    pub fn save_high_score(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(keys::HIGH_SCORE, &self.high_score.to_string())
    }

    pub fn save_coins(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(keys::TOTAL_COINS, &self.total_coins.to_string())
    }

    pub fn save_inventory(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let inv = &self.inventory;
        store.set(keys::SELECTED_CHARACTER, &inv.selected_character)?;
        store.set(keys::SELECTED_UMBRELLA, &inv.selected_umbrella)?;
        persistence::set_json(store, keys::OWNED_CHARACTERS, &inv.owned_characters)?;
        persistence::set_json(store, keys::OWNED_UMBRELLAS, &inv.owned_umbrellas)?;
        Ok(())
    }

    /// Forget all progress in memory and in the store
    pub fn reset(&mut self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        *self = Self::new();
        store.remove_many(&keys::GAME_KEYS)
    }
}

/// A missing or unreadable key keeps the default
fn or_warn<T>(what: &str, result: Result<Option<T>, StoreError>) -> Option<T> {
    result.unwrap_or_else(|e| {
        log::warn!("Failed to load {}: {}", what, e);
        None
    })
}
