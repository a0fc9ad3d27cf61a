//! Cosmetic shop
//!
//! Characters and umbrellas bought with coins. Purely cosmetic: the selected
//! items only change how the game is drawn.

use serde::{Deserialize, Serialize};

/// Default items, always owned
pub const DEFAULT_CHARACTER: &str = "🙂";
pub const DEFAULT_UMBRELLA: &str = "☂️";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Character,
    Umbrella,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Character => "character",
            ItemKind::Umbrella => "umbrella",
        }
    }

    pub fn default_item(&self) -> &'static str {
        match self {
            ItemKind::Character => DEFAULT_CHARACTER,
            ItemKind::Umbrella => DEFAULT_UMBRELLA,
        }
    }

    pub fn catalog(&self) -> &'static [CatalogItem] {
        match self {
            ItemKind::Character => &CHARACTERS,
            ItemKind::Umbrella => &UMBRELLAS,
        }
    }
}

/// A shop entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u64,
}

const fn catalog_item(id: &'static str, name: &'static str, price: u64) -> CatalogItem {
    CatalogItem { id, name, price }
}

pub const CHARACTERS: [CatalogItem; 6] = [
    catalog_item(DEFAULT_CHARACTER, "Default", 0),
    catalog_item("🧑", "Person", 500),
    catalog_item("👩", "Woman", 750),
    catalog_item("👨‍💼", "Businessman", 1000),
    catalog_item("👨‍🎓", "Student", 1500),
    catalog_item("👨‍🚀", "Astronaut", 2500),
];

pub const UMBRELLAS: [CatalogItem; 5] = [
    catalog_item(DEFAULT_UMBRELLA, "Default", 0),
    catalog_item("🌂", "Purple", 500),
    catalog_item("☔", "Rain", 800),
    catalog_item("🏖️", "Beach", 1200),
    catalog_item("⛱️", "Sun", 2000),
];

/// Catalog price of `item`, if it is sold
pub fn price_of(kind: ItemKind, item: &str) -> Option<u64> {
    kind.catalog().iter().find(|c| c.id == item).map(|c| c.price)
}

/// Result of a purchase attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased { remaining: u64 },
    /// Nothing charged
    AlreadyOwned,
    InsufficientFunds { price: u64, available: u64 },
}

/// Owned and selected cosmetics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub owned_characters: Vec<String>,
    pub owned_umbrellas: Vec<String>,
    pub selected_character: String,
    pub selected_umbrella: String,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            owned_characters: vec![DEFAULT_CHARACTER.to_string()],
            owned_umbrellas: vec![DEFAULT_UMBRELLA.to_string()],
            selected_character: DEFAULT_CHARACTER.to_string(),
            selected_umbrella: DEFAULT_UMBRELLA.to_string(),
        }
    }
}

impl Inventory {
    pub fn owned(&self, kind: ItemKind) -> &[String] {
        match kind {
            ItemKind::Character => &self.owned_characters,
            ItemKind::Umbrella => &self.owned_umbrellas,
        }
    }

    pub fn owns(&self, kind: ItemKind, item: &str) -> bool {
        self.owned(kind).iter().any(|i| i == item)
    }

    pub fn selected(&self, kind: ItemKind) -> &str {
        match kind {
            ItemKind::Character => &self.selected_character,
            ItemKind::Umbrella => &self.selected_umbrella,
        }
    }

    /// Add to the owned set; returns false if already owned
    pub fn add(&mut self, kind: ItemKind, item: &str) -> bool {
        if self.owns(kind, item) {
            return false;
        }
        let owned = match kind {
            ItemKind::Character => &mut self.owned_characters,
            ItemKind::Umbrella => &mut self.owned_umbrellas,
        };
        owned.push(item.to_string());
        true
    }

    /// Make `item` active; only owned items can be selected
    pub fn select(&mut self, kind: ItemKind, item: &str) -> bool {
        if !self.owns(kind, item) {
            return false;
        }
        let selected = match kind {
            ItemKind::Character => &mut self.selected_character,
            ItemKind::Umbrella => &mut self.selected_umbrella,
        };
        *selected = item.to_string();
        true
    }

    /// Spend `price` coins on `item`
    pub fn purchase(
        &mut self,
        coins: &mut u64,
        kind: ItemKind,
        item: &str,
        price: u64,
    ) -> PurchaseOutcome {
        if self.owns(kind, item) {
            return PurchaseOutcome::AlreadyOwned;
        }
        if *coins < price {
            return PurchaseOutcome::InsufficientFunds {
                price,
                available: *coins,
            };
        }
        *coins -= price;
        self.add(kind, item);
        PurchaseOutcome::Purchased { remaining: *coins }
    }

    /// Repair data read from storage: defaults always owned, selections owned
    pub fn normalize(&mut self) {
        for kind in [ItemKind::Character, ItemKind::Umbrella] {
            let default = kind.default_item();
            if !self.owns(kind, default) {
                let owned = match kind {
                    ItemKind::Character => &mut self.owned_characters,
                    ItemKind::Umbrella => &mut self.owned_umbrellas,
                };
                owned.insert(0, default.to_string());
            }
            if !self.owns(kind, self.selected(kind)) {
                log::warn!(
                    "Selected {} {:?} not owned, reverting to default",
                    kind.as_str(),
                    self.selected(kind)
                );
                self.select(kind, default);
            }
        }
    }
}
