//! City preferences for the weather screens
//!
//! Favorites and recent searches, each a JSON list of city names under the
//! key shipped builds use.

use crate::persistence::{self, KeyValueStore, StoreError, keys};

/// Recent searches kept, newest first
pub const MAX_RECENT_CITIES: usize = 5;
/// Entries shown under the search box
pub const MAX_SUGGESTIONS: usize = 5;

pub fn favorite_cities(store: &dyn KeyValueStore) -> Result<Vec<String>, StoreError> {
    Ok(persistence::get_json(store, keys::FAVORITE_CITIES)?.unwrap_or_default())
}

pub fn is_favorite(store: &dyn KeyValueStore, city: &str) -> Result<bool, StoreError> {
    Ok(favorite_cities(store)?.iter().any(|c| c == city.trim()))
}

/// Add `city` to the favorites, or remove it if already there.
/// Returns whether it is a favorite afterwards.
pub fn toggle_favorite(store: &mut dyn KeyValueStore, city: &str) -> Result<bool, StoreError> {
    let city = city.trim();
    if city.is_empty() {
        return Ok(false);
    }
    let mut favorites = favorite_cities(store)?;
    let now_favorite = match favorites.iter().position(|c| c == city) {
        Some(i) => {
            favorites.remove(i);
            false
        }
        None => {
            favorites.push(city.to_string());
            true
        }
    };
    persistence::set_json(store, keys::FAVORITE_CITIES, &favorites)?;
    log::debug!("Favorite {}: {}", city, now_favorite);
    Ok(now_favorite)
}

pub fn recent_cities(store: &dyn KeyValueStore) -> Result<Vec<String>, StoreError> {
    Ok(persistence::get_json(store, keys::RECENT_CITIES)?.unwrap_or_default())
}

/// Record a search. The city moves to the front; an earlier entry that
/// differs only in case is dropped.
pub fn add_recent_city(
    store: &mut dyn KeyValueStore,
    city: &str,
) -> Result<Vec<String>, StoreError> {
    let city = city.trim();
    let mut recent = recent_cities(store)?;
    if city.is_empty() {
        return Ok(recent);
    }
    let lower = city.to_lowercase();
    recent.retain(|c| c.to_lowercase() != lower);
    recent.insert(0, city.to_string());
    recent.truncate(MAX_RECENT_CITIES);
    persistence::set_json(store, keys::RECENT_CITIES, &recent)?;
    Ok(recent)
}

/// Completions for a partly typed city: recent searches first, then
/// `candidates`. Empty input lists the recent searches.
pub fn suggestions(recent: &[String], candidates: &[String], input: &str) -> Vec<String> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return recent.iter().take(MAX_SUGGESTIONS).cloned().collect();
    }

    let mut out: Vec<String> = Vec::new();
    let matches_recent = recent
        .iter()
        .filter(|c| c.to_lowercase().starts_with(&input));
    let matches_other = candidates.iter().filter(|c| {
        let lower = c.to_lowercase();
        lower.starts_with(&input) && lower != input
    });
    for city in matches_recent.chain(matches_other) {
        if out.len() == MAX_SUGGESTIONS {
            break;
        }
        let key = city.to_lowercase();
        if !out.iter().any(|c| c.to_lowercase() == key) {
            out.push(city.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn cities(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle_favorite() {
        let mut store = MemoryStore::new();
        assert!(toggle_favorite(&mut store, "İzmir").unwrap());
        assert!(toggle_favorite(&mut store, "Ankara").unwrap());
        assert!(is_favorite(&store, "İzmir").unwrap());
        assert_eq!(
            store.get(keys::FAVORITE_CITIES).unwrap().as_deref(),
            Some(r#"["İzmir","Ankara"]"#)
        );

        assert!(!toggle_favorite(&mut store, "İzmir").unwrap());
        assert_eq!(favorite_cities(&store).unwrap(), cities(&["Ankara"]));
        assert!(!toggle_favorite(&mut store, "  ").unwrap());
    }

    #[test]
    fn test_recent_cities_newest_first_and_capped() {
        let mut store = MemoryStore::new();
        for city in ["Adana", "Bursa", "Konya", "Mersin", "Samsun", "Trabzon"] {
            add_recent_city(&mut store, city).unwrap();
        }
        assert_eq!(
            recent_cities(&store).unwrap(),
            cities(&["Trabzon", "Samsun", "Mersin", "Konya", "Bursa"])
        );

        let recent = add_recent_city(&mut store, "konya").unwrap();
        assert_eq!(
            recent,
            cities(&["konya", "Trabzon", "Samsun", "Mersin", "Bursa"])
        );
        assert_eq!(recent_cities(&store).unwrap(), recent);
    }

    #[test]
    fn test_reads_lists_from_older_builds() {
        let mut store = MemoryStore::new();
        store.set(keys::RECENT_CITIES, r#"["Rize","Ordu"]"#).unwrap();
        store.set(keys::FAVORITE_CITIES, r#"["Van"]"#).unwrap();
        assert_eq!(recent_cities(&store).unwrap(), cities(&["Rize", "Ordu"]));
        assert!(is_favorite(&store, "Van").unwrap());
    }

    #[test]
    fn test_corrupt_list_is_an_error() {
        let mut store = MemoryStore::new();
        store.set(keys::RECENT_CITIES, "[Rize").unwrap();
        assert!(matches!(recent_cities(&store), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_suggestions() {
        let recent = cities(&["Bolu", "Ankara"]);
        let known = cities(&[
            "Antalya", "Ankara", "Artvin", "Bolu", "Aydın", "Amasya", "Ağrı",
        ]);

        assert_eq!(suggestions(&recent, &known, ""), recent);
        assert_eq!(
            suggestions(&recent, &known, "an"),
            cities(&["Ankara", "Antalya"])
        );
        assert_eq!(suggestions(&recent, &known, "bolu"), cities(&["Bolu"]));
        assert_eq!(
            suggestions(&recent, &known, "a"),
            cities(&["Ankara", "Antalya", "Artvin", "Aydın", "Amasya"])
        );
    }
}
