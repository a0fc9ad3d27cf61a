//! Saved birthdays
//!
//! A JSON list under one store key. Reminder scheduling belongs to the
//! platform; this module only answers "when is the next one".

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::{self, KeyValueStore, StoreError, keys};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    pub id: String,
    pub name: String,
    /// ISO date, `YYYY-MM-DD`
    pub date: NaiveDate,
}

#[derive(Debug, Error)]
pub enum BirthdayError {
    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("A birthday with id {0} already exists")]
    DuplicateId(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Birthday {
    /// Build from an ISO date string
    pub fn parse(id: &str, name: &str, date: &str) -> Result<Self, BirthdayError> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| BirthdayError::InvalidDate(date.to_string()))?;
        Ok(Self {
            id: id.to_string(),
            name: name.trim().to_string(),
            date,
        })
    }

    /// Next anniversary on or after `today`. Feb 29 falls on Feb 28 in
    /// non-leap years.
    pub fn next_occurrence(&self, today: NaiveDate) -> NaiveDate {
        let this_year = anniversary(self.date, today.year());
        if this_year >= today {
            this_year
        } else {
            anniversary(self.date, today.year() + 1)
        }
    }

    pub fn days_until_next(&self, today: NaiveDate) -> i64 {
        (self.next_occurrence(today) - today).num_days()
    }
}

fn anniversary(date: NaiveDate, year: i32) -> NaiveDate {
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
        .unwrap_or(date)
}

pub fn list(store: &dyn KeyValueStore) -> Result<Vec<Birthday>, StoreError> {
    Ok(persistence::get_json(store, keys::BIRTHDAYS)?.unwrap_or_default())
}

pub fn add(store: &mut dyn KeyValueStore, birthday: Birthday) -> Result<(), BirthdayError> {
    let mut birthdays = list(store)?;
    if birthdays.iter().any(|b| b.id == birthday.id) {
        return Err(BirthdayError::DuplicateId(birthday.id));
    }
    log::info!("Adding birthday {} ({})", birthday.name, birthday.date);
    birthdays.push(birthday);
    persistence::set_json(store, keys::BIRTHDAYS, &birthdays)?;
    Ok(())
}

/// Remove by id; returns whether anything was removed
pub fn remove(store: &mut dyn KeyValueStore, id: &str) -> Result<bool, StoreError> {
    let mut birthdays = list(store)?;
    let before = birthdays.len();
    birthdays.retain(|b| b.id != id);
    if birthdays.len() == before {
        return Ok(false);
    }
    persistence::set_json(store, keys::BIRTHDAYS, &birthdays)?;
    Ok(true)
}

pub fn clear(store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
    store.remove(keys::BIRTHDAYS)
}

/// All birthdays ordered by how soon they come up
pub fn upcoming(
    store: &dyn KeyValueStore,
    today: NaiveDate,
) -> Result<Vec<(Birthday, i64)>, StoreError> {
    let mut entries: Vec<(Birthday, i64)> = list(store)?
        .into_iter()
        .map(|b| {
            let days = b.days_until_next(today);
            (b, days)
        })
        .collect();
    entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.name.cmp(&b.0.name)));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse() {
        let b = Birthday::parse("1", " Ayşe ", "1990-05-17").unwrap();
        assert_eq!(b.name, "Ayşe");
        assert_eq!(b.date, day(1990, 5, 17));
        assert!(matches!(
            Birthday::parse("2", "x", "17/05/1990"),
            Err(BirthdayError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_next_occurrence() {
        let b = Birthday::parse("1", "a", "1990-05-17").unwrap();
        assert_eq!(b.days_until_next(day(2026, 5, 17)), 0);
        assert_eq!(b.days_until_next(day(2026, 5, 10)), 7);
        assert_eq!(b.next_occurrence(day(2026, 5, 18)), day(2027, 5, 17));
    }

    #[test]
    fn test_leap_day() {
        let b = Birthday::parse("1", "leap", "2000-02-29").unwrap();
        assert_eq!(b.next_occurrence(day(2026, 1, 1)), day(2026, 2, 28));
        assert_eq!(b.next_occurrence(day(2028, 1, 1)), day(2028, 2, 29));
    }

    #[test]
    fn test_crud() {
        let mut store = MemoryStore::new();
        assert!(list(&store).unwrap().is_empty());

        add(&mut store, Birthday::parse("a", "Ali", "1985-12-01").unwrap()).unwrap();
        add(&mut store, Birthday::parse("b", "Berk", "1992-10-20").unwrap()).unwrap();
        let dup = add(&mut store, Birthday::parse("a", "Again", "2001-01-01").unwrap());
        assert!(matches!(dup, Err(BirthdayError::DuplicateId(_))));
        assert_eq!(list(&store).unwrap().len(), 2);

        let soon = upcoming(&store, day(2026, 10, 17)).unwrap();
        assert_eq!(soon[0].0.name, "Berk");
        assert_eq!(soon[0].1, 3);
        assert_eq!(soon[1].0.name, "Ali");

        assert!(remove(&mut store, "a").unwrap());
        assert!(!remove(&mut store, "a").unwrap());
        assert_eq!(list(&store).unwrap().len(), 1);

        clear(&mut store).unwrap();
        assert!(list(&store).unwrap().is_empty());
    }

    #[test]
    fn test_stored_format() {
        let mut store = MemoryStore::new();
        add(&mut store, Birthday::parse("a", "Ali", "1985-12-01").unwrap()).unwrap();
        assert_eq!(
            store.get(keys::BIRTHDAYS).unwrap().as_deref(),
            Some(r#"[{"id":"a","name":"Ali","date":"1985-12-01"}]"#)
        );
    }
}
