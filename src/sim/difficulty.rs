//! Score-driven difficulty curve
//!
//! Pure functions: the game gets harder as the session score climbs.

use rand::Rng;

use super::state::DropKind;
use crate::consts::*;

/// Roll the kind of the next drop.
///
/// Below `DANGER_MIN_SCORE`: 85% normal, 15% bonus.
/// From there on: 80% normal, 15% bonus, 5% danger.
pub fn select_drop_type<R: Rng + ?Sized>(score: u32, rng: &mut R) -> DropKind {
    let roll: f64 = rng.random();
    if score < DANGER_MIN_SCORE {
        return if roll < 0.85 {
            DropKind::Normal
        } else {
            DropKind::Bonus
        };
    }
    if roll < 0.80 {
        DropKind::Normal
    } else if roll < 0.95 {
        DropKind::Bonus
    } else {
        DropKind::Danger
    }
}

/// Fall time in milliseconds for a regular drop at `score`
pub fn drop_duration(score: u32) -> u64 {
    let speedup = u64::from(score / DURATION_SCORE_STEP) * DROP_SPEEDUP_MS;
    BASE_DROP_MS.saturating_sub(speedup).max(MIN_DROP_MS)
}

/// Fall time for a drop of `kind`; danger drops are always fast
pub fn duration_for(kind: DropKind, score: u32) -> u64 {
    match kind {
        DropKind::Danger => MIN_DROP_MS,
        _ => drop_duration(score),
    }
}

/// How long the umbrella stays open at `score`
pub fn umbrella_open_ms(score: u32) -> u64 {
    UMBRELLA_BASE_MS
        .saturating_sub(u64::from(score) * UMBRELLA_PER_POINT_MS)
        .max(UMBRELLA_MIN_MS)
}
