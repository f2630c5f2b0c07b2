//! Critical Watchlist Invariants:
//!
//! 1. An entry belongs to exactly one user and one movie
//! 2. At most one entry per (user, movie)
//! 3. Entries do NOT affect movie ratings
//! 4. Deleting a movie removes its entries

pub mod entity;

pub use entity::WatchlistEntry;

use crate::domain::{DomainError, DomainResult};

/// Validates WatchlistEntry invariants
pub fn validate_watchlist_entry(entry: &WatchlistEntry) -> DomainResult<()> {
    if entry.user_id.is_nil() || entry.movie_id.is_nil() {
        return Err(DomainError::InvariantViolation(
            "Watchlist entry needs both a user and a movie".to_string(),
        ));
    }
    Ok(())
}
