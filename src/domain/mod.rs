// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod movie;
pub mod pagination;
pub mod rating;
pub mod review;
pub mod user;
pub mod validation;
pub mod watchlist;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Movie Domain
pub use movie::{validate_movie, CastMember, Movie, MoviePatch, MovieQuery, MovieSortField};

// Review Domain
pub use review::{validate_review, Review, ReviewQuery, ReviewSortField};

// Rating (Derived Data)
pub use rating::{AverageRating, Rating, RatingDistribution, RatingSummary};

// Watchlist Domain
pub use watchlist::{validate_watchlist_entry, WatchlistEntry};

// User Domain
pub use user::{validate_user, Actor, Role, User};

// Listing
pub use pagination::{Page, PageRequest, SortOrder};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Rating {0} is outside 1..=5")]
    InvalidRating(i64),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
