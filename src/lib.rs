// src/lib.rs
// MovieReview - movie catalogue, reviews and watchlists over SQLite
//
// Architecture:
// - Domain-centric: entities and invariants live in domain/
// - Repositories are dumb data mappers; services own authorization and write order
// - The rating aggregate on a movie is derived data, recomputed from its reviews
// - Events notify after a write commits; they never carry the write itself
// - Application layer: DTOs and commands for whatever front end drives the crate

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    Actor,
    AverageRating,
    CastMember,
    Movie,
    MoviePatch,
    MovieQuery,
    MovieSortField,
    Page,
    PageRequest,
    Rating,
    RatingDistribution,
    RatingSummary,
    Review,
    ReviewQuery,
    ReviewSortField,
    Role,
    SortOrder,
    User,
    WatchlistEntry,
};

// ============================================================================
// PUBLIC API - Errors & Config
// ============================================================================

pub use config::Config;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{create_event_bus, DomainEvent, EventBus, EventLogEntry, MovieRatingRecomputed};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    MovieService,
    RatingAggregateService,
    RecomputeReport,
    ReviewService,
    UserService,
    WatchlistService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{seed_catalog, AppState, ErrorResponse};

pub use application::commands;
pub use application::dto;
