// src/events/mod.rs
//
// Internal Event System - Public API
//
// Events are notifications. Nothing that must succeed for a request to
// succeed (the rating recompute included) runs inside a handler.

pub mod bus;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Movie
    MovieCreated,
    MovieDeleted,
    MovieRatingRecomputed,
    MovieUpdated,

    // Review
    ReviewCreated,
    ReviewDeleted,
    ReviewHelpfulToggled,
    ReviewUpdated,

    // User
    UserProfileUpdated,
    UserRegistered,

    // Watchlist
    WatchlistMovieAdded,
    WatchlistMovieRemoved,
};

pub use bus::{EventBus, EventLogEntry};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}

/// Log the events an operator cares about at info level
pub fn register_logging_handlers(bus: &EventBus) {
    bus.subscribe::<MovieRatingRecomputed, _>(|e| {
        log::info!(
            "movie {} rating recomputed: {:.1} over {} reviews",
            e.movie_id,
            e.average_rating,
            e.total_reviews
        );
    });
    bus.subscribe::<MovieDeleted, _>(|e| {
        log::info!("movie {} deleted", e.movie_id);
    });
    bus.subscribe::<UserRegistered, _>(|e| {
        log::info!("user {} registered ({})", e.username, e.user_id);
    });
}
