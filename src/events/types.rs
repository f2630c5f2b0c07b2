// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// USER EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub username: String,
}

impl UserRegistered {
    pub fn new(user_id: Uuid, username: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            username,
        }
    }
}

impl DomainEvent for UserRegistered {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UserRegistered" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
}

impl UserProfileUpdated {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
        }
    }
}

impl DomainEvent for UserProfileUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UserProfileUpdated" }
}

// ============================================================================
// MOVIE EVENTS
// ============================================================================

/// Emitted when an admin adds a movie to the catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: Uuid,
    pub title: String,
    pub added_by: Uuid,
}

impl MovieCreated {
    pub fn new(movie_id: Uuid, title: String, added_by: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            title,
            added_by,
        }
    }
}

impl DomainEvent for MovieCreated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "MovieCreated" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: Uuid,
}

impl MovieUpdated {
    pub fn new(movie_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
        }
    }
}

impl DomainEvent for MovieUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "MovieUpdated" }
}

/// Emitted after a movie and everything attached to it was removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: Uuid,
}

impl MovieDeleted {
    pub fn new(movie_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
        }
    }
}

impl DomainEvent for MovieDeleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "MovieDeleted" }
}

/// Emitted whenever a movie's derived rating fields were rewritten
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRatingRecomputed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: Uuid,
    pub average_rating: f64,
    pub total_reviews: u32,
}

impl MovieRatingRecomputed {
    pub fn new(movie_id: Uuid, average_rating: f64, total_reviews: u32) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            average_rating,
            total_reviews,
        }
    }
}

impl DomainEvent for MovieRatingRecomputed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "MovieRatingRecomputed" }
}

// ============================================================================
// REVIEW EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub review_id: Uuid,
    pub movie_id: Uuid,
    pub user_id: Uuid,
    pub rating: u8,
}

impl ReviewCreated {
    pub fn new(review_id: Uuid, movie_id: Uuid, user_id: Uuid, rating: u8) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            review_id,
            movie_id,
            user_id,
            rating,
        }
    }
}

impl DomainEvent for ReviewCreated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ReviewCreated" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub review_id: Uuid,
    pub movie_id: Uuid,
    pub rating_changed: bool,
}

impl ReviewUpdated {
    pub fn new(review_id: Uuid, movie_id: Uuid, rating_changed: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            review_id,
            movie_id,
            rating_changed,
        }
    }
}

impl DomainEvent for ReviewUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ReviewUpdated" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub review_id: Uuid,
    pub movie_id: Uuid,
}

impl ReviewDeleted {
    pub fn new(review_id: Uuid, movie_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            review_id,
            movie_id,
        }
    }
}

impl DomainEvent for ReviewDeleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ReviewDeleted" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewHelpfulToggled {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub review_id: Uuid,
    pub user_id: Uuid,
    /// State after the toggle
    pub helpful: bool,
    pub helpful_count: u32,
}

impl ReviewHelpfulToggled {
    pub fn new(review_id: Uuid, user_id: Uuid, helpful: bool, helpful_count: u32) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            review_id,
            user_id,
            helpful,
            helpful_count,
        }
    }
}

impl DomainEvent for ReviewHelpfulToggled {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ReviewHelpfulToggled" }
}

// ============================================================================
// WATCHLIST EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistMovieAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub movie_id: Uuid,
}

impl WatchlistMovieAdded {
    pub fn new(user_id: Uuid, movie_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            movie_id,
        }
    }
}

impl DomainEvent for WatchlistMovieAdded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "WatchlistMovieAdded" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistMovieRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub movie_id: Uuid,
}

impl WatchlistMovieRemoved {
    pub fn new(user_id: Uuid, movie_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            movie_id,
        }
    }
}

impl DomainEvent for WatchlistMovieRemoved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "WatchlistMovieRemoved" }
}
