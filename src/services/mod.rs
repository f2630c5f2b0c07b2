// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services own authorization, validation and the order of writes.
// Repositories stay dumb; events are emitted only after a write commits.

pub mod movie_service;
pub mod rating_aggregate_service;
pub mod review_service;
pub mod user_service;
pub mod watchlist_service;

#[cfg(test)]
mod rating_aggregate_service_tests;

pub use movie_service::{
    CreateMovieRequest,
    MovieBrowse,
    MovieDetail,
    MovieService,
    UpdateMovieRequest,
};

pub use rating_aggregate_service::{RatingAggregateService, RecomputeReport};

pub use review_service::{
    CreateReviewRequest,
    HelpfulToggle,
    MovieReviews,
    ReviewService,
    UpdateReviewRequest,
};

pub use user_service::{
    RegisterUserRequest,
    UpdateProfileRequest,
    UserProfile,
    UserService,
};

pub use watchlist_service::{WatchlistItem, WatchlistService};
