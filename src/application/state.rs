// src/application/state.rs

use std::sync::Arc;

use crate::config::{CatalogConfig, Config};
use crate::db::ConnectionPool;
use crate::events::{register_logging_handlers, EventBus};
use crate::repositories::{
    SqliteMovieRepository, SqliteReviewRepository, SqliteUserRepository,
    SqliteWatchlistRepository,
};
use crate::services::{
    MovieService, RatingAggregateService, ReviewService, UserService, WatchlistService,
};

/// Everything a command needs.
/// All fields are Arc-wrapped for thread-safe sharing across callers.
pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub catalog: CatalogConfig,
    pub event_bus: Arc<EventBus>,
    pub movie_service: Arc<MovieService>,
    pub review_service: Arc<ReviewService>,
    pub rating_service: Arc<RatingAggregateService>,
    pub watchlist_service: Arc<WatchlistService>,
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wire repositories, the event bus and services over one pool
    pub fn new(pool: Arc<ConnectionPool>, config: &Config) -> Self {
        let event_bus = Arc::new(EventBus::new());
        register_logging_handlers(&event_bus);

        let user_repo = Arc::new(SqliteUserRepository::new(Arc::clone(&pool)));
        let movie_repo = Arc::new(SqliteMovieRepository::new(Arc::clone(&pool)));
        let review_repo = Arc::new(SqliteReviewRepository::new(Arc::clone(&pool)));
        let watchlist_repo = Arc::new(SqliteWatchlistRepository::new(Arc::clone(&pool)));

        let rating_service = Arc::new(RatingAggregateService::new(
            review_repo.clone(),
            movie_repo.clone(),
            event_bus.clone(),
        ));

        let movie_service = Arc::new(MovieService::new(
            movie_repo.clone(),
            review_repo.clone(),
            event_bus.clone(),
            config.catalog.clone(),
        ));

        let review_service = Arc::new(ReviewService::new(
            review_repo.clone(),
            movie_repo.clone(),
            rating_service.clone(),
            event_bus.clone(),
        ));

        let watchlist_service = Arc::new(WatchlistService::new(
            watchlist_repo.clone(),
            movie_repo,
            event_bus.clone(),
        ));

        let user_service = Arc::new(UserService::new(
            user_repo,
            review_repo,
            watchlist_repo,
            event_bus.clone(),
            config.catalog.recent_reviews_limit,
        ));

        Self {
            pool,
            catalog: config.catalog.clone(),
            event_bus,
            movie_service,
            review_service,
            rating_service,
            watchlist_service,
            user_service,
        }
    }
}
