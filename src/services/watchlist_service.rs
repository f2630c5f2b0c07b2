// src/services/watchlist_service.rs

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::movie::Movie;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::user::Actor;
use crate::domain::watchlist::{validate_watchlist_entry, WatchlistEntry};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, WatchlistMovieAdded, WatchlistMovieRemoved};
use crate::repositories::{MovieRepository, WatchlistRepository};

/// A watchlist entry together with the movie it points at
#[derive(Debug, Clone)]
pub struct WatchlistItem {
    pub entry: WatchlistEntry,
    pub movie: Movie,
}

pub struct WatchlistService {
    watchlist_repo: Arc<dyn WatchlistRepository>,
    movie_repo: Arc<dyn MovieRepository>,
    event_bus: Arc<EventBus>,
}

fn require_own_watchlist(actor: &Actor, user_id: Uuid) -> AppResult<()> {
    if actor.owns(user_id) {
        Ok(())
    } else {
        log::warn!("user {} tried to modify watchlist of {}", actor.user_id, user_id);
        Err(AppError::Forbidden(
            "You can only modify your own watchlist".to_string(),
        ))
    }
}

impl WatchlistService {
    pub fn new(
        watchlist_repo: Arc<dyn WatchlistRepository>,
        movie_repo: Arc<dyn MovieRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            watchlist_repo,
            movie_repo,
            event_bus,
        }
    }

    pub fn add_to_watchlist(
        &self,
        actor: &Actor,
        user_id: Uuid,
        movie_id: Uuid,
    ) -> AppResult<WatchlistItem> {
        require_own_watchlist(actor, user_id)?;

        let movie = self
            .movie_repo
            .get_by_id(movie_id)?
            .ok_or(AppError::NotFound)?;

        if self.watchlist_repo.find(user_id, movie_id)?.is_some() {
            return Err(AppError::Conflict("Movie already in watchlist".to_string()));
        }

        let entry = WatchlistEntry::new(user_id, movie_id);
        validate_watchlist_entry(&entry)?;
        self.watchlist_repo.add(&entry)?;

        log::info!("user {} added movie {} to watchlist", user_id, movie_id);
        self.event_bus.emit(WatchlistMovieAdded::new(user_id, movie_id));

        Ok(WatchlistItem { entry, movie })
    }

    pub fn remove_from_watchlist(&self, actor: &Actor, user_id: Uuid, movie_id: Uuid) -> AppResult<()> {
        require_own_watchlist(actor, user_id)?;

        if !self.watchlist_repo.remove(user_id, movie_id)? {
            return Err(AppError::NotFound);
        }

        log::info!("user {} removed movie {} from watchlist", user_id, movie_id);
        self.event_bus.emit(WatchlistMovieRemoved::new(user_id, movie_id));

        Ok(())
    }

    /// Most recently added first
    pub fn list_watchlist(&self, user_id: Uuid, page: PageRequest) -> AppResult<Page<WatchlistItem>> {
        let entries = self.watchlist_repo.list_by_user(user_id, page)?;

        let mut items = Vec::with_capacity(entries.items.len());
        for entry in &entries.items {
            // entries cascade with their movie, so a miss means a concurrent delete
            if let Some(movie) = self.movie_repo.get_by_id(entry.movie_id)? {
                items.push(WatchlistItem {
                    entry: entry.clone(),
                    movie,
                });
            }
        }

        Ok(Page::new(items, page, entries.total_items))
    }
}
