// src/services/user_service.rs
//
// Accounts and profiles. Authentication happens before any call into
// this service; callers arrive as an `Actor`.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::review::Review;
use crate::domain::user::{normalize_email, validate_user, Actor, Role, User};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, UserProfileUpdated, UserRegistered};
use crate::repositories::{ReviewRepository, UserRepository, WatchlistRepository};

#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileRequest {
    pub user_id: Uuid,
    pub username: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    pub review_count: u64,
    pub watchlist_count: u64,
    /// Newest first
    pub recent_reviews: Vec<Review>,
}

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    watchlist_repo: Arc<dyn WatchlistRepository>,
    event_bus: Arc<EventBus>,
    recent_reviews_limit: u32,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        review_repo: Arc<dyn ReviewRepository>,
        watchlist_repo: Arc<dyn WatchlistRepository>,
        event_bus: Arc<EventBus>,
        recent_reviews_limit: u32,
    ) -> Self {
        Self {
            user_repo,
            review_repo,
            watchlist_repo,
            event_bus,
            recent_reviews_limit,
        }
    }

    pub fn register_user(&self, request: RegisterUserRequest) -> AppResult<User> {
        let user = User::new(request.username, request.email, request.role);
        validate_user(&user)?;
        self.ensure_available(&user.username, &user.email, None)?;

        self.user_repo.save(&user)?;

        log::info!("registered {} user {}", user.role, user.username);
        self.event_bus
            .emit(UserRegistered::new(user.id, user.username.clone()));

        Ok(user)
    }

    pub fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        self.user_repo.get_by_id(user_id)?.ok_or(AppError::NotFound)
    }

    pub fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.user_repo.find_by_email(&normalize_email(email))
    }

    pub fn get_profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        let user = self.get_user(user_id)?;

        Ok(UserProfile {
            review_count: self.review_repo.count_by_user(user_id)?,
            watchlist_count: self.watchlist_repo.count_by_user(user_id)?,
            recent_reviews: self
                .review_repo
                .list_recent_by_user(user_id, self.recent_reviews_limit)?,
            user,
        })
    }

    pub fn update_profile(&self, actor: &Actor, request: UpdateProfileRequest) -> AppResult<User> {
        if !actor.owns(request.user_id) {
            log::warn!("user {} tried to edit profile {}", actor.user_id, request.user_id);
            return Err(AppError::Forbidden(
                "You can only update your own profile".to_string(),
            ));
        }

        let mut user = self.get_user(request.user_id)?;
        user.update_profile(request.username, request.email, request.profile_picture);
        validate_user(&user)?;
        self.ensure_available(&user.username, &user.email, Some(user.id))?;

        self.user_repo.save(&user)?;

        log::info!("profile {} updated", user.id);
        self.event_bus.emit(UserProfileUpdated::new(user.id));

        Ok(user)
    }

    /// Conflict when another account already holds the username or email
    fn ensure_available(&self, username: &str, email: &str, this_user: Option<Uuid>) -> AppResult<()> {
        let taken_by_other = |found: Option<User>| match found {
            Some(other) => Some(other.id) != this_user,
            None => false,
        };

        if taken_by_other(self.user_repo.find_by_email(email)?) {
            return Err(AppError::Conflict("Email already in use".to_string()));
        }
        if taken_by_other(self.user_repo.find_by_username(username)?) {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }
        Ok(())
    }
}
