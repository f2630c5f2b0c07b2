// src/services/review_service.rs
//
// Review lifecycle. Every committed change to the set of ratings on a
// movie (create, rating edit, delete) is followed by a synchronous
// recompute of that movie's aggregate; a recompute failure is returned
// to the caller even though the review write already stands.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::pagination::Page;
use crate::domain::rating::{Rating, RatingDistribution};
use crate::domain::review::{validate_review, Review, ReviewQuery};
use crate::domain::user::Actor;
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, ReviewCreated, ReviewDeleted, ReviewHelpfulToggled, ReviewUpdated};
use crate::repositories::{MovieRepository, ReviewRepository};
use crate::services::RatingAggregateService;

#[derive(Debug, Clone)]
pub struct CreateReviewRequest {
    pub movie_id: Uuid,
    pub rating: i64,
    pub review_text: String,
}

#[derive(Debug, Clone)]
pub struct UpdateReviewRequest {
    pub review_id: Uuid,
    pub rating: Option<i64>,
    pub review_text: Option<String>,
}

/// State of one user's helpful vote after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpfulToggle {
    pub helpful: bool,
    pub helpful_count: u32,
}

#[derive(Debug, Clone)]
pub struct MovieReviews {
    pub reviews: Page<Review>,
    pub distribution: RatingDistribution,
}

pub struct ReviewService {
    review_repo: Arc<dyn ReviewRepository>,
    movie_repo: Arc<dyn MovieRepository>,
    rating_service: Arc<RatingAggregateService>,
    event_bus: Arc<EventBus>,
}

impl ReviewService {
    pub fn new(
        review_repo: Arc<dyn ReviewRepository>,
        movie_repo: Arc<dyn MovieRepository>,
        rating_service: Arc<RatingAggregateService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            review_repo,
            movie_repo,
            rating_service,
            event_bus,
        }
    }

    pub fn create_review(&self, actor: &Actor, request: CreateReviewRequest) -> AppResult<Review> {
        if !self.movie_repo.exists(request.movie_id)? {
            return Err(AppError::NotFound);
        }

        if self
            .review_repo
            .find_by_user_and_movie(actor.user_id, request.movie_id)?
            .is_some()
        {
            return Err(AppError::Conflict(
                "You have already reviewed this movie".to_string(),
            ));
        }

        let review = Review::new(
            actor.user_id,
            request.movie_id,
            Rating::new(request.rating)?,
            request.review_text,
        );
        validate_review(&review)?;

        self.review_repo.save(&review)?;
        log::info!(
            "review {} by {} on movie {} ({} stars)",
            review.id,
            review.user_id,
            review.movie_id,
            review.rating
        );

        self.event_bus.emit(ReviewCreated::new(
            review.id,
            review.movie_id,
            review.user_id,
            review.rating.value(),
        ));

        self.rating_service.recompute_rating(review.movie_id)?;

        Ok(review)
    }

    pub fn update_review(&self, actor: &Actor, request: UpdateReviewRequest) -> AppResult<Review> {
        let mut review = self.get_review(request.review_id)?;
        if !actor.owns(review.user_id) {
            log::warn!("user {} tried to edit review {}", actor.user_id, review.id);
            return Err(AppError::Forbidden(
                "You can only edit your own reviews".to_string(),
            ));
        }

        let rating = request.rating.map(Rating::new).transpose()?;
        let rating_changed = review.edit(rating, request.review_text);
        validate_review(&review)?;

        self.review_repo.save(&review)?;
        log::info!("review {} updated", review.id);

        self.event_bus
            .emit(ReviewUpdated::new(review.id, review.movie_id, rating_changed));

        if rating_changed {
            self.rating_service.recompute_rating(review.movie_id)?;
        }

        Ok(review)
    }

    pub fn delete_review(&self, actor: &Actor, review_id: Uuid) -> AppResult<()> {
        let review = self.get_review(review_id)?;
        if !actor.owns(review.user_id) {
            log::warn!("user {} tried to delete review {}", actor.user_id, review.id);
            return Err(AppError::Forbidden(
                "You can only delete your own reviews".to_string(),
            ));
        }

        let movie_id = review.movie_id;
        self.review_repo.delete(review_id)?;
        log::info!("review {} deleted", review_id);

        self.event_bus.emit(ReviewDeleted::new(review_id, movie_id));

        self.rating_service.recompute_rating(movie_id)?;

        Ok(())
    }

    /// Flip the caller's helpful vote on a review
    pub fn toggle_helpful(&self, actor: &Actor, review_id: Uuid) -> AppResult<HelpfulToggle> {
        let review = self.get_review(review_id)?;
        let helpful = !review.is_helpful_to(actor.user_id);

        let helpful_count = self
            .review_repo
            .set_helpful_vote(review_id, actor.user_id, helpful)?;

        self.event_bus.emit(ReviewHelpfulToggled::new(
            review_id,
            actor.user_id,
            helpful,
            helpful_count,
        ));

        Ok(HelpfulToggle {
            helpful,
            helpful_count,
        })
    }

    pub fn get_review(&self, review_id: Uuid) -> AppResult<Review> {
        self.review_repo
            .get_by_id(review_id)?
            .ok_or(AppError::NotFound)
    }

    pub fn list_movie_reviews(&self, movie_id: Uuid, query: &ReviewQuery) -> AppResult<MovieReviews> {
        if !self.movie_repo.exists(movie_id)? {
            return Err(AppError::NotFound);
        }

        let reviews = self.review_repo.list_by_movie(movie_id, query)?;
        let distribution = self.review_repo.rating_distribution(movie_id)?;

        Ok(MovieReviews {
            reviews,
            distribution,
        })
    }
}
