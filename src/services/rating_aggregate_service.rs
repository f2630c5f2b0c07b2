// src/services/rating_aggregate_service.rs
//
// Movie aggregate updater.
//
// A movie's average_rating and total_reviews are a cache over its
// reviews. Every recompute reads the full current set of ratings and
// writes absolute values, so running it twice, or racing two of them,
// cannot leave the movie in a state no review set produces.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::rating::RatingSummary;
use crate::error::AppResult;
use crate::events::{EventBus, MovieRatingRecomputed};
use crate::repositories::{MovieRepository, ReviewRepository};

/// Outcome of a full repair pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecomputeReport {
    pub recomputed: usize,
    pub failed: Vec<Uuid>,
}

pub struct RatingAggregateService {
    review_repo: Arc<dyn ReviewRepository>,
    movie_repo: Arc<dyn MovieRepository>,
    event_bus: Arc<EventBus>,
}

impl RatingAggregateService {
    pub fn new(
        review_repo: Arc<dyn ReviewRepository>,
        movie_repo: Arc<dyn MovieRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            review_repo,
            movie_repo,
            event_bus,
        }
    }

    /// Recompute and persist the rating summary of one movie.
    /// Returns the summary that was written.
    pub fn recompute_rating(&self, movie_id: Uuid) -> AppResult<RatingSummary> {
        let result = self.recompute_inner(movie_id);

        match &result {
            Ok(summary) => {
                log::debug!(
                    "movie {}: average {} over {} reviews",
                    movie_id,
                    summary.average_rating,
                    summary.total_reviews
                );
                self.event_bus.emit(MovieRatingRecomputed::new(
                    movie_id,
                    summary.average_rating.as_f64(),
                    summary.total_reviews,
                ));
            }
            Err(e) => log::error!("rating recompute for movie {} failed: {}", movie_id, e),
        }

        result
    }

    fn recompute_inner(&self, movie_id: Uuid) -> AppResult<RatingSummary> {
        let ratings = self.review_repo.ratings_for_movie(movie_id)?;
        let summary = RatingSummary::from_ratings(&ratings);
        self.movie_repo.update_rating_summary(movie_id, &summary)?;
        Ok(summary)
    }

    /// Recompute every movie. A failure on one movie is recorded and the
    /// pass continues; failing to list the movies aborts it.
    pub fn recompute_all(&self) -> AppResult<RecomputeReport> {
        let ids = self.movie_repo.list_ids()?;
        let mut report = RecomputeReport::default();

        for id in ids {
            match self.recompute_rating(id) {
                Ok(_) => report.recomputed += 1,
                Err(_) => report.failed.push(id),
            }
        }

        log::info!(
            "recomputed ratings for {} movies ({} failed)",
            report.recomputed,
            report.failed.len()
        );

        Ok(report)
    }
}
