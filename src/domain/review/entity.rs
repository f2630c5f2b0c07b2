use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::domain::rating::Rating;

/// One user's review of one movie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Author; immutable
    pub user_id: Uuid,

    /// Reviewed movie; immutable
    pub movie_id: Uuid,

    pub rating: Rating,

    pub review_text: String,

    /// Users who marked this review helpful.
    /// The helpful count is always the size of this set.
    pub helpful: BTreeSet<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(user_id: Uuid, movie_id: Uuid, rating: Rating, review_text: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            movie_id,
            rating,
            review_text: review_text.trim().to_string(),
            helpful: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Edit rating and/or text.
    /// Returns true when the rating actually changed, which is what
    /// requires the movie aggregate to be recomputed.
    pub fn edit(&mut self, rating: Option<Rating>, review_text: Option<String>) -> bool {
        let rating_changed = match rating {
            Some(r) if r != self.rating => {
                self.rating = r;
                true
            }
            _ => false,
        };
        if let Some(text) = review_text {
            self.review_text = text.trim().to_string();
        }

        self.updated_at = Utc::now();
        rating_changed
    }

    /// Flip `user_id`'s membership in the helpful set.
    /// Returns true if the user now marks the review helpful.
    pub fn toggle_helpful(&mut self, user_id: Uuid) -> bool {
        if self.helpful.remove(&user_id) {
            false
        } else {
            self.helpful.insert(user_id);
            true
        }
    }

    pub fn is_helpful_to(&self, user_id: Uuid) -> bool {
        self.helpful.contains(&user_id)
    }

    pub fn helpful_count(&self) -> u32 {
        self.helpful.len() as u32
    }
}
