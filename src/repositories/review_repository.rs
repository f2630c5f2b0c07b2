// src/repositories/review_repository.rs
//
// Reviews and their helpful votes. A review's helpful set is read back
// from review_helpful_votes; `save` never touches the votes.

use rusqlite::{params, OptionalExtension, Row};
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

use super::{json_column, timestamp_column, to_timestamp, unique_violation, uuid_column};
use crate::db::ConnectionPool;
use crate::domain::pagination::Page;
use crate::domain::rating::{Rating, RatingDistribution};
use crate::domain::review::{Review, ReviewQuery};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait ReviewRepository: Send + Sync {
    fn save(&self, review: &Review) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Review>>;
    fn find_by_user_and_movie(&self, user_id: Uuid, movie_id: Uuid) -> AppResult<Option<Review>>;
    /// Every current rating of a movie, read in one statement
    fn ratings_for_movie(&self, movie_id: Uuid) -> AppResult<Vec<Rating>>;
    fn list_by_movie(&self, movie_id: Uuid, query: &ReviewQuery) -> AppResult<Page<Review>>;
    /// Every review of a movie, newest first
    fn list_all_by_movie(&self, movie_id: Uuid) -> AppResult<Vec<Review>>;
    fn rating_distribution(&self, movie_id: Uuid) -> AppResult<RatingDistribution>;
    /// Newest first
    fn list_recent_by_user(&self, user_id: Uuid, limit: u32) -> AppResult<Vec<Review>>;
    fn count_by_user(&self, user_id: Uuid) -> AppResult<u64>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
    /// Add or remove one user's helpful vote; returns the new vote count
    fn set_helpful_vote(&self, review_id: Uuid, user_id: Uuid, helpful: bool) -> AppResult<u32>;
}

pub struct SqliteReviewRepository {
    pool: Arc<ConnectionPool>,
}

const REVIEW_COLUMNS: &str = "id, user_id, movie_id, rating, review_text, created_at, updated_at,
     (SELECT json_group_array(v.user_id) FROM review_helpful_votes v
      WHERE v.review_id = reviews.id) AS helpful_voters,
     (SELECT COUNT(*) FROM review_helpful_votes v
      WHERE v.review_id = reviews.id) AS helpful_count";

impl SqliteReviewRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_review(row: &Row) -> Result<Review, rusqlite::Error> {
        let rating: i64 = row.get("rating")?;
        let rating =
            Rating::new(rating).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let helpful: BTreeSet<Uuid> = json_column(row, "helpful_voters")?;

        Ok(Review {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            movie_id: uuid_column(row, "movie_id")?,
            rating,
            review_text: row.get("review_text")?,
            helpful,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }
}

impl ReviewRepository for SqliteReviewRepository {
    fn save(&self, review: &Review) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO reviews (id, user_id, movie_id, rating, review_text, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                rating = excluded.rating,
                review_text = excluded.review_text,
                updated_at = excluded.updated_at",
            params![
                review.id.to_string(),
                review.user_id.to_string(),
                review.movie_id.to_string(),
                review.rating.value() as i64,
                review.review_text,
                to_timestamp(&review.created_at),
                to_timestamp(&review.updated_at),
            ],
        )
        .map_err(|e| unique_violation(e, "You have already reviewed this movie"))?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        let conn = self.pool.get()?;

        let review = conn
            .query_row(
                &format!("SELECT {} FROM reviews WHERE id = ?1", REVIEW_COLUMNS),
                params![id.to_string()],
                Self::row_to_review,
            )
            .optional()?;

        Ok(review)
    }

    fn find_by_user_and_movie(&self, user_id: Uuid, movie_id: Uuid) -> AppResult<Option<Review>> {
        let conn = self.pool.get()?;

        let review = conn
            .query_row(
                &format!(
                    "SELECT {} FROM reviews WHERE user_id = ?1 AND movie_id = ?2",
                    REVIEW_COLUMNS
                ),
                params![user_id.to_string(), movie_id.to_string()],
                Self::row_to_review,
            )
            .optional()?;

        Ok(review)
    }

    fn ratings_for_movie(&self, movie_id: Uuid) -> AppResult<Vec<Rating>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT rating FROM reviews WHERE movie_id = ?1")?;
        let raw: Vec<i64> = stmt
            .query_map(params![movie_id.to_string()], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let ratings = raw
            .into_iter()
            .map(Rating::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ratings)
    }

    fn list_by_movie(&self, movie_id: Uuid, query: &ReviewQuery) -> AppResult<Page<Review>> {
        let conn = self.pool.get()?;

        let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM reviews WHERE movie_id = ?1",
            params![movie_id.to_string()],
            |row| row.get(0),
        )?;

        let sql = format!(
            "SELECT {} FROM reviews WHERE movie_id = ?1
             ORDER BY {} {}, created_at DESC, id ASC
             LIMIT ?2 OFFSET ?3",
            REVIEW_COLUMNS,
            query.sort_by.column(),
            query.sort_order.as_sql()
        );

        let mut stmt = conn.prepare(&sql)?;
        let reviews: Vec<Review> = stmt
            .query_map(
                params![
                    movie_id.to_string(),
                    query.page.limit as i64,
                    query.page.offset() as i64
                ],
                Self::row_to_review,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(reviews, query.page, total as u64))
    }

    fn list_all_by_movie(&self, movie_id: Uuid) -> AppResult<Vec<Review>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM reviews WHERE movie_id = ?1 ORDER BY created_at DESC, id ASC",
            REVIEW_COLUMNS
        ))?;

        let reviews: Vec<Review> = stmt
            .query_map(params![movie_id.to_string()], Self::row_to_review)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(reviews)
    }

    fn rating_distribution(&self, movie_id: Uuid) -> AppResult<RatingDistribution> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT rating, COUNT(*) FROM reviews WHERE movie_id = ?1 GROUP BY rating",
        )?;
        let rows: Vec<(i64, i64)> = stmt
            .query_map(params![movie_id.to_string()], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut counts = Vec::with_capacity(rows.len());
        for (rating, count) in rows {
            counts.push((Rating::new(rating)?, count as u32));
        }

        Ok(RatingDistribution::from_counts(counts))
    }

    fn list_recent_by_user(&self, user_id: Uuid, limit: u32) -> AppResult<Vec<Review>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM reviews WHERE user_id = ?1
             ORDER BY created_at DESC, id ASC LIMIT ?2",
            REVIEW_COLUMNS
        ))?;

        let reviews: Vec<Review> = stmt
            .query_map(params![user_id.to_string(), limit as i64], Self::row_to_review)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(reviews)
    }

    fn count_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM reviews WHERE user_id = ?1",
            params![user_id.to_string()],
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected =
            conn.execute("DELETE FROM reviews WHERE id = ?1", params![id.to_string()])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn set_helpful_vote(&self, review_id: Uuid, user_id: Uuid, helpful: bool) -> AppResult<u32> {
        let conn = self.pool.get()?;

        if helpful {
            conn.execute(
                "INSERT OR IGNORE INTO review_helpful_votes (review_id, user_id) VALUES (?1, ?2)",
                params![review_id.to_string(), user_id.to_string()],
            )?;
        } else {
            conn.execute(
                "DELETE FROM review_helpful_votes WHERE review_id = ?1 AND user_id = ?2",
                params![review_id.to_string(), user_id.to_string()],
            )?;
        }

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM review_helpful_votes WHERE review_id = ?1",
            params![review_id.to_string()],
            |row| row.get(0),
        )?;

        Ok(count as u32)
    }
}
