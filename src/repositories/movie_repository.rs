// src/repositories/movie_repository.rs
//
// Movie persistence. The rating columns are written only by
// `update_rating_summary`; `save` leaves them alone on update.

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use std::sync::Arc;
use uuid::Uuid;

use super::{json_column, like_pattern, timestamp_column, to_timestamp, unique_violation, uuid_column};
use crate::db::ConnectionPool;
use crate::domain::movie::{Movie, MovieQuery};
use crate::domain::pagination::Page;
use crate::domain::rating::{AverageRating, RatingSummary};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait MovieRepository: Send + Sync {
    fn save(&self, movie: &Movie) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Movie>>;
    fn exists(&self, id: Uuid) -> AppResult<bool>;
    /// Deletes the movie; reviews and watchlist entries cascade
    fn delete(&self, id: Uuid) -> AppResult<()>;
    /// Another movie with the same title and year, or the same tmdb id
    fn find_duplicate(&self, movie: &Movie) -> AppResult<Option<Uuid>>;
    fn search(&self, query: &MovieQuery) -> AppResult<Page<Movie>>;
    fn list_featured(&self, min_reviews: u32, limit: u32) -> AppResult<Vec<Movie>>;
    fn list_genres(&self) -> AppResult<Vec<String>>;
    fn list_ids(&self) -> AppResult<Vec<Uuid>>;
    fn count(&self) -> AppResult<u64>;
    /// Overwrite the derived fields with absolute values
    fn update_rating_summary(&self, id: Uuid, summary: &RatingSummary) -> AppResult<()>;
}

pub struct SqliteMovieRepository {
    pool: Arc<ConnectionPool>,
}

const MOVIE_COLUMNS: &str = "id, title, genres, release_year, director, cast_members, synopsis,
     poster_url, trailer_url, duration, average_rating, total_reviews, tmdb_id, added_by,
     created_at, updated_at";

impl SqliteMovieRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_movie(row: &Row) -> Result<Movie, rusqlite::Error> {
        let duration: i64 = row.get("duration")?;
        let total_reviews: i64 = row.get("total_reviews")?;
        let average: f64 = row.get("average_rating")?;
        let average_rating = AverageRating::from_f64(average)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Movie {
            id: uuid_column(row, "id")?,
            title: row.get("title")?,
            genres: json_column(row, "genres")?,
            release_year: row.get("release_year")?,
            director: row.get("director")?,
            cast: json_column(row, "cast_members")?,
            synopsis: row.get("synopsis")?,
            poster_url: row.get("poster_url")?,
            trailer_url: row.get("trailer_url")?,
            duration: duration as u32,
            rating: RatingSummary {
                average_rating,
                total_reviews: total_reviews as u32,
            },
            tmdb_id: row.get("tmdb_id")?,
            added_by: uuid_column(row, "added_by")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }

    /// WHERE clause and its positional arguments for a catalogue query
    fn filter_clause(query: &MovieQuery) -> (String, Vec<Value>) {
        let mut clauses: Vec<String> = Vec::new();
        let mut args: Vec<Value> = Vec::new();

        if let Some(genre) = &query.genre {
            clauses.push(
                "EXISTS (SELECT 1 FROM json_each(movies.genres) g WHERE g.value = ?)".to_string(),
            );
            args.push(Value::Text(genre.clone()));
        }
        if let Some(year) = query.release_year {
            clauses.push("release_year = ?".to_string());
            args.push(Value::Integer(year as i64));
        }
        if let Some(min) = query.min_rating {
            clauses.push("average_rating >= ?".to_string());
            args.push(Value::Real(min));
        }
        if let Some(max) = query.max_rating {
            clauses.push("average_rating <= ?".to_string());
            args.push(Value::Real(max));
        }

        let terms = query.search_terms();
        if !terms.is_empty() {
            let mut any_term = Vec::with_capacity(terms.len());
            for term in &terms {
                any_term.push(
                    "(LOWER(title) LIKE ? ESCAPE '\\' OR LOWER(director) LIKE ? ESCAPE '\\'
                      OR EXISTS (SELECT 1 FROM json_each(movies.genres) g
                                 WHERE LOWER(g.value) LIKE ? ESCAPE '\\'))",
                );
                let pattern = like_pattern(term);
                for _ in 0..3 {
                    args.push(Value::Text(pattern.clone()));
                }
            }
            clauses.push(format!("({})", any_term.join(" OR ")));
        }

        if clauses.is_empty() {
            (String::new(), args)
        } else {
            (format!("WHERE {}", clauses.join(" AND ")), args)
        }
    }
}

impl MovieRepository for SqliteMovieRepository {
    fn save(&self, movie: &Movie) -> AppResult<()> {
        let conn = self.pool.get()?;

        let genres_json = serde_json::to_string(&movie.genres)?;
        let cast_json = serde_json::to_string(&movie.cast)?;

        conn.execute(
            "INSERT INTO movies (
                id, title, genres, release_year, director, cast_members, synopsis,
                poster_url, trailer_url, duration, average_rating, total_reviews,
                tmdb_id, added_by, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                genres = excluded.genres,
                release_year = excluded.release_year,
                director = excluded.director,
                cast_members = excluded.cast_members,
                synopsis = excluded.synopsis,
                poster_url = excluded.poster_url,
                trailer_url = excluded.trailer_url,
                duration = excluded.duration,
                tmdb_id = excluded.tmdb_id,
                updated_at = excluded.updated_at",
            params![
                movie.id.to_string(),
                movie.title,
                genres_json,
                movie.release_year,
                movie.director,
                cast_json,
                movie.synopsis,
                movie.poster_url,
                movie.trailer_url,
                movie.duration as i64,
                movie.rating.average_rating.as_f64(),
                movie.rating.total_reviews as i64,
                movie.tmdb_id,
                movie.added_by.to_string(),
                to_timestamp(&movie.created_at),
                to_timestamp(&movie.updated_at),
            ],
        )
        .map_err(|e| unique_violation(e, "Movie already exists"))?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Movie>> {
        let conn = self.pool.get()?;

        let movie = conn
            .query_row(
                &format!("SELECT {} FROM movies WHERE id = ?1", MOVIE_COLUMNS),
                params![id.to_string()],
                Self::row_to_movie,
            )
            .optional()?;

        Ok(movie)
    }

    fn exists(&self, id: Uuid) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM movies WHERE id = ?1",
            params![id.to_string()],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected =
            conn.execute("DELETE FROM movies WHERE id = ?1", params![id.to_string()])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn find_duplicate(&self, movie: &Movie) -> AppResult<Option<Uuid>> {
        let conn = self.pool.get()?;

        let id = conn
            .query_row(
                "SELECT id FROM movies
                 WHERE id != ?1
                   AND ((title = ?2 AND release_year = ?3)
                        OR (?4 IS NOT NULL AND tmdb_id = ?4))
                 LIMIT 1",
                params![
                    movie.id.to_string(),
                    movie.title,
                    movie.release_year,
                    movie.tmdb_id
                ],
                |row| uuid_column(row, "id"),
            )
            .optional()?;

        Ok(id)
    }

    fn search(&self, query: &MovieQuery) -> AppResult<Page<Movie>> {
        let conn = self.pool.get()?;
        let (where_clause, args) = Self::filter_clause(query);

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM movies {}", where_clause),
            params_from_iter(args.iter()),
            |row| row.get(0),
        )?;

        let sql = format!(
            "SELECT {} FROM movies {} ORDER BY {} {}, id ASC LIMIT ? OFFSET ?",
            MOVIE_COLUMNS,
            where_clause,
            query.sort_by.column(),
            query.sort_order.as_sql()
        );

        let mut page_args = args;
        page_args.push(Value::Integer(query.page.limit as i64));
        page_args.push(Value::Integer(query.page.offset() as i64));

        let mut stmt = conn.prepare(&sql)?;
        let movies: Vec<Movie> = stmt
            .query_map(params_from_iter(page_args.iter()), Self::row_to_movie)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(movies, query.page, total as u64))
    }

    fn list_featured(&self, min_reviews: u32, limit: u32) -> AppResult<Vec<Movie>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM movies
             WHERE total_reviews >= ?1
             ORDER BY average_rating DESC, total_reviews DESC, id ASC
             LIMIT ?2",
            MOVIE_COLUMNS
        ))?;

        let movies: Vec<Movie> = stmt
            .query_map(params![min_reviews as i64, limit as i64], Self::row_to_movie)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(movies)
    }

    fn list_genres(&self) -> AppResult<Vec<String>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT DISTINCT g.value FROM movies, json_each(movies.genres) g ORDER BY g.value",
        )?;

        let genres: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(genres)
    }

    fn list_ids(&self) -> AppResult<Vec<Uuid>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id FROM movies ORDER BY created_at")?;

        let ids: Vec<Uuid> = stmt
            .query_map([], |row| uuid_column(row, "id"))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ids)
    }

    fn count(&self) -> AppResult<u64> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn update_rating_summary(&self, id: Uuid, summary: &RatingSummary) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE movies SET average_rating = ?1, total_reviews = ?2 WHERE id = ?3",
            params![
                summary.average_rating.as_f64(),
                summary.total_reviews as i64,
                id.to_string()
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
