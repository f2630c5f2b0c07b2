// src/repositories/watchlist_repository.rs

use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;
use uuid::Uuid;

use super::{timestamp_column, to_timestamp, unique_violation, uuid_column};
use crate::db::ConnectionPool;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::watchlist::WatchlistEntry;
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait WatchlistRepository: Send + Sync {
    fn add(&self, entry: &WatchlistEntry) -> AppResult<()>;
    fn find(&self, user_id: Uuid, movie_id: Uuid) -> AppResult<Option<WatchlistEntry>>;
    /// Returns false when there was nothing to remove
    fn remove(&self, user_id: Uuid, movie_id: Uuid) -> AppResult<bool>;
    /// Most recently added first
    fn list_by_user(&self, user_id: Uuid, page: PageRequest) -> AppResult<Page<WatchlistEntry>>;
    fn count_by_user(&self, user_id: Uuid) -> AppResult<u64>;
}

pub struct SqliteWatchlistRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteWatchlistRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &Row) -> Result<WatchlistEntry, rusqlite::Error> {
        Ok(WatchlistEntry {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            movie_id: uuid_column(row, "movie_id")?,
            date_added: timestamp_column(row, "date_added")?,
        })
    }
}

impl WatchlistRepository for SqliteWatchlistRepository {
    fn add(&self, entry: &WatchlistEntry) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO watchlist_entries (id, user_id, movie_id, date_added)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.id.to_string(),
                entry.user_id.to_string(),
                entry.movie_id.to_string(),
                to_timestamp(&entry.date_added),
            ],
        )
        .map_err(|e| unique_violation(e, "Movie already in watchlist"))?;

        Ok(())
    }

    fn find(&self, user_id: Uuid, movie_id: Uuid) -> AppResult<Option<WatchlistEntry>> {
        let conn = self.pool.get()?;

        let entry = conn
            .query_row(
                "SELECT id, user_id, movie_id, date_added FROM watchlist_entries
                 WHERE user_id = ?1 AND movie_id = ?2",
                params![user_id.to_string(), movie_id.to_string()],
                Self::row_to_entry,
            )
            .optional()?;

        Ok(entry)
    }

    fn remove(&self, user_id: Uuid, movie_id: Uuid) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "DELETE FROM watchlist_entries WHERE user_id = ?1 AND movie_id = ?2",
            params![user_id.to_string(), movie_id.to_string()],
        )?;

        Ok(rows_affected > 0)
    }

    fn list_by_user(&self, user_id: Uuid, page: PageRequest) -> AppResult<Page<WatchlistEntry>> {
        let total = self.count_by_user(user_id)?;
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, user_id, movie_id, date_added FROM watchlist_entries
             WHERE user_id = ?1
             ORDER BY date_added DESC, id ASC
             LIMIT ?2 OFFSET ?3",
        )?;

        let entries: Vec<WatchlistEntry> = stmt
            .query_map(
                params![user_id.to_string(), page.limit as i64, page.offset() as i64],
                Self::row_to_entry,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(entries, page, total))
    }

    fn count_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM watchlist_entries WHERE user_id = ?1",
            params![user_id.to_string()],
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }
}
