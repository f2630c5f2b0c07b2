// src/repositories/user_repository.rs

use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;
use uuid::Uuid;

use super::{timestamp_column, to_timestamp, unique_violation, uuid_column};
use crate::db::ConnectionPool;
use crate::domain::user::{Role, User};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    fn save(&self, user: &User) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    fn exists(&self, id: Uuid) -> AppResult<bool>;
}

pub struct SqliteUserRepository {
    pool: Arc<ConnectionPool>,
}

const USER_COLUMNS: &str =
    "id, username, email, role, profile_picture, created_at, updated_at";

impl SqliteUserRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
        let role_str: String = row.get("role")?;
        let role: Role = role_str
            .parse()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(User {
            id: uuid_column(row, "id")?,
            username: row.get("username")?,
            email: row.get("email")?,
            role,
            profile_picture: row.get("profile_picture")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }

    fn find_one(&self, column: &str, value: &str) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;

        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE {} = ?1", USER_COLUMNS, column),
                params![value],
                Self::row_to_user,
            )
            .optional()?;

        Ok(user)
    }
}

impl UserRepository for SqliteUserRepository {
    fn save(&self, user: &User) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO users (id, username, email, role, profile_picture, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                username = excluded.username,
                email = excluded.email,
                role = excluded.role,
                profile_picture = excluded.profile_picture,
                updated_at = excluded.updated_at",
            params![
                user.id.to_string(),
                user.username,
                user.email,
                user.role.to_string(),
                user.profile_picture,
                to_timestamp(&user.created_at),
                to_timestamp(&user.updated_at),
            ],
        )
        .map_err(|e| unique_violation(e, "Username or email already in use"))?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.find_one("id", &id.to_string())
    }

    fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.find_one("username", username)
    }

    fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.find_one("email", email)
    }

    fn exists(&self, id: Uuid) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE id = ?1",
            params![id.to_string()],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::migrated_pool;
    use crate::error::AppError;

    #[test]
    fn test_save_and_find() {
        let (_dir, pool) = migrated_pool();
        let repo = SqliteUserRepository::new(pool);

        let user = User::new("critic".to_string(), "critic@example.com".to_string(), Role::User);
        repo.save(&user).unwrap();

        let by_id = repo.get_by_id(user.id).unwrap().unwrap();
        assert_eq!(by_id.username, "critic");
        assert_eq!(by_id.role, Role::User);

        assert!(repo.find_by_username("critic").unwrap().is_some());
        assert!(repo.find_by_email("critic@example.com").unwrap().is_some());
        assert!(repo.find_by_email("nobody@example.com").unwrap().is_none());
        assert!(repo.exists(user.id).unwrap());
    }

    #[test]
    fn test_duplicate_username_is_conflict() {
        let (_dir, pool) = migrated_pool();
        let repo = SqliteUserRepository::new(pool);

        repo.save(&User::new("critic".to_string(), "a@example.com".to_string(), Role::User))
            .unwrap();
        let err = repo
            .save(&User::new("critic".to_string(), "b@example.com".to_string(), Role::User))
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_save_updates_existing_row() {
        let (_dir, pool) = migrated_pool();
        let repo = SqliteUserRepository::new(pool);

        let mut user = User::new("critic".to_string(), "a@example.com".to_string(), Role::User);
        repo.save(&user).unwrap();

        user.update_profile(Some("critic_two".to_string()), None, None);
        repo.save(&user).unwrap();

        let stored = repo.get_by_id(user.id).unwrap().unwrap();
        assert_eq!(stored.username, "critic_two");
        assert_eq!(to_timestamp(&stored.created_at), to_timestamp(&user.created_at));
    }
}
