use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// A platform account. Credentials live outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Public handle, unique across users
    pub username: String,

    /// Contact address, stored lowercase, unique across users
    pub email: String,

    pub role: Role,

    /// Empty when the user has no picture
    pub profile_picture: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl User {
    pub fn new(username: String, email: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.trim().to_string(),
            email: normalize_email(&email),
            role,
            profile_picture: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Update profile fields
    /// Role and identity are not editable here
    pub fn update_profile(
        &mut self,
        username: Option<String>,
        email: Option<String>,
        profile_picture: Option<String>,
    ) {
        if let Some(u) = username {
            self.username = u.trim().to_string();
        }
        if let Some(e) = email {
            self.email = normalize_email(&e);
        }
        if let Some(p) = profile_picture {
            self.profile_picture = p;
        }

        self.updated_at = Utc::now();
    }

    /// The identity this user acts under
    pub fn as_actor(&self) -> Actor {
        Actor {
            user_id: self.id,
            role: self.role,
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// The already-authenticated caller of a mutating operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn user(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: Role::User,
        }
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::InvalidValue(format!("unknown role '{}'", other))),
        }
    }
}
