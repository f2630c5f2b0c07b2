use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A movie a user intends to watch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub movie_id: Uuid,
    pub date_added: DateTime<Utc>,
}

impl WatchlistEntry {
    pub fn new(user_id: Uuid, movie_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            movie_id,
            date_added: Utc::now(),
        }
    }
}
