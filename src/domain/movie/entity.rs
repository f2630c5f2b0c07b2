use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::rating::RatingSummary;

/// A film in the catalogue.
/// `rating` is derived from the movie's reviews and only the aggregate
/// updater writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    /// Internal immutable identifier
    pub id: Uuid,

    pub title: String,

    /// Genre tags, at least one
    pub genres: Vec<String>,

    pub release_year: i32,

    pub director: String,

    pub cast: Vec<CastMember>,

    pub synopsis: String,

    /// Empty when unknown
    pub poster_url: String,

    /// Empty when unknown
    pub trailer_url: String,

    /// Running time in minutes
    pub duration: u32,

    /// Derived aggregate (average rating, total reviews)
    pub rating: RatingSummary,

    /// External catalogue identifier (TMDB), unique when present
    pub tmdb_id: Option<String>,

    /// Admin who added the movie
    pub added_by: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    pub character: String,
}

impl CastMember {
    pub fn new(name: impl Into<String>, character: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            character: character.into(),
        }
    }
}

/// Partial update of the editable (non-derived) movie fields
#[derive(Debug, Clone, Default)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub genres: Option<Vec<String>>,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub cast: Option<Vec<CastMember>>,
    pub synopsis: Option<String>,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
    pub duration: Option<u32>,
    pub tmdb_id: Option<Option<String>>,
}

impl Movie {
    /// Create a new Movie with an empty rating summary
    pub fn new(
        title: String,
        genres: Vec<String>,
        release_year: i32,
        director: String,
        synopsis: String,
        duration: u32,
        added_by: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            genres,
            release_year,
            director: director.trim().to_string(),
            cast: Vec::new(),
            synopsis,
            poster_url: String::new(),
            trailer_url: String::new(),
            duration,
            rating: RatingSummary::empty(),
            tmdb_id: None,
            added_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update
    /// This preserves the creation timestamp and the derived rating
    pub fn apply(&mut self, patch: MoviePatch) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(genres) = patch.genres {
            self.genres = genres;
        }
        if let Some(year) = patch.release_year {
            self.release_year = year;
        }
        if let Some(director) = patch.director {
            self.director = director.trim().to_string();
        }
        if let Some(cast) = patch.cast {
            self.cast = cast;
        }
        if let Some(synopsis) = patch.synopsis {
            self.synopsis = synopsis;
        }
        if let Some(poster) = patch.poster_url {
            self.poster_url = poster;
        }
        if let Some(trailer) = patch.trailer_url {
            self.trailer_url = trailer;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(tmdb_id) = patch.tmdb_id {
            self.tmdb_id = tmdb_id;
        }

        self.updated_at = Utc::now();
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

impl std::fmt::Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.release_year)
    }
}
