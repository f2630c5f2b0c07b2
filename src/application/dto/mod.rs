// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// - DTOs are caller-friendly, serializable representations
// - Ids are strings, timestamps RFC 3339 strings
// - Conversion FROM domain entities only (never TO); commands parse
//   incoming DTOs into service requests

use serde::{Deserialize, Serialize};

use crate::domain::{CastMember, Movie, Page, RatingDistribution, Review, User};
use crate::services::{HelpfulToggle, UserProfile, WatchlistItem};

// ============================================================================
// MOVIE DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMemberDto {
    pub name: String,
    pub character: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: String,
    pub title: String,
    pub genres: Vec<String>,
    pub release_year: i32,
    pub director: String,
    pub cast: Vec<CastMemberDto>,
    pub synopsis: String,
    pub poster_url: String,
    pub trailer_url: String,
    pub duration: u32,
    pub average_rating: f64,
    pub total_reviews: u32,
    pub tmdb_id: Option<String>,
    pub added_by: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMovieDto {
    pub title: String,
    pub genres: Vec<String>,
    pub release_year: i32,
    pub director: String,
    #[serde(default)]
    pub cast: Vec<CastMemberDto>,
    pub synopsis: String,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
    pub duration: u32,
    pub tmdb_id: Option<String>,
}

/// Absent fields are left unchanged. An empty `tmdb_id` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMovieDto {
    pub movie_id: String,
    pub title: Option<String>,
    pub genres: Option<Vec<String>>,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub cast: Option<Vec<CastMemberDto>>,
    pub synopsis: Option<String>,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
    pub duration: Option<u32>,
    pub tmdb_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseMoviesDto {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieListDto {
    pub movies: Vec<MovieDto>,
    pub pagination: PaginationDto,
    pub featured: Vec<MovieDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetailDto {
    pub movie: MovieDto,
    pub reviews: Vec<ReviewDto>,
}

// ============================================================================
// REVIEW DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDto {
    pub id: String,
    pub user_id: String,
    pub movie_id: String,
    pub rating: u8,
    pub review_text: String,
    /// Ids of users who marked the review helpful
    pub helpful: Vec<String>,
    pub helpful_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewDto {
    pub movie_id: String,
    pub rating: i64,
    pub review_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReviewDto {
    pub review_id: String,
    pub rating: Option<i64>,
    pub review_text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListReviewsDto {
    pub movie_id: String,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingCountDto {
    pub rating: u8,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewListDto {
    pub reviews: Vec<ReviewDto>,
    pub pagination: PaginationDto,
    /// Star values with at least one review, ascending
    pub rating_distribution: Vec<RatingCountDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpfulToggleDto {
    pub helpful: bool,
    pub helpful_count: u32,
    pub message: String,
}

// ============================================================================
// USER DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub profile_picture: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    pub username: String,
    pub email: String,
    /// Defaults to "user"
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    pub user_id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileDto {
    pub user: UserDto,
    pub review_count: u64,
    pub watchlist_count: u64,
    pub recent_reviews: Vec<ReviewDto>,
}

// ============================================================================
// WATCHLIST DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistItemDto {
    pub id: String,
    pub movie: MovieDto,
    pub date_added: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistDto {
    pub watchlist: Vec<WatchlistItemDto>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListWatchlistDto {
    pub user_id: String,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

// ============================================================================
// SHARED DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationDto {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

// ============================================================================
// CONVERSION HELPERS (Domain → DTO)
// ============================================================================

impl From<CastMember> for CastMemberDto {
    fn from(member: CastMember) -> Self {
        Self {
            name: member.name,
            character: member.character,
        }
    }
}

impl From<CastMemberDto> for CastMember {
    fn from(dto: CastMemberDto) -> Self {
        CastMember::new(dto.name, dto.character)
    }
}

impl From<Movie> for MovieDto {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id.to_string(),
            title: movie.title,
            genres: movie.genres,
            release_year: movie.release_year,
            director: movie.director,
            cast: movie.cast.into_iter().map(CastMemberDto::from).collect(),
            synopsis: movie.synopsis,
            poster_url: movie.poster_url,
            trailer_url: movie.trailer_url,
            duration: movie.duration,
            average_rating: movie.rating.average_rating.as_f64(),
            total_reviews: movie.rating.total_reviews,
            tmdb_id: movie.tmdb_id,
            added_by: movie.added_by.to_string(),
            created_at: movie.created_at.to_rfc3339(),
            updated_at: movie.updated_at.to_rfc3339(),
        }
    }
}

impl From<Review> for ReviewDto {
    fn from(review: Review) -> Self {
        Self {
            helpful_count: review.helpful_count(),
            id: review.id.to_string(),
            user_id: review.user_id.to_string(),
            movie_id: review.movie_id.to_string(),
            rating: review.rating.value(),
            review_text: review.review_text,
            helpful: review.helpful.iter().map(|id| id.to_string()).collect(),
            created_at: review.created_at.to_rfc3339(),
            updated_at: review.updated_at.to_rfc3339(),
        }
    }
}

impl From<HelpfulToggle> for HelpfulToggleDto {
    fn from(toggle: HelpfulToggle) -> Self {
        let message = if toggle.helpful {
            "Marked as helpful"
        } else {
            "Removed from helpful"
        };
        Self {
            helpful: toggle.helpful,
            helpful_count: toggle.helpful_count,
            message: message.to_string(),
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            profile_picture: user.profile_picture,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

impl From<UserProfile> for UserProfileDto {
    fn from(profile: UserProfile) -> Self {
        Self {
            user: profile.user.into(),
            review_count: profile.review_count,
            watchlist_count: profile.watchlist_count,
            recent_reviews: profile
                .recent_reviews
                .into_iter()
                .map(ReviewDto::from)
                .collect(),
        }
    }
}

impl From<WatchlistItem> for WatchlistItemDto {
    fn from(item: WatchlistItem) -> Self {
        Self {
            id: item.entry.id.to_string(),
            movie: item.movie.into(),
            date_added: item.entry.date_added.to_rfc3339(),
        }
    }
}

impl<T> From<&Page<T>> for PaginationDto {
    fn from(page: &Page<T>) -> Self {
        Self {
            current_page: page.page,
            total_pages: page.total_pages(),
            total_items: page.total_items,
            has_next: page.has_next(),
            has_prev: page.has_prev(),
        }
    }
}

pub fn rating_counts(distribution: &RatingDistribution) -> Vec<RatingCountDto> {
    distribution
        .entries()
        .into_iter()
        .map(|(rating, count)| RatingCountDto {
            rating: rating.value(),
            count,
        })
        .collect()
}
