use chrono::{Datelike, Utc};

use super::entity::Movie;
use crate::domain::validation::{is_valid_media_url, require_length, require_non_blank};
use crate::domain::{DomainError, DomainResult};

pub const EARLIEST_RELEASE_YEAR: i32 = 1900;
/// Announced films may be listed this many years ahead
pub const RELEASE_YEAR_LOOKAHEAD: i32 = 5;
pub const SYNOPSIS_MAX_LEN: usize = 2000;

/// Validates all Movie invariants
pub fn validate_movie(movie: &Movie) -> DomainResult<()> {
    require_non_blank("Title", &movie.title)?;
    require_non_blank("Director", &movie.director)?;
    validate_genres(&movie.genres)?;
    validate_release_year(movie.release_year)?;
    validate_synopsis(&movie.synopsis)?;
    validate_duration(movie.duration)?;
    validate_cast(movie)?;
    validate_urls(movie)?;
    validate_rating(movie)?;
    Ok(())
}

fn validate_genres(genres: &[String]) -> DomainResult<()> {
    if genres.is_empty() {
        return Err(DomainError::InvariantViolation(
            "At least one genre is required".to_string(),
        ));
    }
    for genre in genres {
        require_non_blank("Genre", genre)?;
    }
    Ok(())
}

fn validate_release_year(year: i32) -> DomainResult<()> {
    let latest = Utc::now().year() + RELEASE_YEAR_LOOKAHEAD;
    if year < EARLIEST_RELEASE_YEAR || year > latest {
        return Err(DomainError::InvariantViolation(format!(
            "Release year {} must be between {} and {}",
            year, EARLIEST_RELEASE_YEAR, latest
        )));
    }
    Ok(())
}

fn validate_synopsis(synopsis: &str) -> DomainResult<()> {
    require_non_blank("Synopsis", synopsis)?;
    require_length("Synopsis", synopsis, 1, SYNOPSIS_MAX_LEN)
}

fn validate_duration(duration: u32) -> DomainResult<()> {
    if duration == 0 {
        return Err(DomainError::InvariantViolation(
            "Duration must be a positive number of minutes".to_string(),
        ));
    }
    Ok(())
}

fn validate_cast(movie: &Movie) -> DomainResult<()> {
    for member in &movie.cast {
        require_non_blank("Cast member name", &member.name)?;
    }
    Ok(())
}

fn validate_urls(movie: &Movie) -> DomainResult<()> {
    if !is_valid_media_url(&movie.poster_url) {
        return Err(DomainError::InvariantViolation(
            "Poster URL must be valid".to_string(),
        ));
    }
    if !is_valid_media_url(&movie.trailer_url) {
        return Err(DomainError::InvariantViolation(
            "Trailer URL must be valid".to_string(),
        ));
    }
    Ok(())
}

/// No reviews <=> zero average
fn validate_rating(movie: &Movie) -> DomainResult<()> {
    if !movie.rating.is_consistent() {
        return Err(DomainError::InvariantViolation(format!(
            "Average rating {} does not match {} reviews",
            movie.rating.average_rating, movie.rating.total_reviews
        )));
    }
    Ok(())
}

/// Critical Movie Invariants:
///
/// 1. Title, director and synopsis are non-empty
/// 2. At least one genre
/// 3. Release year within 1900..=current year + 5
/// 4. Duration is positive
/// 5. Media URLs are empty or valid
/// 6. average_rating == 0 exactly when total_reviews == 0
/// 7. Derived fields change only through a recompute
/// 8. Deleting a movie deletes its reviews
