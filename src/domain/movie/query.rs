use serde::{Deserialize, Serialize};

use crate::domain::pagination::{PageRequest, SortOrder};
use crate::domain::{DomainError, DomainResult};

/// Catalogue listing criteria. Every filter is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieQuery {
    /// Exact genre tag
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    /// Inclusive bounds on the stored average, compared unrounded
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    /// Whitespace-separated terms; a movie matches if any term does
    pub search: Option<String>,
    pub sort_by: MovieSortField,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieSortField {
    Title,
    ReleaseYear,
    AverageRating,
    #[default]
    CreatedAt,
}

impl MovieSortField {
    pub fn column(self) -> &'static str {
        match self {
            MovieSortField::Title => "title",
            MovieSortField::ReleaseYear => "release_year",
            MovieSortField::AverageRating => "average_rating",
            MovieSortField::CreatedAt => "created_at",
        }
    }
}

impl std::str::FromStr for MovieSortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(MovieSortField::Title),
            "release_year" | "releaseYear" => Ok(MovieSortField::ReleaseYear),
            "average_rating" | "averageRating" => Ok(MovieSortField::AverageRating),
            "created_at" | "createdAt" => Ok(MovieSortField::CreatedAt),
            other => Err(DomainError::InvalidValue(format!(
                "invalid sort field '{}'",
                other
            ))),
        }
    }
}

/// Check a caller-supplied average-rating bound lies within 0..=5
pub fn rating_bound(value: f64) -> DomainResult<f64> {
    if !value.is_finite() || !(0.0..=5.0).contains(&value) {
        return Err(DomainError::InvalidValue(format!(
            "rating filter {} is outside 0..=5",
            value
        )));
    }
    Ok(value)
}

impl MovieQuery {
    pub fn new(page: PageRequest) -> Self {
        Self {
            genre: None,
            release_year: None,
            min_rating: None,
            max_rating: None,
            search: None,
            sort_by: MovieSortField::default(),
            sort_order: SortOrder::default(),
            page,
        }
    }

    /// Lowercased, non-empty search terms
    pub fn search_terms(&self) -> Vec<String> {
        self.search
            .as_deref()
            .map(|s| {
                s.split_whitespace()
                    .map(|term| term.to_lowercase())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Featured movies accompany only the unfiltered first page
    pub fn wants_featured(&self) -> bool {
        self.page.page == 1 && self.search_terms().is_empty() && self.genre.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_terms_split_and_lowercase() {
        let mut query = MovieQuery::new(PageRequest::first(12));
        query.search = Some("  Dark   KNIGHT ".to_string());
        assert_eq!(query.search_terms(), vec!["dark", "knight"]);
    }

    #[test]
    fn test_featured_only_on_plain_first_page() {
        let mut query = MovieQuery::new(PageRequest::first(12));
        assert!(query.wants_featured());

        query.genre = Some("Drama".to_string());
        assert!(!query.wants_featured());

        query.genre = None;
        query.page = PageRequest { page: 2, limit: 12 };
        assert!(!query.wants_featured());
    }

    #[test]
    fn test_sort_field_accepts_both_spellings() {
        assert_eq!(
            "averageRating".parse::<MovieSortField>().unwrap(),
            MovieSortField::AverageRating
        );
        assert_eq!(
            "release_year".parse::<MovieSortField>().unwrap(),
            MovieSortField::ReleaseYear
        );
        assert!("popularity".parse::<MovieSortField>().is_err());
    }

    #[test]
    fn test_rating_bound_keeps_precision() {
        assert_eq!(rating_bound(4.24).unwrap(), 4.24);
        assert_eq!(rating_bound(0.0).unwrap(), 0.0);
        assert_eq!(rating_bound(5.0).unwrap(), 5.0);
        assert!(rating_bound(5.01).is_err());
        assert!(rating_bound(-0.1).is_err());
        assert!(rating_bound(f64::NAN).is_err());
    }
}
