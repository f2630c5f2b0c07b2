use serde::{Deserialize, Serialize};

use crate::domain::pagination::{PageRequest, SortOrder};
use crate::domain::DomainError;

/// Listing criteria for a movie's reviews
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewQuery {
    pub sort_by: ReviewSortField,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSortField {
    #[default]
    CreatedAt,
    Rating,
    HelpfulCount,
}

impl ReviewSortField {
    pub fn column(self) -> &'static str {
        match self {
            ReviewSortField::CreatedAt => "created_at",
            ReviewSortField::Rating => "rating",
            ReviewSortField::HelpfulCount => "helpful_count",
        }
    }
}

impl std::str::FromStr for ReviewSortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" | "createdAt" => Ok(ReviewSortField::CreatedAt),
            "rating" => Ok(ReviewSortField::Rating),
            "helpful_count" | "helpfulCount" => Ok(ReviewSortField::HelpfulCount),
            other => Err(DomainError::InvalidValue(format!(
                "invalid sort field '{}'",
                other
            ))),
        }
    }
}

impl ReviewQuery {
    pub fn new(page: PageRequest) -> Self {
        Self {
            sort_by: ReviewSortField::default(),
            sort_order: SortOrder::default(),
            page,
        }
    }
}
