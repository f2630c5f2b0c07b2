// src/domain/pagination.rs
//
// Page requests and page results shared by every listing

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Ascending or descending order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DomainError::InvalidValue(format!(
                "sort order must be asc or desc, got '{}'",
                other
            ))),
        }
    }
}

/// One-based page number plus page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Validates page >= 1 and 1 <= limit <= max_limit
    pub fn new(page: u32, limit: u32, max_limit: u32) -> DomainResult<Self> {
        if page == 0 {
            return Err(DomainError::InvalidValue(
                "page must be a positive integer".to_string(),
            ));
        }
        if limit == 0 || limit > max_limit {
            return Err(DomainError::InvalidValue(format!(
                "limit must be between 1 and {}",
                max_limit
            )));
        }
        Ok(Self { page, limit })
    }

    pub fn first(limit: u32) -> Self {
        Self { page: 1, limit }
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

/// A slice of a larger result set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page,
            limit: request.limit,
            total_items,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total_items.div_ceil(self.limit as u64)
    }

    pub fn has_next(&self) -> bool {
        (self.page as u64) < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total_items: self.total_items,
        }
    }
}
