// src/config.rs
//
// Runtime configuration, read from a TOML file.
// Every key is optional; missing sections fall back to defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file; `None` means the platform data directory
    pub path: Option<PathBuf>,
    pub max_connections: u32,
    pub busy_timeout_ms: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub review_page_size: u32,
    pub watchlist_page_size: u32,
    /// Minimum review count for a movie to be featured
    pub featured_min_reviews: u32,
    pub featured_limit: u32,
    /// Reviews shown on a user profile
    pub recent_reviews_limit: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// off | error | warn | info | debug | trace
    pub level: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: 15,
            busy_timeout_ms: 5000,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: 12,
            max_page_size: 50,
            review_page_size: 10,
            watchlist_page_size: 10,
            featured_min_reviews: 5,
            featured_limit: 6,
            recent_reviews_limit: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> AppResult<Self> {
        let parsed: Self = toml::from_str(contents)?;
        parsed.check()?;
        Ok(parsed)
    }

    fn check(&self) -> AppResult<()> {
        if self.database.max_connections == 0 {
            return Err(AppError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        let c = &self.catalog;
        let page_sizes = [
            c.default_page_size,
            c.review_page_size,
            c.watchlist_page_size,
        ];
        if c.max_page_size == 0
            || page_sizes
                .iter()
                .any(|&size| size == 0 || size > c.max_page_size)
        {
            return Err(AppError::Config(format!(
                "page sizes must be between 1 and catalog.max_page_size ({})",
                c.max_page_size
            )));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> AppResult<log::LevelFilter> {
        self.logging
            .level
            .parse()
            .map_err(|_| AppError::Config(format!("unknown log level '{}'", self.logging.level)))
    }
}
