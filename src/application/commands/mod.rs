// src/application/commands/mod.rs
//
// Command Handlers
//
// - Commands are thin adapters between callers and services
// - Commands accept DTOs, return DTOs or an ErrorResponse
// - Commands parse and bound raw input; they never contain business logic

pub mod movie_commands;
pub mod review_commands;
pub mod user_commands;
pub mod watchlist_commands;

pub use movie_commands::*;
pub use review_commands::*;
pub use user_commands::*;
pub use watchlist_commands::*;

use uuid::Uuid;

use crate::application::error_handling::ErrorResponse;
use crate::domain::PageRequest;
use crate::error::{AppError, AppResult};

pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid, ErrorResponse> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ErrorResponse::validation(format!("Invalid {} id '{}'", what, raw)))
}

pub(crate) fn page_request(
    page: Option<u32>,
    limit: Option<u32>,
    default_limit: u32,
    max_limit: u32,
) -> Result<PageRequest, ErrorResponse> {
    Ok(PageRequest::new(
        page.unwrap_or(1),
        limit.unwrap_or(default_limit),
        max_limit,
    )?)
}

/// Service result with NotFound reported against a named resource
pub(crate) fn with_resource<T>(result: AppResult<T>, resource: &str) -> Result<T, ErrorResponse> {
    result.map_err(|e| match e {
        AppError::NotFound => ErrorResponse::not_found(resource),
        other => ErrorResponse::from_app_error(other),
    })
}
