// src/application/mod.rs
//
// Application Layer
//
// - Sits above services and repositories
// - Translates between DTOs and domain entities
// - Turns AppError into caller-facing ErrorResponse values

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod seed;
pub mod state;

pub use error_handling::{ErrorResponse, ErrorType};
pub use seed::seed_catalog;
pub use state::AppState;
