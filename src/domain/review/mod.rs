pub mod entity;
pub mod invariants;
pub mod query;

pub use entity::Review;
pub use invariants::validate_review;
pub use query::{ReviewQuery, ReviewSortField};
