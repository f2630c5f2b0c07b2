//! Rating value objects and the aggregate computation.
//!
//! Critical Rating Invariants:
//!
//! 1. A review rating is an integer in 1..=5
//! 2. An average is kept in tenths (0..=50) so equality is exact
//! 3. No reviews means average 0 and total 0
//! 4. Averages round half-up to one decimal

pub mod summary;
pub mod value_objects;

pub use summary::{RatingDistribution, RatingSummary};
pub use value_objects::{AverageRating, Rating};
