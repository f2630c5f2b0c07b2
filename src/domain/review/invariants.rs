use super::entity::Review;
use crate::domain::validation::require_length;
use crate::domain::DomainResult;

pub const REVIEW_TEXT_MIN_LEN: usize = 10;
pub const REVIEW_TEXT_MAX_LEN: usize = 2000;

/// Validates all Review invariants
/// The rating range is guaranteed by the `Rating` type.
pub fn validate_review(review: &Review) -> DomainResult<()> {
    require_length(
        "Review text",
        &review.review_text,
        REVIEW_TEXT_MIN_LEN,
        REVIEW_TEXT_MAX_LEN,
    )
}

/// Critical Review Invariants:
///
/// 1. Rating is an integer in 1..=5
/// 2. Text is 10..=2000 characters
/// 3. At most one review per (user, movie), enforced by the store
/// 4. Helpful count == number of distinct helpful voters
/// 5. user_id and movie_id never change
