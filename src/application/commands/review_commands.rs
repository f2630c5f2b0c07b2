// src/application/commands/review_commands.rs
//
// Review Command Handlers
//
// Every write here ends with the movie's rating aggregate recomputed
// by the review service before the command returns.

use crate::application::dto::*;
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::{Actor, ReviewQuery, ReviewSortField, SortOrder};
use crate::services::{CreateReviewRequest, UpdateReviewRequest};

use super::{page_request, parse_id, with_resource};

/// A page of a movie's reviews plus the movie's rating distribution
pub fn list_movie_reviews(
    state: &AppState,
    dto: ListReviewsDto,
) -> Result<ReviewListDto, ErrorResponse> {
    let movie_id = parse_id(&dto.movie_id, "movie")?;
    let page = page_request(
        dto.page,
        dto.limit,
        state.catalog.review_page_size,
        state.catalog.max_page_size,
    )?;

    let mut query = ReviewQuery::new(page);
    if let Some(sort_by) = dto.sort_by {
        query.sort_by = sort_by.parse::<ReviewSortField>()?;
    }
    if let Some(sort_order) = dto.sort_order {
        query.sort_order = sort_order.parse::<SortOrder>()?;
    }

    let result = with_resource(
        state.review_service.list_movie_reviews(movie_id, &query),
        "Movie",
    )?;

    Ok(ReviewListDto {
        pagination: PaginationDto::from(&result.reviews),
        rating_distribution: rating_counts(&result.distribution),
        reviews: result.reviews.items.into_iter().map(ReviewDto::from).collect(),
    })
}

pub fn get_review(state: &AppState, review_id: &str) -> Result<ReviewDto, ErrorResponse> {
    let id = parse_id(review_id, "review")?;
    let review = with_resource(state.review_service.get_review(id), "Review")?;
    Ok(review.into())
}

pub fn create_review(
    state: &AppState,
    actor: &Actor,
    dto: CreateReviewDto,
) -> Result<ReviewDto, ErrorResponse> {
    let movie_id = parse_id(&dto.movie_id, "movie")?;

    let review = with_resource(
        state.review_service.create_review(
            actor,
            CreateReviewRequest {
                movie_id,
                rating: dto.rating,
                review_text: dto.review_text,
            },
        ),
        "Movie",
    )?;
    Ok(review.into())
}

pub fn update_review(
    state: &AppState,
    actor: &Actor,
    dto: UpdateReviewDto,
) -> Result<ReviewDto, ErrorResponse> {
    let review_id = parse_id(&dto.review_id, "review")?;

    let review = with_resource(
        state.review_service.update_review(
            actor,
            UpdateReviewRequest {
                review_id,
                rating: dto.rating,
                review_text: dto.review_text,
            },
        ),
        "Review",
    )?;
    Ok(review.into())
}

pub fn delete_review(state: &AppState, actor: &Actor, review_id: &str) -> Result<(), ErrorResponse> {
    let id = parse_id(review_id, "review")?;
    with_resource(state.review_service.delete_review(actor, id), "Review")
}

pub fn toggle_helpful(
    state: &AppState,
    actor: &Actor,
    review_id: &str,
) -> Result<HelpfulToggleDto, ErrorResponse> {
    let id = parse_id(review_id, "review")?;
    let toggle = with_resource(state.review_service.toggle_helpful(actor, id), "Review")?;
    Ok(toggle.into())
}
