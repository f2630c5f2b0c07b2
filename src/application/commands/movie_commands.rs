// src/application/commands/movie_commands.rs
//
// Movie Command Handlers

use crate::application::dto::*;
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::movie::rating_bound;
use crate::domain::{Actor, MoviePatch, MovieQuery, MovieSortField, SortOrder};
use crate::services::{CreateMovieRequest, UpdateMovieRequest};

use super::{page_request, parse_id, with_resource};

/// Catalogue listing with filters, sorting, pagination and featured movies
pub fn browse_movies(state: &AppState, dto: BrowseMoviesDto) -> Result<MovieListDto, ErrorResponse> {
    let page = page_request(
        dto.page,
        dto.limit,
        state.catalog.default_page_size,
        state.catalog.max_page_size,
    )?;

    let mut query = MovieQuery::new(page);
    query.genre = dto.genre.filter(|g| !g.trim().is_empty());
    query.release_year = dto.release_year;
    query.min_rating = dto.min_rating.map(rating_bound).transpose()?;
    query.max_rating = dto.max_rating.map(rating_bound).transpose()?;
    query.search = dto.search.filter(|s| !s.trim().is_empty());
    if let Some(sort_by) = dto.sort_by {
        query.sort_by = sort_by.parse::<MovieSortField>()?;
    }
    if let Some(sort_order) = dto.sort_order {
        query.sort_order = sort_order.parse::<SortOrder>()?;
    }

    let browse = state.movie_service.browse_movies(&query)?;

    Ok(MovieListDto {
        pagination: PaginationDto::from(&browse.movies),
        movies: browse.movies.items.into_iter().map(MovieDto::from).collect(),
        featured: browse.featured.into_iter().map(MovieDto::from).collect(),
    })
}

pub fn list_genres(state: &AppState) -> Result<Vec<String>, ErrorResponse> {
    Ok(state.movie_service.list_genres()?)
}

/// A movie with all of its reviews, newest first
pub fn get_movie(state: &AppState, movie_id: &str) -> Result<MovieDetailDto, ErrorResponse> {
    let id = parse_id(movie_id, "movie")?;
    let detail = with_resource(state.movie_service.get_movie_detail(id), "Movie")?;

    Ok(MovieDetailDto {
        movie: detail.movie.into(),
        reviews: detail.reviews.into_iter().map(ReviewDto::from).collect(),
    })
}

pub fn create_movie(
    state: &AppState,
    actor: &Actor,
    dto: CreateMovieDto,
) -> Result<MovieDto, ErrorResponse> {
    let request = CreateMovieRequest {
        title: dto.title,
        genres: dto.genres,
        release_year: dto.release_year,
        director: dto.director,
        cast: dto.cast.into_iter().map(Into::into).collect(),
        synopsis: dto.synopsis,
        poster_url: dto.poster_url.unwrap_or_default(),
        trailer_url: dto.trailer_url.unwrap_or_default(),
        duration: dto.duration,
        tmdb_id: dto.tmdb_id.filter(|id| !id.trim().is_empty()),
    };

    let movie = state.movie_service.create_movie(actor, request)?;
    Ok(movie.into())
}

pub fn update_movie(
    state: &AppState,
    actor: &Actor,
    dto: UpdateMovieDto,
) -> Result<MovieDto, ErrorResponse> {
    let movie_id = parse_id(&dto.movie_id, "movie")?;

    let patch = MoviePatch {
        title: dto.title,
        genres: dto.genres,
        release_year: dto.release_year,
        director: dto.director,
        cast: dto.cast.map(|cast| cast.into_iter().map(Into::into).collect()),
        synopsis: dto.synopsis,
        poster_url: dto.poster_url,
        trailer_url: dto.trailer_url,
        duration: dto.duration,
        tmdb_id: dto
            .tmdb_id
            .map(|id| if id.trim().is_empty() { None } else { Some(id) }),
    };

    let movie = with_resource(
        state
            .movie_service
            .update_movie(actor, UpdateMovieRequest { movie_id, patch }),
        "Movie",
    )?;
    Ok(movie.into())
}

pub fn delete_movie(state: &AppState, actor: &Actor, movie_id: &str) -> Result<(), ErrorResponse> {
    let id = parse_id(movie_id, "movie")?;
    with_resource(state.movie_service.delete_movie(actor, id), "Movie")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::test_support::{register, test_app};
    use crate::application::error_handling::ErrorType;

    fn create_dto(title: &str, year: i32, genres: &[&str]) -> CreateMovieDto {
        CreateMovieDto {
            title: title.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            release_year: year,
            director: "Christopher Nolan".to_string(),
            cast: vec![CastMemberDto {
                name: "Leonardo DiCaprio".to_string(),
                character: "Dom Cobb".to_string(),
            }],
            synopsis: "A thief who steals corporate secrets through dreams.".to_string(),
            poster_url: Some("/inception-movie-poster.png".to_string()),
            trailer_url: None,
            duration: 148,
            tmdb_id: None,
        }
    }

    #[test]
    fn test_create_then_get() {
        let app = test_app();
        let created = create_movie(&app.state, &app.admin, create_dto("Inception", 2010, &["Sci-Fi"])).unwrap();
        assert_eq!(created.average_rating, 0.0);
        assert_eq!(created.total_reviews, 0);

        let detail = get_movie(&app.state, &created.id).unwrap();
        assert_eq!(detail.movie.title, "Inception");
        assert!(detail.reviews.is_empty());
    }

    #[test]
    fn test_errors_map_to_statuses() {
        let app = test_app();
        let viewer = register(&app, "viewer");

        let forbidden = create_movie(&app.state, &viewer, create_dto("Inception", 2010, &["Sci-Fi"])).unwrap_err();
        assert_eq!(forbidden.status_code(), 403);

        let missing = get_movie(&app.state, &uuid::Uuid::new_v4().to_string()).unwrap_err();
        assert_eq!(missing.message, "Movie not found");

        let malformed = get_movie(&app.state, "42").unwrap_err();
        assert_eq!(malformed.error_type, ErrorType::Validation);

        create_movie(&app.state, &app.admin, create_dto("Inception", 2010, &["Sci-Fi"])).unwrap();
        let dup = create_movie(&app.state, &app.admin, create_dto("Inception", 2010, &["Sci-Fi"])).unwrap_err();
        assert_eq!(dup.status_code(), 409);
    }

    #[test]
    fn test_browse_parses_filters() {
        let app = test_app();
        create_movie(&app.state, &app.admin, create_dto("Inception", 2010, &["Sci-Fi"])).unwrap();
        create_movie(&app.state, &app.admin, create_dto("Memento", 2000, &["Thriller"])).unwrap();

        let list = browse_movies(
            &app.state,
            BrowseMoviesDto {
                sort_by: Some("title".to_string()),
                sort_order: Some("asc".to_string()),
                ..BrowseMoviesDto::default()
            },
        )
        .unwrap();
        let titles: Vec<_> = list.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Inception", "Memento"]);
        assert_eq!(list.pagination.total_items, 2);

        let filtered = browse_movies(
            &app.state,
            BrowseMoviesDto {
                genre: Some("Thriller".to_string()),
                ..BrowseMoviesDto::default()
            },
        )
        .unwrap();
        assert_eq!(filtered.movies.len(), 1);

        let bad_sort = browse_movies(
            &app.state,
            BrowseMoviesDto {
                sort_by: Some("popularity".to_string()),
                ..BrowseMoviesDto::default()
            },
        )
        .unwrap_err();
        assert_eq!(bad_sort.status_code(), 400);

        let bad_rating = browse_movies(
            &app.state,
            BrowseMoviesDto {
                min_rating: Some(7.5),
                ..BrowseMoviesDto::default()
            },
        )
        .unwrap_err();
        assert_eq!(bad_rating.status_code(), 400);

        assert_eq!(list_genres(&app.state).unwrap(), vec!["Sci-Fi", "Thriller"]);
    }

    #[test]
    fn test_rating_filter_compares_unrounded_bounds() {
        use crate::application::commands::review_commands::create_review;

        let app = test_app();
        let created = create_movie(&app.state, &app.admin, create_dto("Inception", 2010, &["Sci-Fi"])).unwrap();
        for (i, rating) in [4, 4, 4, 4, 5].into_iter().enumerate() {
            let critic = register(&app, &format!("critic_{}", i));
            create_review(
                &app.state,
                &critic,
                CreateReviewDto {
                    movie_id: created.id.clone(),
                    rating,
                    review_text: "Layered and well paced.".to_string(),
                },
            )
            .unwrap();
        }
        assert_eq!(get_movie(&app.state, &created.id).unwrap().movie.average_rating, 4.2);

        let with_bounds = |min: Option<f64>, max: Option<f64>| {
            browse_movies(
                &app.state,
                BrowseMoviesDto {
                    min_rating: min,
                    max_rating: max,
                    ..BrowseMoviesDto::default()
                },
            )
            .unwrap()
            .movies
            .len()
        };

        assert_eq!(with_bounds(Some(4.24), None), 0);
        assert_eq!(with_bounds(None, Some(4.16)), 0);
        assert_eq!(with_bounds(Some(4.2), Some(4.2)), 1);
        assert_eq!(with_bounds(Some(4.15), Some(4.26)), 1);
    }

    #[test]
    fn test_update_and_delete() {
        let app = test_app();
        let created = create_movie(&app.state, &app.admin, create_dto("Inception", 2010, &["Sci-Fi"])).unwrap();

        let updated = update_movie(
            &app.state,
            &app.admin,
            UpdateMovieDto {
                movie_id: created.id.clone(),
                genres: Some(vec!["Sci-Fi".to_string(), "Thriller".to_string()]),
                tmdb_id: Some("27205".to_string()),
                ..UpdateMovieDto::default()
            },
        )
        .unwrap();
        assert_eq!(updated.genres.len(), 2);
        assert_eq!(updated.tmdb_id.as_deref(), Some("27205"));

        delete_movie(&app.state, &app.admin, &created.id).unwrap();
        let again = delete_movie(&app.state, &app.admin, &created.id).unwrap_err();
        assert_eq!(again.status_code(), 404);
    }
}
