// src/application/commands/watchlist_commands.rs
//
// Watchlist Command Handlers

use crate::application::dto::*;
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::Actor;

use super::{page_request, parse_id, with_resource};

pub fn get_watchlist(state: &AppState, dto: ListWatchlistDto) -> Result<WatchlistDto, ErrorResponse> {
    let user_id = parse_id(&dto.user_id, "user")?;
    let page = page_request(
        dto.page,
        dto.limit,
        state.catalog.watchlist_page_size,
        state.catalog.max_page_size,
    )?;

    let items = state.watchlist_service.list_watchlist(user_id, page)?;

    Ok(WatchlistDto {
        pagination: PaginationDto::from(&items),
        watchlist: items.items.into_iter().map(WatchlistItemDto::from).collect(),
    })
}

pub fn add_to_watchlist(
    state: &AppState,
    actor: &Actor,
    user_id: &str,
    movie_id: &str,
) -> Result<WatchlistItemDto, ErrorResponse> {
    let user_id = parse_id(user_id, "user")?;
    let movie_id = parse_id(movie_id, "movie")?;

    let item = with_resource(
        state
            .watchlist_service
            .add_to_watchlist(actor, user_id, movie_id),
        "Movie",
    )?;
    Ok(item.into())
}

pub fn remove_from_watchlist(
    state: &AppState,
    actor: &Actor,
    user_id: &str,
    movie_id: &str,
) -> Result<(), ErrorResponse> {
    let user_id = parse_id(user_id, "user")?;
    let movie_id = parse_id(movie_id, "movie")?;

    with_resource(
        state
            .watchlist_service
            .remove_from_watchlist(actor, user_id, movie_id),
        "Watchlist entry",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::movie_commands::create_movie;
    use crate::application::commands::test_support::{register, test_app};
    use crate::application::error_handling::ErrorType;

    #[test]
    fn test_watchlist_roundtrip() {
        let app = test_app();
        let viewer = register(&app, "viewer");
        let user_id = viewer.user_id.to_string();

        let movie = create_movie(
            &app.state,
            &app.admin,
            CreateMovieDto {
                title: "Forrest Gump".to_string(),
                genres: vec!["Drama".to_string(), "Romance".to_string()],
                release_year: 1994,
                director: "Robert Zemeckis".to_string(),
                cast: vec![],
                synopsis: "Life is like a box of chocolates.".to_string(),
                poster_url: None,
                trailer_url: None,
                duration: 142,
                tmdb_id: None,
            },
        )
        .unwrap();

        let item = add_to_watchlist(&app.state, &viewer, &user_id, &movie.id).unwrap();
        assert_eq!(item.movie.title, "Forrest Gump");

        let again = add_to_watchlist(&app.state, &viewer, &user_id, &movie.id).unwrap_err();
        assert_eq!(again.error_type, ErrorType::Conflict);

        let list = get_watchlist(
            &app.state,
            ListWatchlistDto {
                user_id: user_id.clone(),
                ..ListWatchlistDto::default()
            },
        )
        .unwrap();
        assert_eq!(list.watchlist.len(), 1);
        assert_eq!(list.pagination.total_items, 1);

        remove_from_watchlist(&app.state, &viewer, &user_id, &movie.id).unwrap();
        let gone = remove_from_watchlist(&app.state, &viewer, &user_id, &movie.id).unwrap_err();
        assert_eq!(gone.message, "Watchlist entry not found");
    }

    #[test]
    fn test_cannot_touch_another_users_watchlist() {
        let app = test_app();
        let owner = register(&app, "owner");
        let intruder = register(&app, "intruder");

        let err = add_to_watchlist(
            &app.state,
            &intruder,
            &owner.user_id.to_string(),
            &uuid::Uuid::new_v4().to_string(),
        )
        .unwrap_err();
        assert_eq!(err.error_type, ErrorType::Forbidden);

        let missing_movie = add_to_watchlist(
            &app.state,
            &owner,
            &owner.user_id.to_string(),
            &uuid::Uuid::new_v4().to_string(),
        )
        .unwrap_err();
        assert_eq!(missing_movie.message, "Movie not found");
    }
}
