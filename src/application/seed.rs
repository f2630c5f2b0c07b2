// src/application/seed.rs
//
// Sample catalogue for an empty database.

use crate::application::state::AppState;
use crate::domain::{CastMember, Role};
use crate::error::AppResult;
use crate::services::{CreateMovieRequest, RegisterUserRequest};

pub const SEED_ADMIN_USERNAME: &str = "admin";
pub const SEED_ADMIN_EMAIL: &str = "admin@moviereview.com";

struct SeedMovie {
    title: &'static str,
    genres: &'static [&'static str],
    release_year: i32,
    director: &'static str,
    cast: &'static [(&'static str, &'static str)],
    synopsis: &'static str,
    duration: u32,
    poster_url: &'static str,
}

const SEED_MOVIES: &[SeedMovie] = &[
    SeedMovie {
        title: "The Shawshank Redemption",
        genres: &["Drama"],
        release_year: 1994,
        director: "Frank Darabont",
        cast: &[
            ("Tim Robbins", "Andy Dufresne"),
            ("Morgan Freeman", "Ellis Boyd 'Red' Redding"),
        ],
        synopsis: "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.",
        duration: 142,
        poster_url: "/shawshank-redemption-poster.png",
    },
    SeedMovie {
        title: "The Godfather",
        genres: &["Crime", "Drama"],
        release_year: 1972,
        director: "Francis Ford Coppola",
        cast: &[
            ("Marlon Brando", "Don Vito Corleone"),
            ("Al Pacino", "Michael Corleone"),
        ],
        synopsis: "The aging patriarch of an organized crime dynasty transfers control of his clandestine empire to his reluctant son.",
        duration: 175,
        poster_url: "/classic-mob-poster.png",
    },
    SeedMovie {
        title: "The Dark Knight",
        genres: &["Action", "Crime", "Drama"],
        release_year: 2008,
        director: "Christopher Nolan",
        cast: &[
            ("Christian Bale", "Bruce Wayne / Batman"),
            ("Heath Ledger", "Joker"),
        ],
        synopsis: "When the menace known as the Joker wreaks havoc and chaos on the people of Gotham, Batman must accept one of the greatest psychological and physical tests.",
        duration: 152,
        poster_url: "/dark-knight-batman-movie-poster.jpg",
    },
    SeedMovie {
        title: "Pulp Fiction",
        genres: &["Crime", "Drama"],
        release_year: 1994,
        director: "Quentin Tarantino",
        cast: &[
            ("John Travolta", "Vincent Vega"),
            ("Samuel L. Jackson", "Jules Winnfield"),
        ],
        synopsis: "The lives of two mob hitmen, a boxer, a gangster and his wife intertwine in four tales of violence and redemption.",
        duration: 154,
        poster_url: "/pulp-fiction-poster.png",
    },
    SeedMovie {
        title: "Forrest Gump",
        genres: &["Drama", "Romance"],
        release_year: 1994,
        director: "Robert Zemeckis",
        cast: &[("Tom Hanks", "Forrest Gump")],
        synopsis: "The presidencies of Kennedy and Johnson, the events of Vietnam, Watergate and other historical events unfold from the perspective of an Alabama man.",
        duration: 142,
        poster_url: "/forrest-gump-poster.png",
    },
    SeedMovie {
        title: "Inception",
        genres: &["Action", "Sci-Fi", "Thriller"],
        release_year: 2010,
        director: "Christopher Nolan",
        cast: &[
            ("Leonardo DiCaprio", "Dom Cobb"),
            ("Marion Cotillard", "Mal"),
        ],
        synopsis: "A thief who steals corporate secrets through the use of dream-sharing technology is given the inverse task of planting an idea.",
        duration: 148,
        poster_url: "/inception-movie-poster.png",
    },
];

/// Insert the sample movies when the catalogue is empty.
///
/// Returns how many movies were created; 0 means the catalogue already had
/// content and nothing was touched.
pub fn seed_catalog(state: &AppState) -> AppResult<usize> {
    if state.movie_service.count_movies()? > 0 {
        log::info!("catalogue already populated, skipping seed");
        return Ok(0);
    }

    let admin = match state.user_service.find_by_email(SEED_ADMIN_EMAIL)? {
        Some(user) => user,
        None => state.user_service.register_user(RegisterUserRequest {
            username: SEED_ADMIN_USERNAME.to_string(),
            email: SEED_ADMIN_EMAIL.to_string(),
            role: Role::Admin,
        })?,
    };
    let actor = admin.as_actor();

    for seed in SEED_MOVIES {
        state.movie_service.create_movie(
            &actor,
            CreateMovieRequest {
                title: seed.title.to_string(),
                genres: seed.genres.iter().map(|g| g.to_string()).collect(),
                release_year: seed.release_year,
                director: seed.director.to_string(),
                cast: seed
                    .cast
                    .iter()
                    .map(|(name, character)| CastMember::new(*name, *character))
                    .collect(),
                synopsis: seed.synopsis.to_string(),
                poster_url: seed.poster_url.to_string(),
                trailer_url: String::new(),
                duration: seed.duration,
                tmdb_id: None,
            },
        )?;
    }

    log::info!("seeded {} sample movies", SEED_MOVIES.len());
    Ok(SEED_MOVIES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::db::test_support::migrated_pool;

    #[test]
    fn test_seed_once() {
        let (_dir, pool) = migrated_pool();
        let state = AppState::new(Arc::clone(&pool), &Config::default());

        assert_eq!(seed_catalog(&state).unwrap(), 6);
        assert_eq!(state.movie_service.count_movies().unwrap(), 6);

        let admin = state
            .user_service
            .find_by_email(SEED_ADMIN_EMAIL)
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);

        assert_eq!(seed_catalog(&state).unwrap(), 0);
        assert_eq!(state.movie_service.count_movies().unwrap(), 6);
    }

    #[test]
    fn test_seeded_movies_start_unrated() {
        let (_dir, pool) = migrated_pool();
        let state = AppState::new(Arc::clone(&pool), &Config::default());
        seed_catalog(&state).unwrap();

        let genres = state.movie_service.list_genres().unwrap();
        assert!(genres.contains(&"Sci-Fi".to_string()));

        let query = crate::domain::MovieQuery::new(crate::domain::PageRequest::first(10));
        let browse = state.movie_service.browse_movies(&query).unwrap();
        assert!(browse
            .movies
            .items
            .iter()
            .all(|m| m.rating.total_reviews == 0 && m.rating.average_rating.is_zero()));
    }
}
