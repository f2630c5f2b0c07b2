// src/services/movie_service.rs

use std::sync::Arc;
use uuid::Uuid;

use crate::config::CatalogConfig;
use crate::domain::movie::{validate_movie, CastMember, Movie, MoviePatch, MovieQuery};
use crate::domain::pagination::Page;
use crate::domain::review::Review;
use crate::domain::user::Actor;
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, MovieCreated, MovieDeleted, MovieUpdated};
use crate::repositories::{MovieRepository, ReviewRepository};

#[derive(Debug, Clone)]
pub struct CreateMovieRequest {
    pub title: String,
    pub genres: Vec<String>,
    pub release_year: i32,
    pub director: String,
    pub cast: Vec<CastMember>,
    pub synopsis: String,
    pub poster_url: String,
    pub trailer_url: String,
    pub duration: u32,
    pub tmdb_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateMovieRequest {
    pub movie_id: Uuid,
    pub patch: MoviePatch,
}

/// A movie with every review written about it, newest first
#[derive(Debug, Clone)]
pub struct MovieDetail {
    pub movie: Movie,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone)]
pub struct MovieBrowse {
    pub movies: Page<Movie>,
    /// Populated only for the unfiltered first page
    pub featured: Vec<Movie>,
}

pub struct MovieService {
    movie_repo: Arc<dyn MovieRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    event_bus: Arc<EventBus>,
    catalog: CatalogConfig,
}

fn require_admin(actor: &Actor, action: &str) -> AppResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        log::warn!("user {} tried to {} without admin role", actor.user_id, action);
        Err(AppError::Forbidden(format!("Only admins can {}", action)))
    }
}

impl MovieService {
    pub fn new(
        movie_repo: Arc<dyn MovieRepository>,
        review_repo: Arc<dyn ReviewRepository>,
        event_bus: Arc<EventBus>,
        catalog: CatalogConfig,
    ) -> Self {
        Self {
            movie_repo,
            review_repo,
            event_bus,
            catalog,
        }
    }

    pub fn create_movie(&self, actor: &Actor, request: CreateMovieRequest) -> AppResult<Movie> {
        require_admin(actor, "add movies")?;

        let mut movie = Movie::new(
            request.title,
            request.genres,
            request.release_year,
            request.director,
            request.synopsis,
            request.duration,
            actor.user_id,
        );
        movie.apply(MoviePatch {
            cast: Some(request.cast),
            poster_url: Some(request.poster_url),
            trailer_url: Some(request.trailer_url),
            tmdb_id: Some(request.tmdb_id),
            ..MoviePatch::default()
        });

        validate_movie(&movie)?;
        self.reject_duplicate(&movie)?;
        self.movie_repo.save(&movie)?;

        log::info!("movie {} added as {}", movie, movie.id);
        self.event_bus
            .emit(MovieCreated::new(movie.id, movie.title.clone(), actor.user_id));

        Ok(movie)
    }

    pub fn update_movie(&self, actor: &Actor, request: UpdateMovieRequest) -> AppResult<Movie> {
        require_admin(actor, "edit movies")?;

        let mut movie = self.get_movie(request.movie_id)?;
        movie.apply(request.patch);

        validate_movie(&movie)?;
        self.reject_duplicate(&movie)?;
        self.movie_repo.save(&movie)?;

        log::info!("movie {} updated", movie.id);
        self.event_bus.emit(MovieUpdated::new(movie.id));

        Ok(movie)
    }

    /// Removes the movie along with its reviews and watchlist entries
    pub fn delete_movie(&self, actor: &Actor, movie_id: Uuid) -> AppResult<()> {
        require_admin(actor, "delete movies")?;

        self.movie_repo.delete(movie_id)?;

        log::info!("movie {} deleted by {}", movie_id, actor.user_id);
        self.event_bus.emit(MovieDeleted::new(movie_id));

        Ok(())
    }

    pub fn get_movie(&self, movie_id: Uuid) -> AppResult<Movie> {
        self.movie_repo.get_by_id(movie_id)?.ok_or(AppError::NotFound)
    }

    pub fn get_movie_detail(&self, movie_id: Uuid) -> AppResult<MovieDetail> {
        let movie = self.get_movie(movie_id)?;
        let reviews = self.review_repo.list_all_by_movie(movie_id)?;
        Ok(MovieDetail { movie, reviews })
    }

    pub fn browse_movies(&self, query: &MovieQuery) -> AppResult<MovieBrowse> {
        let movies = self.movie_repo.search(query)?;

        let featured = if query.wants_featured() {
            self.movie_repo
                .list_featured(self.catalog.featured_min_reviews, self.catalog.featured_limit)?
        } else {
            Vec::new()
        };

        Ok(MovieBrowse { movies, featured })
    }

    pub fn list_genres(&self) -> AppResult<Vec<String>> {
        self.movie_repo.list_genres()
    }

    pub fn count_movies(&self) -> AppResult<u64> {
        self.movie_repo.count()
    }

    fn reject_duplicate(&self, movie: &Movie) -> AppResult<()> {
        match self.movie_repo.find_duplicate(movie)? {
            Some(existing) => {
                log::warn!("movie {} duplicates {}", movie, existing);
                Err(AppError::Conflict(
                    "A movie with this title and release year or TMDB id already exists"
                        .to_string(),
                ))
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::migrated_pool;
    use crate::domain::pagination::PageRequest;
    use crate::domain::rating::{Rating, RatingSummary};
    use crate::repositories::{
        SqliteMovieRepository, SqliteReviewRepository, SqliteUserRepository,
        SqliteWatchlistRepository, UserRepository, WatchlistRepository,
    };
    use crate::domain::watchlist::WatchlistEntry;
    use crate::testing::{admin, member};

    struct Fixture {
        _dir: tempfile::TempDir,
        service: MovieService,
        movies: Arc<SqliteMovieRepository>,
        reviews: Arc<SqliteReviewRepository>,
        watchlist: SqliteWatchlistRepository,
        users: SqliteUserRepository,
        admin: Actor,
    }

    fn setup() -> Fixture {
        let (dir, pool) = migrated_pool();
        let users = SqliteUserRepository::new(pool.clone());
        let movies = Arc::new(SqliteMovieRepository::new(pool.clone()));
        let reviews = Arc::new(SqliteReviewRepository::new(pool.clone()));
        let curator = admin("curator");
        users.save(&curator).unwrap();

        let service = MovieService::new(
            movies.clone(),
            reviews.clone(),
            Arc::new(EventBus::new()),
            CatalogConfig::default(),
        );

        Fixture {
            _dir: dir,
            service,
            movies,
            reviews,
            watchlist: SqliteWatchlistRepository::new(pool),
            users,
            admin: curator.as_actor(),
        }
    }

    fn request(title: &str, year: i32) -> CreateMovieRequest {
        CreateMovieRequest {
            title: title.to_string(),
            genres: vec!["Drama".to_string()],
            release_year: year,
            director: "Frank Darabont".to_string(),
            cast: vec![CastMember::new("Tim Robbins", "Andy Dufresne")],
            synopsis: "Two imprisoned men bond over a number of years.".to_string(),
            poster_url: String::new(),
            trailer_url: String::new(),
            duration: 142,
            tmdb_id: None,
        }
    }

    #[test]
    fn test_create_movie_starts_unrated() {
        let f = setup();
        let movie = f
            .service
            .create_movie(&f.admin, request("The Shawshank Redemption", 1994))
            .unwrap();

        assert_eq!(movie.rating, RatingSummary::empty());
        assert_eq!(movie.added_by, f.admin.user_id);
        assert_eq!(f.service.get_movie(movie.id).unwrap().cast.len(), 1);
    }

    #[test]
    fn test_non_admin_cannot_mutate_catalogue() {
        let f = setup();
        let viewer = Actor::user(Uuid::new_v4());

        let err = f.service.create_movie(&viewer, request("Heat", 1995)).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let movie = f.service.create_movie(&f.admin, request("Heat", 1995)).unwrap();
        let err = f.service.delete_movie(&viewer, movie.id).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(f.service.get_movie(movie.id).is_ok());
    }

    #[test]
    fn test_duplicate_movie_is_conflict() {
        let f = setup();
        f.service.create_movie(&f.admin, request("Heat", 1995)).unwrap();

        let err = f.service.create_movie(&f.admin, request("Heat", 1995)).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let mut with_tmdb = request("Heat", 1986);
        with_tmdb.tmdb_id = Some("949".to_string());
        f.service.create_movie(&f.admin, with_tmdb).unwrap();

        let mut same_tmdb = request("Something Else", 2001);
        same_tmdb.tmdb_id = Some("949".to_string());
        let err = f.service.create_movie(&f.admin, same_tmdb).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_invalid_movie_is_rejected() {
        let f = setup();
        let mut bad = request("Heat", 1995);
        bad.genres.clear();

        let err = f.service.create_movie(&f.admin, bad).unwrap_err();
        assert!(matches!(err, AppError::Domain(_)));
        assert_eq!(f.service.count_movies().unwrap(), 0);
    }

    #[test]
    fn test_update_movie_keeps_rating() {
        let f = setup();
        let movie = f.service.create_movie(&f.admin, request("Heat", 1995)).unwrap();
        let summary = RatingSummary::from_ratings(&[Rating::new(4).unwrap()]);
        f.movies.update_rating_summary(movie.id, &summary).unwrap();

        let updated = f
            .service
            .update_movie(
                &f.admin,
                UpdateMovieRequest {
                    movie_id: movie.id,
                    patch: MoviePatch {
                        duration: Some(170),
                        ..MoviePatch::default()
                    },
                },
            )
            .unwrap();

        assert_eq!(updated.duration, 170);
        assert_eq!(f.service.get_movie(movie.id).unwrap().rating, summary);
    }

    #[test]
    fn test_update_missing_movie_is_not_found() {
        let f = setup();
        let err = f
            .service
            .update_movie(
                &f.admin,
                UpdateMovieRequest {
                    movie_id: Uuid::new_v4(),
                    patch: MoviePatch::default(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[test]
    fn test_delete_movie_cascades() {
        let f = setup();
        let movie = f.service.create_movie(&f.admin, request("Heat", 1995)).unwrap();
        let viewer = member("viewer");
        f.users.save(&viewer).unwrap();

        let review = Review::new(
            viewer.id,
            movie.id,
            Rating::new(5).unwrap(),
            "Best heist film ever made.".to_string(),
        );
        f.reviews.save(&review).unwrap();
        f.watchlist.add(&WatchlistEntry::new(viewer.id, movie.id)).unwrap();

        f.service.delete_movie(&f.admin, movie.id).unwrap();

        assert!(matches!(f.service.get_movie(movie.id), Err(AppError::NotFound)));
        assert!(f.reviews.get_by_id(review.id).unwrap().is_none());
        assert_eq!(f.watchlist.count_by_user(viewer.id).unwrap(), 0);
    }

    #[test]
    fn test_browse_features_only_on_plain_first_page() {
        let f = setup();
        let popular = f.service.create_movie(&f.admin, request("Popular", 2001)).unwrap();
        f.service.create_movie(&f.admin, request("Obscure", 2002)).unwrap();
        let five = vec![Rating::new(5).unwrap(); 5];
        f.movies
            .update_rating_summary(popular.id, &RatingSummary::from_ratings(&five))
            .unwrap();

        let query = MovieQuery::new(PageRequest::first(12));
        let browse = f.service.browse_movies(&query).unwrap();
        assert_eq!(browse.movies.total_items, 2);
        assert_eq!(browse.featured.len(), 1);
        assert_eq!(browse.featured[0].id, popular.id);

        let mut searched = MovieQuery::new(PageRequest::first(12));
        searched.search = Some("popular".to_string());
        let browse = f.service.browse_movies(&searched).unwrap();
        assert_eq!(browse.movies.total_items, 1);
        assert!(browse.featured.is_empty());
    }

    #[test]
    fn test_detail_lists_reviews() {
        let f = setup();
        let movie = f.service.create_movie(&f.admin, request("Heat", 1995)).unwrap();
        let viewer = member("viewer");
        f.users.save(&viewer).unwrap();
        f.reviews
            .save(&Review::new(
                viewer.id,
                movie.id,
                Rating::new(4).unwrap(),
                "Tense and beautifully shot.".to_string(),
            ))
            .unwrap();

        let detail = f.service.get_movie_detail(movie.id).unwrap();
        assert_eq!(detail.movie.id, movie.id);
        assert_eq!(detail.reviews.len(), 1);
        assert_eq!(f.service.list_genres().unwrap(), vec!["Drama"]);
    }
}
