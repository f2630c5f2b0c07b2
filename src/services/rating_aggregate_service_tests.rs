// src/services/rating_aggregate_service_tests.rs
//
// The aggregate updater against a real database, plus failure
// propagation against mocked repositories.

#[cfg(test)]
mod recompute_tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use uuid::Uuid;

    use crate::db::test_support::migrated_pool;
    use crate::domain::rating::{AverageRating, Rating, RatingSummary};
    use crate::domain::review::Review;
    use crate::events::{EventBus, MovieRatingRecomputed};
    use crate::repositories::{
        MovieRepository, ReviewRepository, SqliteMovieRepository, SqliteReviewRepository,
        SqliteUserRepository, UserRepository,
    };
    use crate::services::RatingAggregateService;
    use crate::testing::{admin, member, movie};

    struct Fixture {
        _dir: tempfile::TempDir,
        users: Arc<SqliteUserRepository>,
        movies: Arc<SqliteMovieRepository>,
        reviews: Arc<SqliteReviewRepository>,
        bus: Arc<EventBus>,
        service: RatingAggregateService,
        movie_id: Uuid,
    }

    fn setup() -> Fixture {
        let (dir, pool) = migrated_pool();
        let users = Arc::new(SqliteUserRepository::new(pool.clone()));
        let movies = Arc::new(SqliteMovieRepository::new(pool.clone()));
        let reviews = Arc::new(SqliteReviewRepository::new(pool));
        let bus = Arc::new(EventBus::new());

        let owner = admin("curator");
        users.save(&owner).unwrap();
        let m = movie(owner.id, "Inception", 2010, &["Sci-Fi"]);
        movies.save(&m).unwrap();

        let service = RatingAggregateService::new(reviews.clone(), movies.clone(), bus.clone());

        Fixture {
            _dir: dir,
            users,
            movies,
            reviews,
            bus,
            service,
            movie_id: m.id,
        }
    }

    fn add_review(f: &Fixture, stars: i64) -> Review {
        let author = member(&format!("critic_{}", Uuid::new_v4().simple()));
        f.users.save(&author).unwrap();
        let review = Review::new(
            author.id,
            f.movie_id,
            Rating::new(stars).unwrap(),
            "A considered opinion on the film.".to_string(),
        );
        f.reviews.save(&review).unwrap();
        review
    }

    fn stored_summary(f: &Fixture) -> RatingSummary {
        f.movies.get_by_id(f.movie_id).unwrap().unwrap().rating
    }

    fn tenths(t: u8) -> AverageRating {
        AverageRating::from_tenths(t).unwrap()
    }

    #[test]
    fn test_no_reviews_gives_zero_summary() {
        let f = setup();
        let summary = f.service.recompute_rating(f.movie_id).unwrap();
        assert_eq!(summary, RatingSummary::empty());
        assert_eq!(stored_summary(&f), RatingSummary::empty());
    }

    #[test]
    fn test_three_reviews_average_to_four() {
        let f = setup();
        for stars in [4, 5, 3] {
            add_review(&f, stars);
        }

        let summary = f.service.recompute_rating(f.movie_id).unwrap();
        assert_eq!(summary.average_rating, tenths(40));
        assert_eq!(summary.total_reviews, 3);
        assert_eq!(stored_summary(&f), summary);
    }

    #[test]
    fn test_half_tenth_rounds_up() {
        let f = setup();
        for stars in [5, 5, 4, 3] {
            add_review(&f, stars);
        }

        // 17 / 4 = 4.25
        let summary = f.service.recompute_rating(f.movie_id).unwrap();
        assert_eq!(summary.average_rating, tenths(43));
        assert_eq!(summary.total_reviews, 4);
    }

    #[test]
    fn test_deleting_only_review_resets_to_zero() {
        let f = setup();
        let review = add_review(&f, 2);
        f.service.recompute_rating(f.movie_id).unwrap();
        assert_eq!(stored_summary(&f).average_rating, tenths(20));

        f.reviews.delete(review.id).unwrap();
        f.service.recompute_rating(f.movie_id).unwrap();

        assert_eq!(stored_summary(&f), RatingSummary::empty());
    }

    #[test]
    fn test_rating_edit_is_reflected() {
        let f = setup();
        let mut review = add_review(&f, 3);
        f.service.recompute_rating(f.movie_id).unwrap();

        assert!(review.edit(Some(Rating::new(5).unwrap()), None));
        f.reviews.save(&review).unwrap();
        f.service.recompute_rating(f.movie_id).unwrap();

        assert_eq!(stored_summary(&f).average_rating, tenths(50));
        assert_eq!(stored_summary(&f).total_reviews, 1);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let f = setup();
        for stars in [1, 2, 2] {
            add_review(&f, stars);
        }

        let first = f.service.recompute_rating(f.movie_id).unwrap();
        let second = f.service.recompute_rating(f.movie_id).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.average_rating, tenths(17));
    }

    #[test]
    fn test_recompute_emits_event() {
        let f = setup();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        f.bus.subscribe::<MovieRatingRecomputed, _>(move |e| {
            assert_eq!(e.total_reviews, 1);
            seen_clone.fetch_add(1, Ordering::SeqCst);
        });

        add_review(&f, 4);
        f.service.recompute_rating(f.movie_id).unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_recompute_all_repairs_stale_rows() {
        let f = setup();
        add_review(&f, 5);
        add_review(&f, 4);

        // stale value written behind the updater's back
        f.movies
            .update_rating_summary(
                f.movie_id,
                &RatingSummary {
                    average_rating: tenths(10),
                    total_reviews: 9,
                },
            )
            .unwrap();

        let report = f.service.recompute_all().unwrap();
        assert_eq!(report.recomputed, 1);
        assert!(report.failed.is_empty());
        assert_eq!(stored_summary(&f).average_rating, tenths(45));
        assert_eq!(stored_summary(&f).total_reviews, 2);
    }
}

#[cfg(test)]
mod failure_tests {
    use std::sync::Arc;
    use uuid::Uuid;

    use crate::domain::rating::Rating;
    use crate::error::AppError;
    use crate::events::EventBus;
    use crate::repositories::{MockMovieRepository, MockReviewRepository};
    use crate::services::RatingAggregateService;

    #[test]
    fn test_read_failure_propagates_and_skips_write() {
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_ratings_for_movie()
            .returning(|_| Err(AppError::Pool("pool exhausted".to_string())));

        let mut movies = MockMovieRepository::new();
        movies.expect_update_rating_summary().never();

        let bus = Arc::new(EventBus::new());
        let service = RatingAggregateService::new(Arc::new(reviews), Arc::new(movies), bus.clone());

        let err = service.recompute_rating(Uuid::new_v4()).unwrap_err();
        assert!(err.is_persistence());
        assert!(bus.get_event_log().is_empty());
    }

    #[test]
    fn test_missing_movie_on_write_is_not_found() {
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_ratings_for_movie()
            .returning(|_| Ok(vec![Rating::new(4).unwrap()]));

        let mut movies = MockMovieRepository::new();
        movies
            .expect_update_rating_summary()
            .times(1)
            .returning(|_, _| Err(AppError::NotFound));

        let service = RatingAggregateService::new(
            Arc::new(reviews),
            Arc::new(movies),
            Arc::new(EventBus::new()),
        );

        assert!(matches!(
            service.recompute_rating(Uuid::new_v4()),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn test_recompute_all_records_failures_and_continues() {
        let good = Uuid::new_v4();
        let bad = Uuid::new_v4();

        let mut reviews = MockReviewRepository::new();
        reviews.expect_ratings_for_movie().returning(move |id| {
            if id == bad {
                Err(AppError::Pool("connection reset".to_string()))
            } else {
                Ok(vec![Rating::new(3).unwrap()])
            }
        });

        let mut movies = MockMovieRepository::new();
        movies
            .expect_list_ids()
            .returning(move || Ok(vec![bad, good]));
        movies
            .expect_update_rating_summary()
            .times(1)
            .returning(|_, _| Ok(()));

        let service = RatingAggregateService::new(
            Arc::new(reviews),
            Arc::new(movies),
            Arc::new(EventBus::new()),
        );

        let report = service.recompute_all().unwrap();
        assert_eq!(report.recomputed, 1);
        assert_eq!(report.failed, vec![bad]);
    }
}
