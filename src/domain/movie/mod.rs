pub mod entity;
pub mod invariants;
pub mod query;

pub use entity::{CastMember, Movie, MoviePatch};
pub use invariants::validate_movie;
pub use query::{rating_bound, MovieQuery, MovieSortField};
