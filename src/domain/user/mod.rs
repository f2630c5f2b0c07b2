pub mod entity;
pub mod invariants;

pub use entity::{normalize_email, Actor, Role, User};
pub use invariants::validate_user;
