// src/testing.rs
//
// Fixtures shared by repository and service tests.

use uuid::Uuid;

use crate::domain::movie::Movie;
use crate::domain::user::{Role, User};

pub fn member(username: &str) -> User {
    User::new(
        username.to_string(),
        format!("{}@example.com", username),
        Role::User,
    )
}

pub fn admin(username: &str) -> User {
    User::new(
        username.to_string(),
        format!("{}@example.com", username),
        Role::Admin,
    )
}

pub fn movie(added_by: Uuid, title: &str, year: i32, genres: &[&str]) -> Movie {
    Movie::new(
        title.to_string(),
        genres.iter().map(|g| g.to_string()).collect(),
        year,
        "Some Director".to_string(),
        "A synopsis long enough to describe the film.".to_string(),
        120,
        added_by,
    )
}
