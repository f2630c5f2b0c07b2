use super::entity::User;
use crate::domain::validation::{
    is_valid_email, is_valid_media_url, is_valid_username, require_length,
};
use crate::domain::{DomainError, DomainResult};

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;

/// Validates all User invariants
pub fn validate_user(user: &User) -> DomainResult<()> {
    validate_username(&user.username)?;
    validate_email(&user.email)?;
    validate_profile_picture(&user.profile_picture)?;
    Ok(())
}

fn validate_username(username: &str) -> DomainResult<()> {
    require_length("Username", username, USERNAME_MIN_LEN, USERNAME_MAX_LEN)?;
    if !is_valid_username(username) {
        return Err(DomainError::InvariantViolation(
            "Username can only contain letters, numbers, and underscores".to_string(),
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> DomainResult<()> {
    if !is_valid_email(email) {
        return Err(DomainError::InvariantViolation(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    Ok(())
}

fn validate_profile_picture(url: &str) -> DomainResult<()> {
    if !is_valid_media_url(url) {
        return Err(DomainError::InvariantViolation(
            "Profile picture must be a valid URL".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for User domain:
///
/// 1. Username is 3..=30 characters of [A-Za-z0-9_]
/// 2. Email is a valid address and stored lowercase
/// 3. Username and email are unique (enforced by the store)
/// 4. Identity (UUID) and role are immutable through profile edits

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;

    #[test]
    fn test_valid_user() {
        let user = User::new("cinephile".to_string(), "Cine@Example.com".to_string(), Role::User);
        assert!(validate_user(&user).is_ok());
        assert_eq!(user.email, "cine@example.com");
    }

    #[test]
    fn test_short_username_fails() {
        let user = User::new("ab".to_string(), "ab@example.com".to_string(), Role::User);
        assert!(validate_user(&user).is_err());
    }

    #[test]
    fn test_username_with_symbols_fails() {
        let user = User::new("bad name!".to_string(), "x@example.com".to_string(), Role::User);
        assert!(validate_user(&user).is_err());
    }

    #[test]
    fn test_invalid_picture_fails() {
        let mut user = User::new("cinephile".to_string(), "c@example.com".to_string(), Role::User);
        user.update_profile(None, None, Some("not a url".to_string()));
        assert!(validate_user(&user).is_err());
    }

    #[test]
    fn test_actor_ownership() {
        let user = User::new("cinephile".to_string(), "c@example.com".to_string(), Role::Admin);
        let actor = user.as_actor();
        assert!(actor.is_admin());
        assert!(actor.owns(user.id));
    }
}
