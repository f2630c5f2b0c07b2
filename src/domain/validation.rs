// src/domain/validation.rs
//
// Shared field checks used by the per-entity invariant modules

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::{DomainError, DomainResult};

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("static regex"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
            .expect("static regex")
    })
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("static regex"))
}

/// Field must contain something other than whitespace
pub fn require_non_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}

/// Character count (not bytes) must fall within min..=max
pub fn require_length(field: &str, value: &str, min: usize, max: usize) -> DomainResult<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(DomainError::InvariantViolation(format!(
            "{} must be between {} and {} characters (got {})",
            field, min, max, len
        )));
    }
    Ok(())
}

pub fn is_valid_username(value: &str) -> bool {
    username_pattern().is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Empty, an absolute http(s) URL, or a site-relative path such as `/posters/x.png`
pub fn is_valid_media_url(value: &str) -> bool {
    value.is_empty()
        || url_pattern().is_match(value)
        || (value.starts_with('/') && !value.starts_with("//") && !value.contains(char::is_whitespace))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_pattern() {
        assert!(is_valid_username("film_buff_99"));
        assert!(!is_valid_username("film buff"));
        assert!(!is_valid_username("dash-name"));
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("admin@moviereview.com"));
        assert!(!is_valid_email("admin@"));
        assert!(!is_valid_email("no-at-sign.com"));
    }

    #[test]
    fn test_media_urls() {
        assert!(is_valid_media_url(""));
        assert!(is_valid_media_url("https://img.example.com/poster.jpg"));
        assert!(is_valid_media_url("/shawshank-redemption-poster.png"));
        assert!(!is_valid_media_url("ftp://example.com/x"));
        assert!(!is_valid_media_url("//evil.example.com"));
    }

    #[test]
    fn test_length_counts_chars() {
        // 10 multi-byte characters
        assert!(require_length("text", "éééééééééé", 10, 20).is_ok());
        assert!(require_length("text", "short", 10, 20).is_err());
    }
}
