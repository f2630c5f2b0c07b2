use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// A single review score, 1 to 5 stars
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> DomainResult<Self> {
        if value < Self::MIN as i64 || value > Self::MAX as i64 {
            return Err(DomainError::InvalidRating(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// All ratings in ascending order
    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }
}

impl TryFrom<i64> for Rating {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mean rating with one decimal place, stored as tenths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AverageRating {
    tenths: u8,
}

impl AverageRating {
    pub const ZERO: AverageRating = AverageRating { tenths: 0 };
    pub const MAX_TENTHS: u8 = 50;

    pub fn from_tenths(tenths: u8) -> DomainResult<Self> {
        if tenths > Self::MAX_TENTHS {
            return Err(DomainError::InvalidValue(format!(
                "average rating {}.{} exceeds 5.0",
                tenths / 10,
                tenths % 10
            )));
        }
        Ok(Self { tenths })
    }

    /// Nearest one-decimal value; rejects anything outside 0.0..=5.0
    pub fn from_f64(value: f64) -> DomainResult<Self> {
        if !value.is_finite() || !(0.0..=5.0).contains(&value) {
            return Err(DomainError::InvalidValue(format!(
                "average rating {} is outside 0..=5",
                value
            )));
        }
        Self::from_tenths((value * 10.0).round() as u8)
    }

    /// Arithmetic mean rounded half-up to one decimal.
    ///
    /// Uses integer arithmetic: tenths = round(10 * sum / n) = (20 * sum + n) / (2 * n).
    pub fn mean_of(ratings: &[Rating]) -> Self {
        if ratings.is_empty() {
            return Self::ZERO;
        }

        let sum: u64 = ratings.iter().map(|r| r.value() as u64).sum();
        let count = ratings.len() as u64;
        let tenths = (20 * sum + count) / (2 * count);

        // mean of values in 1..=5 stays in 10..=50
        Self {
            tenths: tenths as u8,
        }
    }

    pub fn tenths(self) -> u8 {
        self.tenths
    }

    pub fn as_f64(self) -> f64 {
        self.tenths as f64 / 10.0
    }

    pub fn is_zero(self) -> bool {
        self.tenths == 0
    }
}

impl TryFrom<f64> for AverageRating {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        AverageRating::from_f64(value)
    }
}

impl From<AverageRating> for f64 {
    fn from(avg: AverageRating) -> Self {
        avg.as_f64()
    }
}

impl std::fmt::Display for AverageRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(values: &[i64]) -> Vec<Rating> {
        values.iter().map(|v| Rating::new(*v).unwrap()).collect()
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(5).unwrap().value(), 5);
    }

    #[test]
    fn test_rating_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("7").is_err());
        assert_eq!(serde_json::from_str::<Rating>("4").unwrap().value(), 4);
    }

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert_eq!(AverageRating::mean_of(&[]), AverageRating::ZERO);
    }

    #[test]
    fn test_mean_exact() {
        assert_eq!(AverageRating::mean_of(&ratings(&[4, 5, 3])).tenths(), 40);
    }

    #[test]
    fn test_mean_rounds_half_up() {
        // 4.25 -> 4.3
        assert_eq!(AverageRating::mean_of(&ratings(&[5, 5, 4, 3])).tenths(), 43);
        // 4.75 -> 4.8
        assert_eq!(AverageRating::mean_of(&ratings(&[5, 5, 5, 4])).tenths(), 48);
        // 1.5 stays 1.5
        assert_eq!(AverageRating::mean_of(&ratings(&[1, 2])).tenths(), 15);
    }

    #[test]
    fn test_mean_rounds_down_below_half() {
        // 1.333.. -> 1.3
        assert_eq!(AverageRating::mean_of(&ratings(&[1, 1, 2])).tenths(), 13);
        // 3.666.. -> 3.7
        assert_eq!(AverageRating::mean_of(&ratings(&[3, 4, 4])).tenths(), 37);
    }

    #[test]
    fn test_display_and_f64() {
        let avg = AverageRating::from_tenths(43).unwrap();
        assert_eq!(avg.to_string(), "4.3");
        assert!((avg.as_f64() - 4.3).abs() < f64::EPSILON);
        assert_eq!(AverageRating::from_f64(4.3).unwrap(), avg);
    }

    #[test]
    fn test_out_of_range_average_rejected() {
        assert!(AverageRating::from_tenths(51).is_err());
        assert!(AverageRating::from_f64(-0.1).is_err());
        assert!(AverageRating::from_f64(f64::NAN).is_err());
    }
}
