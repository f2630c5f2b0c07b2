use serde::{Deserialize, Serialize};

use super::value_objects::{AverageRating, Rating};

/// The derived aggregate stored on a movie.
/// Never a source of truth: always recomputable from the movie's reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average_rating: AverageRating,
    pub total_reviews: u32,
}

impl RatingSummary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_ratings(ratings: &[Rating]) -> Self {
        Self {
            average_rating: AverageRating::mean_of(ratings),
            total_reviews: ratings.len() as u32,
        }
    }

    /// Zero reviews must pair with a zero average, and vice versa
    pub fn is_consistent(&self) -> bool {
        (self.total_reviews == 0) == self.average_rating.is_zero()
    }
}

/// Number of reviews per star value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDistribution {
    counts: [u32; 5],
}

impl RatingDistribution {
    pub fn from_counts(counts: impl IntoIterator<Item = (Rating, u32)>) -> Self {
        let mut distribution = Self::default();
        for (rating, count) in counts {
            distribution.counts[(rating.value() - Rating::MIN) as usize] += count;
        }
        distribution
    }

    pub fn count(&self, rating: Rating) -> u32 {
        self.counts[(rating.value() - Rating::MIN) as usize]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Star values that have at least one review, ascending
    pub fn entries(&self) -> Vec<(Rating, u32)> {
        Rating::all()
            .map(|r| (r, self.count(r)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(v: i64) -> Rating {
        Rating::new(v).unwrap()
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = RatingSummary::from_ratings(&[]);
        assert_eq!(summary.total_reviews, 0);
        assert!(summary.average_rating.is_zero());
        assert!(summary.is_consistent());
    }

    #[test]
    fn test_summary_counts_reviews() {
        let summary = RatingSummary::from_ratings(&[r(5), r(5), r(4), r(3)]);
        assert_eq!(summary.total_reviews, 4);
        assert_eq!(summary.average_rating.to_string(), "4.3");
        assert!(summary.is_consistent());
    }

    #[test]
    fn test_inconsistent_summary_detected() {
        let summary = RatingSummary {
            average_rating: AverageRating::from_tenths(30).unwrap(),
            total_reviews: 0,
        };
        assert!(!summary.is_consistent());
    }

    #[test]
    fn test_distribution_entries_skip_empty_buckets() {
        let dist = RatingDistribution::from_counts(vec![(r(5), 2), (r(3), 1), (r(5), 1)]);
        assert_eq!(dist.count(r(5)), 3);
        assert_eq!(dist.count(r(1)), 0);
        assert_eq!(dist.total(), 4);
        assert_eq!(dist.entries(), vec![(r(3), 1), (r(5), 3)]);
    }
}
