//! Recency weighting for review ratings.

use chrono::{DateTime, Utc};

use crate::model::Review;
use crate::utils::stats::{mean, weighted_mean};

/// Exponential decay constant in days. A review 90 days old carries weight
/// `1/e` relative to one posted today.
const DECAY_DAYS: f64 = 90.0;

/// Recency-weighted rating adjustment.
///
/// Each review is weighted by `exp(-days_since / 90)` so recent reviews
/// dominate. The result is the *signed delta* between the recency-weighted
/// average and the plain average — not an absolute rating. Empty input
/// yields `0.0`.
#[must_use]
pub fn recency_adjustment(reviews: &[Review], now: DateTime<Utc>) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let ratings: Vec<f64> = reviews.iter().map(|r| f64::from(r.rating)).collect();
    let weights: Vec<f64> = reviews
        .iter()
        .map(|r| {
            let age_seconds = now.signed_duration_since(r.created_at).num_seconds().max(0);
            let age_days = age_seconds as f64 / 86_400.0;
            (-age_days / DECAY_DAYS).exp()
        })
        .collect();

    weighted_mean(&ratings, &weights) - mean(&ratings)
}
