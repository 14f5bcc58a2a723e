//! Reviewer-credibility weighting for review ratings.

use crate::model::Review;
use crate::utils::stats::{mean, weighted_mean};

/// Maximum credibility weight per review.
const CREDIBILITY_CAP: f64 = 2.0;

/// Credibility weight for a single review.
///
/// Starts at `1.0` and grows with reviewer activity: organizing events,
/// registering for events, and having actually booked the vendor each add
/// trust. Capped at `2.0` so no single reviewer dominates.
#[must_use]
pub fn review_credibility(review: &Review) -> f64 {
    let mut credibility: f64 = 1.0;
    if review.reviewer_event_count > 5 {
        credibility += 0.2;
    }
    if review.reviewer_event_count > 10 {
        credibility += 0.2;
    }
    if review.reviewer_registration_count > 10 {
        credibility += 0.1;
    }
    if review.reviewer_registration_count > 25 {
        credibility += 0.1;
    }
    if review.verified_purchase {
        credibility += 0.3;
    }
    credibility.min(CREDIBILITY_CAP)
}

/// Credibility-weighted rating adjustment.
///
/// The *signed delta* between the credibility-weighted average rating and
/// the plain average. Empty input yields `0.0`.
#[must_use]
pub fn credibility_adjustment(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let ratings: Vec<f64> = reviews.iter().map(|r| f64::from(r.rating)).collect();
    let weights: Vec<f64> = reviews.iter().map(review_credibility).collect();

    weighted_mean(&ratings, &weights) - mean(&ratings)
}
