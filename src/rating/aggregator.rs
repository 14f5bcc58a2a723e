//! Weighted rating aggregation.
//!
//! Main rating engine that combines the recency, credibility, category and
//! volume signals into one clamped weighted rating with a confidence
//! measure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::benchmark::CategoryBenchmarks;
use super::credibility::credibility_adjustment;
use super::recency::recency_adjustment;
use super::volume::volume_bonus;
use crate::config::RatingWeights;
use crate::error::Result;
use crate::model::VendorSnapshot;
use crate::store::VendorStore;
use crate::utils::stats::{mean, population_std_dev, round_dp};

/// Damping factor applied to the distance from the category average.
const CATEGORY_PULL: f64 = 0.1;

/// Review count below which the confidence formula is overridden.
const MIN_SAMPLE: usize = 3;

/// Confidence assigned to vendors with an insufficient sample (1–2 reviews).
const LOW_SAMPLE_CONFIDENCE: f64 = 0.3;

/// The four adjustment signals, each a signed delta in rating points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingAdjustments {
    /// Recency-weighted delta (recent reviews dominate)
    pub recency: f64,
    /// Reviewer-credibility-weighted delta
    pub credibility: f64,
    /// Damped pull toward the category average
    pub category: f64,
    /// Review-volume bonus band
    pub volume: f64,
}

/// Output of a weighted rating computation. Immutable value object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct WeightedRatingResult {
    /// Final rating, clamped to 1–5 (0 for the no-data sentinel)
    pub weighted_rating: f64,
    /// Plain mean of the review ratings
    pub base_rating: f64,
    /// The adjustment signals that produced the weighted rating
    pub adjustments: RatingAdjustments,
    /// How trustworthy the weighted rating is, 0–1
    pub confidence: f64,
}

impl WeightedRatingResult {
    /// Sentinel for a vendor with zero reviews. Not an error: "no data yet"
    /// is an expected state.
    #[must_use]
    pub const fn no_data() -> Self {
        Self {
            weighted_rating: 0.0,
            base_rating: 0.0,
            adjustments: RatingAdjustments {
                recency: 0.0,
                credibility: 0.0,
                category: 0.0,
                volume: 0.0,
            },
            confidence: 0.0,
        }
    }

    /// Whether this is the zero-review sentinel.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        self.weighted_rating == 0.0 && self.confidence == 0.0
    }
}

/// Rating engine composing the per-dimension adjustments.
pub struct RatingAggregator<'a> {
    store: &'a dyn VendorStore,
    weights: RatingWeights,
}

impl<'a> RatingAggregator<'a> {
    /// Create an aggregator with the default adjustment weights.
    pub fn new(store: &'a dyn VendorStore) -> Self {
        Self {
            store,
            weights: RatingWeights::default(),
        }
    }

    /// Set custom adjustment weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: RatingWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Compute the weighted rating for a vendor as of now.
    pub fn weighted_rating(&self, snapshot: &VendorSnapshot) -> Result<WeightedRatingResult> {
        self.weighted_rating_at(snapshot, Utc::now())
    }

    /// Compute the weighted rating as of an explicit `now`.
    ///
    /// The category benchmark is loaded for the vendor's *primary* (first
    /// listed) category; a vendor with no categories gets the fixed
    /// benchmark defaults.
    pub fn weighted_rating_at(
        &self,
        snapshot: &VendorSnapshot,
        now: DateTime<Utc>,
    ) -> Result<WeightedRatingResult> {
        let benchmark = match snapshot.primary_category() {
            Some(category) => CategoryBenchmarks::for_category(self.store, category)?,
            None => CategoryBenchmarks::defaults(),
        };
        self.weighted_rating_with_benchmark(snapshot, &benchmark, now)
    }

    /// Compute the weighted rating against a precomputed category benchmark.
    ///
    /// The ranking engine uses this to share one benchmark across all
    /// vendors of a category instead of reloading peers per vendor.
    pub fn weighted_rating_with_benchmark(
        &self,
        snapshot: &VendorSnapshot,
        benchmark: &CategoryBenchmarks,
        now: DateTime<Utc>,
    ) -> Result<WeightedRatingResult> {
        snapshot.validate()?;

        if snapshot.reviews.is_empty() {
            return Ok(WeightedRatingResult::no_data());
        }

        let ratings = snapshot.rating_values();
        let base_rating = mean(&ratings);

        let adjustments = RatingAdjustments {
            recency: recency_adjustment(&snapshot.reviews, now),
            credibility: credibility_adjustment(&snapshot.reviews),
            category: (base_rating - benchmark.average_rating) * CATEGORY_PULL,
            volume: volume_bonus(snapshot.review_count()),
        };

        let weighted = base_rating
            + adjustments.recency * self.weights.recency
            + adjustments.credibility * self.weights.credibility
            + adjustments.category * self.weights.category
            + adjustments.volume * self.weights.volume;
        let weighted = weighted.clamp(1.0, 5.0);

        let confidence = confidence_score(&ratings);

        tracing::debug!(
            vendor = %snapshot.vendor_id,
            weighted,
            confidence,
            "computed weighted rating"
        );

        Ok(WeightedRatingResult {
            weighted_rating: round_dp(weighted, 1),
            base_rating: round_dp(base_rating, 1),
            adjustments: RatingAdjustments {
                recency: round_dp(adjustments.recency, 2),
                credibility: round_dp(adjustments.credibility, 2),
                category: round_dp(adjustments.category, 2),
                volume: round_dp(adjustments.volume, 2),
            },
            confidence: round_dp(confidence, 2),
        })
    }
}

/// Confidence in a rating, from rating variance and review volume.
///
/// Fewer than three reviews is an insufficient sample and forces `0.3`
/// regardless of the formula.
fn confidence_score(ratings: &[f64]) -> f64 {
    if ratings.len() < MIN_SAMPLE {
        return LOW_SAMPLE_CONFIDENCE;
    }

    // Lower variance means higher confidence
    let distribution_score = (1.0 - population_std_dev(ratings) / 2.0).max(0.0);
    // Diminishing returns past ~50 reviews
    let volume_score = ((ratings.len() as f64 + 1.0).ln() / 50f64.ln()).min(1.0);

    (0.6 * distribution_score + 0.4 * volume_score).clamp(0.0, 1.0)
}
