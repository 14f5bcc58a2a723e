//! Vendor performance trend detection.
//!
//! Splits a vendor's reviews and bookings into a recent window and the
//! history before it, classifies the direction of each signal, and scores
//! how strongly the vendor is "trending" for discovery surfaces.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::TrendWindows;
use crate::error::Result;
use crate::model::{VendorId, VendorSnapshot};
use crate::store::VendorStore;
use crate::utils::stats::{mean, round_dp};

/// Relative change below which a signal counts as flat.
const STABLE_BAND: f64 = 0.1;

/// Direction of a performance signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// Trend classification for one vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Vendor identifier
    pub vendor_id: VendorId,
    /// Composite trending score (higher = hotter)
    pub trend_score: f64,
    /// Mean rating inside the recent window (lifetime rating if the window
    /// is empty)
    pub recent_rating: f64,
    /// Direction of the rating signal
    pub rating_trend: TrendDirection,
    /// Direction of the booking-volume signal
    pub booking_trend: TrendDirection,
    /// Reviews inside the recent window
    pub recent_review_count: usize,
}

/// Trend engine over a vendor store.
pub struct TrendAnalyzer<'a> {
    store: &'a dyn VendorStore,
    windows: TrendWindows,
}

impl<'a> TrendAnalyzer<'a> {
    /// Create an analyzer with the default 30-day windows.
    pub fn new(store: &'a dyn VendorStore) -> Self {
        Self {
            store,
            windows: TrendWindows::default(),
        }
    }

    /// Set custom window sizes.
    #[must_use]
    pub const fn with_windows(mut self, windows: TrendWindows) -> Self {
        self.windows = windows;
        self
    }

    /// Trending vendors as of now.
    pub fn trending_vendors(
        &self,
        category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<TrendResult>> {
        self.trending_vendors_at(category, limit, Utc::now())
    }

    /// Trending vendors as of an explicit `now`.
    ///
    /// Only vendors with at least one review inside the recent window
    /// qualify. Output is sorted descending by trend score and truncated to
    /// `limit`; ties keep first-seen store order.
    pub fn trending_vendors_at(
        &self,
        category: Option<&str>,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<TrendResult>> {
        let ids = self.store.load_all_ratable_vendors()?;
        let mut results = Vec::new();
        for id in &ids {
            let snapshot = self.store.load_vendor_snapshot(id)?;
            snapshot.validate()?;
            if let Some(category) = category {
                if !snapshot.service_categories.iter().any(|c| c == category) {
                    continue;
                }
            }
            let result = self.analyze_at(&snapshot, now);
            if result.recent_review_count == 0 {
                continue;
            }
            results.push(result);
        }

        results.sort_by(|a, b| b.trend_score.total_cmp(&a.trend_score));
        results.truncate(limit);
        tracing::debug!(trending = results.len(), "trend analysis complete");
        Ok(results)
    }

    /// Classify one vendor's trend as of `now`. Pure: no store access.
    #[must_use]
    pub fn analyze_at(&self, snapshot: &VendorSnapshot, now: DateTime<Utc>) -> TrendResult {
        let recent_cutoff = now - Duration::days(self.windows.recent_days);
        let prior_cutoff = recent_cutoff - Duration::days(self.windows.comparison_days);

        let mut recent_ratings = Vec::new();
        let mut older_ratings = Vec::new();
        for review in &snapshot.reviews {
            if review.created_at >= recent_cutoff {
                recent_ratings.push(f64::from(review.rating));
            } else {
                older_ratings.push(f64::from(review.rating));
            }
        }
        let recent_review_count = recent_ratings.len();

        let recent_rating = if recent_ratings.is_empty() {
            snapshot.rating
        } else {
            mean(&recent_ratings)
        };
        let previous_rating = mean(&older_ratings);
        let rating_trend = trend(recent_rating, previous_rating);

        let recent_bookings = snapshot
            .bookings
            .iter()
            .filter(|b| **b >= recent_cutoff)
            .count();
        let prior_bookings = snapshot
            .bookings
            .iter()
            .filter(|b| **b >= prior_cutoff && **b < recent_cutoff)
            .count();
        let booking_trend = trend(recent_bookings as f64, prior_bookings as f64);

        let trend_score = recent_rating * 20.0
            + if rating_trend == TrendDirection::Up { 10.0 } else { 0.0 }
            + if booking_trend == TrendDirection::Up { 15.0 } else { 0.0 }
            + (recent_review_count as f64 * 2.0).min(10.0);

        TrendResult {
            vendor_id: snapshot.vendor_id.clone(),
            trend_score: round_dp(trend_score, 1),
            recent_rating: round_dp(recent_rating, 1),
            rating_trend,
            booking_trend,
            recent_review_count,
        }
    }
}

/// Classify the change from `previous` to `current`.
///
/// A relative change under 10% is `Stable`. A `previous` of zero has no
/// meaningful ratio; any activity from a standing start counts as `Up`,
/// no activity at all as `Stable`.
fn trend(current: f64, previous: f64) -> TrendDirection {
    if previous == 0.0 {
        return if current > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Stable
        };
    }
    let change = (current - previous) / previous;
    if change.abs() < STABLE_BAND {
        TrendDirection::Stable
    } else if change > 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    }
}
