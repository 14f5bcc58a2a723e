//! Category-wide benchmark averages.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::VendorSnapshot;
use crate::store::VendorStore;
use crate::utils::stats::mean;

/// Mean performance figures across a category's verified peers.
///
/// Derived on demand, never persisted. Callers must never treat an empty
/// category as an error: with no qualifying peers the fixed defaults below
/// are returned instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryBenchmarks {
    /// Mean lifetime rating across peers
    pub average_rating: f64,
    /// Mean review count across peers
    pub average_review_count: f64,
    /// Mean completion rate across peers, 0–100
    pub average_completion_rate: f64,
    /// Mean response time across peers, in hours
    pub average_response_time: f64,
}

impl CategoryBenchmarks {
    /// Fallback figures used when a category has no verified peers with
    /// reviews.
    #[must_use]
    pub const fn defaults() -> Self {
        Self {
            average_rating: 4.0,
            average_review_count: 10.0,
            average_completion_rate: 95.0,
            average_response_time: 24.0,
        }
    }

    /// Compute benchmarks from a peer set.
    ///
    /// Peers without reviews are skipped; if none remain, the defaults are
    /// returned.
    #[must_use]
    pub fn from_peers(peers: &[VendorSnapshot]) -> Self {
        let rated: Vec<&VendorSnapshot> =
            peers.iter().filter(|p| !p.reviews.is_empty()).collect();
        if rated.is_empty() {
            return Self::defaults();
        }

        let ratings: Vec<f64> = rated.iter().map(|p| p.rating).collect();
        let counts: Vec<f64> = rated.iter().map(|p| p.review_count() as f64).collect();
        let completion: Vec<f64> = rated.iter().map(|p| p.completion_rate).collect();
        let response: Vec<f64> = rated.iter().map(|p| p.response_time_hours).collect();

        Self {
            average_rating: mean(&ratings),
            average_review_count: mean(&counts),
            average_completion_rate: mean(&completion),
            average_response_time: mean(&response),
        }
    }

    /// Load a category's verified peers from the store and compute
    /// benchmarks for them.
    pub fn for_category(store: &dyn VendorStore, category: &str) -> Result<Self> {
        let peers = store.load_category_peers(category)?;
        Ok(Self::from_peers(&peers))
    }
}

impl Default for CategoryBenchmarks {
    fn default() -> Self {
        Self::defaults()
    }
}
