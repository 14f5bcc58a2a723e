//! Batch recomputation of vendor ratings.
//!
//! The [`BatchRatingUpdater`] walks every vendor with at least one review,
//! recomputes its weighted rating and persists it. A single vendor's
//! failure — recomputation or persistence — is recorded in the report and
//! never aborts the remaining vendors. There is no automatic retry; an
//! error is terminal for that vendor for this run.
//!
//! Per-vendor work is independent (pure computation plus one write), so it
//! fans out across the rayon thread pool. Cancellation is cooperative:
//! vendors not yet started when the flag trips are skipped, and updates
//! already persisted stand — there is no rollback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::RatingWeights;
use crate::error::Result;
use crate::model::VendorId;
use crate::rating::RatingAggregator;
use crate::store::VendorStore;

/// Cooperative cancellation flag for a batch run.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// A flag that has not been tripped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Vendors already being processed finish.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome for one vendor attempted in a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchUpdateDetail {
    /// Vendor identifier
    pub vendor_id: VendorId,
    /// Rating on record before the run (`None` if the snapshot never loaded)
    pub old_rating: Option<f64>,
    /// Recomputed rating (`None` on failure)
    pub new_rating: Option<f64>,
    /// Error message, present iff this vendor failed
    pub error: Option<String>,
}

impl BatchUpdateDetail {
    /// Whether this vendor's update committed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Report of a full batch run: one detail row per vendor attempted,
/// success or failure, in store listing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchUpdateReport {
    /// Vendors whose new rating was persisted
    pub updated: usize,
    /// Vendors that failed
    pub errors: usize,
    /// Per-vendor outcomes
    pub details: Vec<BatchUpdateDetail>,
}

/// Batch rating updater over a vendor store.
pub struct BatchRatingUpdater<'a> {
    store: &'a dyn VendorStore,
    weights: RatingWeights,
}

impl<'a> BatchRatingUpdater<'a> {
    /// Create an updater with the default rating weights.
    pub fn new(store: &'a dyn VendorStore) -> Self {
        Self {
            store,
            weights: RatingWeights::default(),
        }
    }

    /// Use custom rating weights for the recomputation.
    #[must_use]
    pub const fn with_weights(mut self, weights: RatingWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Recompute and persist every ratable vendor's rating.
    pub fn update_all_vendor_ratings(&self) -> Result<BatchUpdateReport> {
        self.update_all_vendor_ratings_with_cancel(&CancelFlag::new())
    }

    /// Batch run with a cancellation flag, as of now.
    pub fn update_all_vendor_ratings_with_cancel(
        &self,
        cancel: &CancelFlag,
    ) -> Result<BatchUpdateReport> {
        self.update_all_vendor_ratings_at(cancel, Utc::now())
    }

    /// Batch run as of an explicit `now`.
    ///
    /// Listing the vendor ids is the only step that can fail the whole run;
    /// from there every failure is per-vendor and local.
    pub fn update_all_vendor_ratings_at(
        &self,
        cancel: &CancelFlag,
        now: DateTime<Utc>,
    ) -> Result<BatchUpdateReport> {
        let ids = self.store.load_all_ratable_vendors()?;
        tracing::debug!(vendors = ids.len(), "starting batch rating update");

        let details: Vec<BatchUpdateDetail> = ids
            .par_iter()
            .filter_map(|id| {
                if cancel.is_cancelled() {
                    return None;
                }
                Some(self.update_one(id, now))
            })
            .collect();

        let updated = details.iter().filter(|d| d.is_success()).count();
        let errors = details.len() - updated;
        tracing::info!(updated, errors, "batch rating update complete");

        Ok(BatchUpdateReport {
            updated,
            errors,
            details,
        })
    }

    fn update_one(&self, vendor_id: &VendorId, now: DateTime<Utc>) -> BatchUpdateDetail {
        match self.try_update(vendor_id, now) {
            Ok((old_rating, new_rating)) => BatchUpdateDetail {
                vendor_id: vendor_id.clone(),
                old_rating: Some(old_rating),
                new_rating: Some(new_rating),
                error: None,
            },
            Err(e) => {
                tracing::warn!("Rating update failed for {vendor_id}: {e}");
                BatchUpdateDetail {
                    vendor_id: vendor_id.clone(),
                    old_rating: None,
                    new_rating: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    fn try_update(&self, vendor_id: &VendorId, now: DateTime<Utc>) -> Result<(f64, f64)> {
        let snapshot = self.store.load_vendor_snapshot(vendor_id)?;
        let aggregator = RatingAggregator::new(self.store).with_weights(self.weights);
        let result = aggregator.weighted_rating_at(&snapshot, now)?;
        self.store
            .persist_vendor_rating(vendor_id, result.weighted_rating)?;
        Ok((snapshot.rating, result.weighted_rating))
    }
}
