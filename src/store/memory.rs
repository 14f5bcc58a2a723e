//! In-memory [`VendorStore`] implementation.
//!
//! Used by the test suites and by embedders that want the engines without a
//! database. Snapshots are held in an insertion-ordered map, so listing
//! operations are deterministic run to run.

use std::sync::RwLock;

use indexmap::IndexMap;

use super::VendorStore;
use crate::error::{RatingError, Result};
use crate::model::{VendorId, VendorSnapshot};

/// Thread-safe in-memory vendor store.
#[derive(Debug, Default)]
pub struct InMemoryVendorStore {
    vendors: RwLock<IndexMap<VendorId, VendorSnapshot>>,
}

impl InMemoryVendorStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a vendor snapshot.
    pub fn insert(&self, snapshot: VendorSnapshot) {
        let mut vendors = self.vendors.write().unwrap_or_else(|e| e.into_inner());
        vendors.insert(snapshot.vendor_id.clone(), snapshot);
    }

    /// Number of vendors in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vendors
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VendorStore for InMemoryVendorStore {
    fn load_vendor_snapshot(&self, vendor_id: &VendorId) -> Result<VendorSnapshot> {
        let vendors = self.vendors.read().unwrap_or_else(|e| e.into_inner());
        vendors
            .get(vendor_id)
            .cloned()
            .ok_or_else(|| RatingError::not_found(vendor_id))
    }

    fn load_category_peers(&self, category: &str) -> Result<Vec<VendorSnapshot>> {
        let vendors = self.vendors.read().unwrap_or_else(|e| e.into_inner());
        Ok(vendors
            .values()
            .filter(|v| v.is_verified() && v.service_categories.iter().any(|c| c == category))
            .cloned()
            .collect())
    }

    fn load_all_ratable_vendors(&self) -> Result<Vec<VendorId>> {
        let vendors = self.vendors.read().unwrap_or_else(|e| e.into_inner());
        Ok(vendors
            .values()
            .filter(|v| !v.reviews.is_empty())
            .map(|v| v.vendor_id.clone())
            .collect())
    }

    fn persist_vendor_rating(&self, vendor_id: &VendorId, rating: f64) -> Result<()> {
        let mut vendors = self.vendors.write().unwrap_or_else(|e| e.into_inner());
        let snapshot = vendors
            .get_mut(vendor_id)
            .ok_or_else(|| RatingError::not_found(vendor_id))?;
        snapshot.rating = rating;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Review, VerificationStatus};
    use chrono::Utc;

    fn snapshot(id: &str, reviews: usize, verified: bool) -> VendorSnapshot {
        VendorSnapshot {
            vendor_id: VendorId::from(id),
            reviews: (0..reviews).map(|_| Review::new(4, Utc::now())).collect(),
            service_categories: vec!["catering".to_string()],
            rating: 4.0,
            completion_rate: 95.0,
            response_time_hours: 12.0,
            verification_status: if verified {
                VerificationStatus::Verified
            } else {
                VerificationStatus::Pending
            },
            location: None,
            bookings: Vec::new(),
        }
    }

    #[test]
    fn test_load_missing_vendor_is_not_found() {
        let store = InMemoryVendorStore::new();
        let err = store
            .load_vendor_snapshot(&VendorId::from("ghost"))
            .expect_err("missing vendor must error");
        assert!(matches!(err, RatingError::NotFound { .. }));
    }

    #[test]
    fn test_category_peers_filters_unverified() {
        let store = InMemoryVendorStore::new();
        store.insert(snapshot("a", 3, true));
        store.insert(snapshot("b", 3, false));
        let peers = store.load_category_peers("catering").expect("peers");
        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].vendor_id.as_str(), "a");
    }

    #[test]
    fn test_unknown_category_is_empty_not_error() {
        let store = InMemoryVendorStore::new();
        store.insert(snapshot("a", 3, true));
        let peers = store.load_category_peers("florists").expect("peers");
        assert!(peers.is_empty());
    }

    #[test]
    fn test_ratable_vendors_excludes_reviewless() {
        let store = InMemoryVendorStore::new();
        store.insert(snapshot("a", 2, true));
        store.insert(snapshot("b", 0, true));
        let ids = store.load_all_ratable_vendors().expect("ids");
        assert_eq!(ids, vec![VendorId::from("a")]);
    }

    #[test]
    fn test_persist_updates_rating_in_place() {
        let store = InMemoryVendorStore::new();
        store.insert(snapshot("a", 2, true));
        store
            .persist_vendor_rating(&VendorId::from("a"), 4.7)
            .expect("persist");
        let reloaded = store
            .load_vendor_snapshot(&VendorId::from("a"))
            .expect("reload");
        assert_eq!(reloaded.rating, 4.7);
    }

    #[test]
    fn test_persist_missing_vendor_errors() {
        let store = InMemoryVendorStore::new();
        assert!(store
            .persist_vendor_rating(&VendorId::from("ghost"), 4.0)
            .is_err());
    }
}
