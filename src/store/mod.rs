//! Data-access seam between the engines and whatever holds the data.
//!
//! The engines never touch a database; they consume [`VendorStore`], which
//! is narrow by design — four read/write operations, nothing else. Wire it
//! to an ORM, a cache, or the bundled [`InMemoryVendorStore`].

mod memory;

pub use memory::InMemoryVendorStore;

use crate::error::Result;
use crate::model::{VendorId, VendorSnapshot};

/// Read/write contract to the persistence layer.
///
/// Implementations must be `Send + Sync`: the batch updater fans vendor
/// work out across a thread pool, and each per-vendor read-modify-write is
/// independent. Any locking needed to keep a vendor's rating write
/// last-writer-wins-consistent belongs to the implementation.
pub trait VendorStore: Send + Sync {
    /// Load the full snapshot for one vendor.
    ///
    /// Returns [`RatingError::NotFound`](crate::RatingError::NotFound) if
    /// the vendor does not exist.
    fn load_vendor_snapshot(&self, vendor_id: &VendorId) -> Result<VendorSnapshot>;

    /// Load all *verified* vendors offering the given category.
    ///
    /// An unknown category is not an error; it yields an empty list.
    fn load_category_peers(&self, category: &str) -> Result<Vec<VendorSnapshot>>;

    /// Ids of every vendor with at least one review.
    fn load_all_ratable_vendors(&self) -> Result<Vec<VendorId>>;

    /// Persist a recomputed rating for a vendor.
    fn persist_vendor_rating(&self, vendor_id: &VendorId, rating: f64) -> Result<()>;
}
