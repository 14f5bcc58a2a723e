//! Input data model for the rating engines.
//!
//! These value types are constructed once at the data-access boundary and
//! treated as immutable facts by every engine in the crate.

mod snapshot;

pub use snapshot::{Review, VendorId, VendorSnapshot, VerificationStatus};
