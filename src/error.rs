//! Unified error types for vendor-rank.
//!
//! The taxonomy is deliberately small: lookups that miss, inputs that are
//! malformed, and writes that fail. Expected "no data" cases (zero reviews,
//! empty categories) are sentinel values in the result types, never errors.

use thiserror::Error;

use crate::model::VendorId;

/// Main error type for vendor-rank operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RatingError {
    /// A vendor was requested that the store does not know about.
    ///
    /// Note: an *absent category* is not an error — category benchmarks fall
    /// back to fixed defaults when a category has no verified peers.
    #[error("Vendor not found: {vendor_id}")]
    NotFound { vendor_id: VendorId },

    /// A snapshot failed validation (e.g. a review rating outside 1..=5).
    #[error("Invalid input for vendor {vendor_id}: {message}")]
    InvalidInput { vendor_id: VendorId, message: String },

    /// Writing a recomputed rating back to storage failed.
    #[error("Failed to persist rating for vendor {vendor_id}: {message}")]
    Persistence { vendor_id: VendorId, message: String },
}

impl RatingError {
    /// Create a `NotFound` error for a vendor id.
    pub fn not_found(vendor_id: impl Into<VendorId>) -> Self {
        Self::NotFound {
            vendor_id: vendor_id.into(),
        }
    }

    /// Create an `InvalidInput` error with a description of the violation.
    pub fn invalid_input(vendor_id: impl Into<VendorId>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            vendor_id: vendor_id.into(),
            message: message.into(),
        }
    }

    /// Create a `Persistence` error for a failed rating write.
    pub fn persistence(vendor_id: impl Into<VendorId>, message: impl Into<String>) -> Self {
        Self::Persistence {
            vendor_id: vendor_id.into(),
            message: message.into(),
        }
    }

    /// The vendor this error concerns.
    #[must_use]
    pub fn vendor_id(&self) -> &VendorId {
        match self {
            Self::NotFound { vendor_id }
            | Self::InvalidInput { vendor_id, .. }
            | Self::Persistence { vendor_id, .. } => vendor_id,
        }
    }
}

/// Convenient Result type for vendor-rank operations
pub type Result<T> = std::result::Result<T, RatingError>;
