//! Vendor snapshot and review value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RatingError, Result};

/// Stable identifier for a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(String);

impl VendorId {
    /// Create a new vendor id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VendorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VendorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for VendorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&VendorId> for VendorId {
    fn from(id: &VendorId) -> Self {
        id.clone()
    }
}

/// Vendor verification state as recorded by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Verified,
    Pending,
    Rejected,
}

/// A single customer review, immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Star rating, 1–5
    pub rating: u8,
    /// When the review was submitted
    pub created_at: DateTime<Utc>,
    /// Whether the reviewer actually booked the vendor
    pub verified_purchase: bool,
    /// Number of events the reviewer has organized on the platform
    pub reviewer_event_count: u32,
    /// Number of event registrations the reviewer has made
    pub reviewer_registration_count: u32,
}

impl Review {
    /// Create a review with no reviewer-activity signals.
    #[must_use]
    pub fn new(rating: u8, created_at: DateTime<Utc>) -> Self {
        Self {
            rating,
            created_at,
            verified_purchase: false,
            reviewer_event_count: 0,
            reviewer_registration_count: 0,
        }
    }
}

/// Read-only view of a vendor as supplied by the persistence layer.
///
/// The engines hold no back-references into storage; a snapshot is a value
/// passed in per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorSnapshot {
    /// Vendor identifier
    pub vendor_id: VendorId,
    /// All reviews for this vendor
    pub reviews: Vec<Review>,
    /// Service categories, first entry is the primary category
    pub service_categories: Vec<String>,
    /// Currently persisted (lifetime) rating, 0–5
    pub rating: f64,
    /// Percentage of accepted bookings completed, 0–100
    pub completion_rate: f64,
    /// Average hours to first response to an inquiry
    pub response_time_hours: f64,
    /// Verification state
    pub verification_status: VerificationStatus,
    /// Optional service location used for discovery filtering
    pub location: Option<String>,
    /// Timestamps of completed bookings
    pub bookings: Vec<DateTime<Utc>>,
}

impl VendorSnapshot {
    /// Number of reviews on record.
    #[must_use]
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// The vendor's primary service category (first listed), if any.
    #[must_use]
    pub fn primary_category(&self) -> Option<&str> {
        self.service_categories.first().map(String::as_str)
    }

    /// Review ratings as floats, in review order.
    #[must_use]
    pub fn rating_values(&self) -> Vec<f64> {
        self.reviews.iter().map(|r| f64::from(r.rating)).collect()
    }

    /// Whether the vendor is verified.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.verification_status == VerificationStatus::Verified
    }

    /// Validate the snapshot, rejecting malformed data from the boundary.
    pub fn validate(&self) -> Result<()> {
        for review in &self.reviews {
            if !(1..=5).contains(&review.rating) {
                return Err(RatingError::invalid_input(
                    &self.vendor_id,
                    format!("review rating {} outside 1..=5", review.rating),
                ));
            }
        }
        if !self.rating.is_finite() || !(0.0..=5.0).contains(&self.rating) {
            return Err(RatingError::invalid_input(
                &self.vendor_id,
                format!("stored rating {} outside 0..=5", self.rating),
            ));
        }
        if !self.completion_rate.is_finite() || !(0.0..=100.0).contains(&self.completion_rate) {
            return Err(RatingError::invalid_input(
                &self.vendor_id,
                format!("completion rate {} outside 0..=100", self.completion_rate),
            ));
        }
        if !self.response_time_hours.is_finite() || self.response_time_hours < 0.0 {
            return Err(RatingError::invalid_input(
                &self.vendor_id,
                format!("response time {} is negative", self.response_time_hours),
            ));
        }
        Ok(())
    }
}
