//! **A rating, ranking and trend-analysis engine for marketplace vendors.**
//!
//! `vendor-rank` turns raw, noisy review records into a single trustworthy
//! score per vendor, compares vendors against their category peers, ranks
//! them for discovery, and detects performance trends over time. It is a
//! pure computation core: persistence, HTTP transport and the data-access
//! layer are external collaborators reached through the narrow
//! [`VendorStore`] trait.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: Defines the input value types — [`VendorSnapshot`] and
//!   [`Review`] — constructed once at the data-access boundary. The engines
//!   treat them as immutable facts; nothing in this crate mutates a review.
//! - **[`store`]**: The [`VendorStore`] seam to whatever actually holds the
//!   data. An [`InMemoryVendorStore`] is provided for tests and embedders
//!   without a database.
//! - **[`rating`]**: The [`RatingAggregator`] composes recency, credibility,
//!   category and volume adjustments into one weighted rating with a
//!   confidence measure.
//! - **[`ranking`]**: The [`RankingEngine`] builds a 0–100 composite score
//!   from rating, volume, verification, completion rate, response time and
//!   category rank, then assigns dense ranks.
//! - **[`trend`]**: The [`TrendAnalyzer`] splits each vendor's recent
//!   activity from its history and classifies rating/booking direction.
//! - **[`batch`]**: The [`BatchRatingUpdater`] recomputes and persists every
//!   vendor's rating with per-vendor failure isolation.
//!
//! ## Getting Started: Rating a Vendor
//!
//! ```
//! use vendor_rank::model::{Review, VendorId, VendorSnapshot, VerificationStatus};
//! use vendor_rank::store::InMemoryVendorStore;
//! use vendor_rank::rating::RatingAggregator;
//!
//! fn main() -> vendor_rank::Result<()> {
//!     let store = InMemoryVendorStore::new();
//!     let vendor = VendorSnapshot {
//!         vendor_id: VendorId::from("vendor-1"),
//!         reviews: vec![Review::new(5, chrono::Utc::now())],
//!         service_categories: vec!["catering".to_string()],
//!         rating: 0.0,
//!         completion_rate: 97.0,
//!         response_time_hours: 4.0,
//!         verification_status: VerificationStatus::Verified,
//!         location: None,
//!         bookings: Vec::new(),
//!     };
//!     store.insert(vendor.clone());
//!
//!     let aggregator = RatingAggregator::new(&store);
//!     let result = aggregator.weighted_rating(&vendor)?;
//!
//!     println!("rating {} (confidence {})", result.weighted_rating, result.confidence);
//!     Ok(())
//! }
//! ```
//!
//! ## Determinism
//!
//! Every time-dependent operation has an `*_at` variant taking an explicit
//! `now` timestamp; the un-suffixed methods use `Utc::now()`. Given the same
//! snapshots and the same `now`, every engine in this crate is a pure
//! function — re-running ranking on unchanged input yields an identical
//! order, rank for rank.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: usize↔f64 casts are pervasive in the statistical
    // calculations — review counts and day spans are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    // Doc completeness: # Errors sections are aspirational for store impls
    clippy::missing_errors_doc,
    // Variable names like `adj`/`avg` or `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod batch;
pub mod config;
pub mod error;
pub mod model;
pub mod ranking;
pub mod rating;
pub mod store;
pub mod trend;
pub mod utils;

// Re-export main types for convenience
pub use batch::{BatchRatingUpdater, BatchUpdateDetail, BatchUpdateReport, CancelFlag};
pub use config::{ConfigError, RatingWeights, TrendWindows, Validatable};
pub use error::{RatingError, Result};
pub use model::{Review, VendorId, VendorSnapshot, VerificationStatus};
pub use ranking::{RankingEngine, RankingEntry, RankingQuery, VendorRankingFactors};
pub use rating::{CategoryBenchmarks, RatingAdjustments, RatingAggregator, WeightedRatingResult};
pub use store::{InMemoryVendorStore, VendorStore};
pub use trend::{TrendAnalyzer, TrendDirection, TrendResult};
