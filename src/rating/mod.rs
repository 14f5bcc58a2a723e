//! Weighted rating computation.
//!
//! The [`RatingAggregator`] composes four independent adjustment signals —
//! recency, reviewer credibility, category benchmark and review volume —
//! into one clamped weighted rating plus a confidence measure.

pub mod aggregator;
pub mod benchmark;
pub mod credibility;
pub mod recency;
pub mod volume;

pub use aggregator::{RatingAdjustments, RatingAggregator, WeightedRatingResult};
pub use benchmark::CategoryBenchmarks;
pub use credibility::credibility_adjustment;
pub use recency::recency_adjustment;
pub use volume::volume_bonus;
