//! Shared utility functions.

pub mod stats;

pub use stats::{mean, population_std_dev, round_dp, weighted_mean};
