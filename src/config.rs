//! Configuration types for the rating and trend engines.
//!
//! Provides the adjustment weight set used by the aggregator, the window
//! sizes used by the trend analyzer, and a small validation trait so
//! embedders can check externally supplied configuration before use.

use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Rating weights
// ============================================================================

/// Weights applied to the four rating adjustments (sum to 1.0).
///
/// Each adjustment (recency, credibility, category, volume) is computed at
/// full strength and then scaled by its weight before being added to the
/// base rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingWeights {
    /// Weight of the recency adjustment
    pub recency: f64,
    /// Weight of the reviewer-credibility adjustment
    pub credibility: f64,
    /// Weight of the category-benchmark adjustment
    pub category: f64,
    /// Weight of the review-volume bonus
    pub volume: f64,
}

impl Default for RatingWeights {
    fn default() -> Self {
        Self {
            recency: 0.3,
            credibility: 0.2,
            category: 0.3,
            volume: 0.2,
        }
    }
}

impl RatingWeights {
    /// Return weights as an array for iteration
    #[must_use]
    pub fn as_array(&self) -> [f64; 4] {
        [self.recency, self.credibility, self.category, self.volume]
    }
}

impl Validatable for RatingWeights {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (name, value) in [
            ("weights.recency", self.recency),
            ("weights.credibility", self.credibility),
            ("weights.category", self.category),
            ("weights.volume", self.volume),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError {
                    field: name.to_string(),
                    message: format!("Weight must be a non-negative number, got {value}"),
                });
            }
        }

        let sum: f64 = self.as_array().iter().sum();
        if (sum - 1.0).abs() > 0.01 {
            errors.push(ConfigError {
                field: "weights".to_string(),
                message: format!("Weights must sum to 1.0, got {sum}"),
            });
        }

        errors
    }
}

// ============================================================================
// Trend windows
// ============================================================================

/// Window sizes for trend analysis, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendWindows {
    /// Length of the "recent" window counted back from now
    pub recent_days: i64,
    /// Length of the comparison window immediately before the recent one
    pub comparison_days: i64,
}

impl Default for TrendWindows {
    fn default() -> Self {
        Self {
            recent_days: 30,
            comparison_days: 30,
        }
    }
}

impl Validatable for TrendWindows {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.recent_days <= 0 {
            errors.push(ConfigError {
                field: "trend.recent_days".to_string(),
                message: format!("Window must be positive, got {}", self.recent_days),
            });
        }
        if self.comparison_days <= 0 {
            errors.push(ConfigError {
                field: "trend.comparison_days".to_string(),
                message: format!("Window must be positive, got {}", self.comparison_days),
            });
        }
        errors
    }
}
