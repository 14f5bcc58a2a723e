//! Small statistical helpers used by the rating engines.
//!
//! All computation runs at full `f64` precision; [`round_dp`] is applied
//! only when building output values at the API boundary.

/// Arithmetic mean. Empty input yields `0.0`.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Weighted arithmetic mean.
///
/// Falls back to the simple mean when the total weight is zero (or the
/// slices are empty), so callers never divide by zero.
#[must_use]
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    debug_assert_eq!(values.len(), weights.len());
    let total_weight: f64 = weights.iter().sum();
    if total_weight <= 0.0 {
        return mean(values);
    }
    let weighted_sum: f64 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    weighted_sum / total_weight
}

/// Population standard deviation. Empty input yields `0.0`.
#[must_use]
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance =
        values.iter().map(|v| (v - avg) * (v - avg)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Round to `decimals` decimal places (half away from zero).
#[must_use]
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
