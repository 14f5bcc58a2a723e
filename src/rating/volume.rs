//! Review-volume bonus bands.

/// Bonus or penalty for a vendor's review count.
///
/// A pure step function: thin review histories are penalized, large ones
/// rewarded with diminishing steps.
#[must_use]
pub const fn volume_bonus(review_count: usize) -> f64 {
    match review_count {
        0..=4 => -0.2,
        5..=9 => 0.0,
        10..=24 => 0.1,
        25..=49 => 0.2,
        _ => 0.3,
    }
}
