//! Property-based tests for the rating and ranking invariants.
//!
//! Ensures the engines hold their output bounds across random inputs:
//! weighted ratings stay in range, confidence stays in range, and ranking
//! always produces a dense, deterministic permutation.

use chrono::{Duration, Utc};
use proptest::prelude::*;
use vendor_rank::model::{Review, VendorId, VendorSnapshot, VerificationStatus};
use vendor_rank::ranking::{RankingEngine, RankingQuery};
use vendor_rank::rating::RatingAggregator;
use vendor_rank::store::InMemoryVendorStore;

fn snapshot_from(id: &str, reviews: Vec<Review>) -> VendorSnapshot {
    VendorSnapshot {
        vendor_id: VendorId::from(id),
        reviews,
        service_categories: vec!["catering".to_string()],
        rating: 3.5,
        completion_rate: 90.0,
        response_time_hours: 10.0,
        verification_status: VerificationStatus::Verified,
        location: None,
        bookings: Vec::new(),
    }
}

/// Arbitrary review: star rating 1–5, age up to ~400 days, random
/// reviewer-activity signals.
fn arb_review() -> impl Strategy<Value = (u8, i64, bool, u32, u32)> {
    (1..=5_u8, 0..400_i64, any::<bool>(), 0..40_u32, 0..60_u32)
}

fn build_reviews(raw: Vec<(u8, i64, bool, u32, u32)>) -> Vec<Review> {
    let now = Utc::now();
    raw.into_iter()
        .map(|(rating, days_ago, verified, events, registrations)| Review {
            rating,
            created_at: now - Duration::days(days_ago),
            verified_purchase: verified,
            reviewer_event_count: events,
            reviewer_registration_count: registrations,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn weighted_rating_bounds_hold(raw in prop::collection::vec(arb_review(), 0..60)) {
        let store = InMemoryVendorStore::new();
        let aggregator = RatingAggregator::new(&store);
        let snapshot = snapshot_from("v", build_reviews(raw));

        let result = aggregator.weighted_rating(&snapshot).expect("rating");
        if snapshot.reviews.is_empty() {
            prop_assert_eq!(result.weighted_rating, 0.0);
            prop_assert_eq!(result.confidence, 0.0);
        } else {
            prop_assert!((1.0..=5.0).contains(&result.weighted_rating),
                "weighted {} out of range", result.weighted_rating);
        }
    }

    #[test]
    fn confidence_bounds_and_small_sample_override(raw in prop::collection::vec(arb_review(), 0..60)) {
        let store = InMemoryVendorStore::new();
        let aggregator = RatingAggregator::new(&store);
        let snapshot = snapshot_from("v", build_reviews(raw));

        let result = aggregator.weighted_rating(&snapshot).expect("rating");
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        match snapshot.reviews.len() {
            0 => prop_assert_eq!(result.confidence, 0.0),
            1 | 2 => prop_assert_eq!(result.confidence, 0.3),
            _ => {}
        }
    }

    #[test]
    fn ranking_is_always_a_dense_permutation(
        vendor_reviews in prop::collection::vec(prop::collection::vec(arb_review(), 1..20), 1..12),
    ) {
        let store = InMemoryVendorStore::new();
        for (i, raw) in vendor_reviews.iter().enumerate() {
            store.insert(snapshot_from(&format!("v{i}"), build_reviews(raw.clone())));
        }
        let population = vendor_reviews.len();

        let engine = RankingEngine::new(&store);
        let now = Utc::now();
        let entries = engine
            .rank_vendors_at(&RankingQuery::top(population), now)
            .expect("ranking");

        prop_assert_eq!(entries.len(), population);
        let mut ranks: Vec<usize> = entries.iter().map(|e| e.rank).collect();
        ranks.sort_unstable();
        prop_assert_eq!(ranks, (1..=population).collect::<Vec<_>>());

        // Determinism: same snapshots, same now, same order
        let rerun = engine
            .rank_vendors_at(&RankingQuery::top(population), now)
            .expect("ranking");
        prop_assert_eq!(entries, rerun);
    }

    #[test]
    fn ranking_scores_stay_on_the_composite_scale(
        vendor_reviews in prop::collection::vec(prop::collection::vec(arb_review(), 1..30), 1..8),
    ) {
        let store = InMemoryVendorStore::new();
        for (i, raw) in vendor_reviews.iter().enumerate() {
            store.insert(snapshot_from(&format!("v{i}"), build_reviews(raw.clone())));
        }

        let engine = RankingEngine::new(&store);
        let entries = engine
            .rank_vendors(&RankingQuery::top(100))
            .expect("ranking");
        for entry in &entries {
            prop_assert!((0.0..=100.0).contains(&entry.overall_score),
                "score {} out of range", entry.overall_score);
        }
    }
}
