//! Composite vendor ranking for discovery.
//!
//! The [`RankingEngine`] scores each verified vendor on a 0–100 scale from
//! six independently capped terms, then sorts and assigns dense ranks.
//! Ranking always recomputes each candidate's weighted rating — it is never
//! run off stale cached ratings.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RatingWeights;
use crate::error::Result;
use crate::model::{VendorId, VendorSnapshot};
use crate::rating::{CategoryBenchmarks, RatingAggregator};
use crate::store::VendorStore;
use crate::utils::stats::round_dp;

/// Filters and limit for a ranking run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingQuery {
    /// Restrict candidates to vendors offering this category
    pub category: Option<String>,
    /// Restrict candidates to vendors in this location (case-insensitive)
    pub location: Option<String>,
    /// Maximum number of entries returned
    pub limit: usize,
}

impl RankingQuery {
    /// Query with no filters.
    #[must_use]
    pub const fn top(limit: usize) -> Self {
        Self {
            category: None,
            location: None,
            limit,
        }
    }
}

impl Default for RankingQuery {
    fn default() -> Self {
        Self::top(20)
    }
}

/// Per-term breakdown behind an overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorRankingFactors {
    /// Recomputed weighted rating used for the rating term
    pub weighted_rating: f64,
    /// Review count feeding the volume term
    pub review_count: usize,
    /// 1-based position among category peers (peer count + 1 if absent)
    pub category_rank: usize,
    /// `(rating / 5) * 40`
    pub rating_score: f64,
    /// `min(20, ln(review_count + 1) * 5)`
    pub volume_score: f64,
    /// `10` iff verified
    pub verification_score: f64,
    /// `(completion_rate / 100) * 15`
    pub completion_score: f64,
    /// `max(0, 10 - (response_hours / 24) * 10)` — faster is better
    pub response_time_score: f64,
    /// `max(0, 5 - category_rank / 10)`
    pub category_rank_score: f64,
}

impl VendorRankingFactors {
    fn overall(&self) -> f64 {
        self.rating_score
            + self.volume_score
            + self.verification_score
            + self.completion_score
            + self.response_time_score
            + self.category_rank_score
    }
}

/// One row of a ranking result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// Vendor identifier
    pub vendor_id: VendorId,
    /// Composite score, 0–100, rounded to one decimal
    pub overall_score: f64,
    /// Dense rank, 1-based, assigned after the full sort
    pub rank: usize,
    /// Term breakdown
    pub factors: VendorRankingFactors,
}

/// Ranking engine over a vendor store.
pub struct RankingEngine<'a> {
    store: &'a dyn VendorStore,
    aggregator: RatingAggregator<'a>,
}

impl<'a> RankingEngine<'a> {
    /// Create a ranking engine with default rating weights.
    pub fn new(store: &'a dyn VendorStore) -> Self {
        Self {
            store,
            aggregator: RatingAggregator::new(store),
        }
    }

    /// Use custom rating weights for the per-vendor recomputation.
    #[must_use]
    pub fn with_weights(mut self, weights: RatingWeights) -> Self {
        self.aggregator = RatingAggregator::new(self.store).with_weights(weights);
        self
    }

    /// Rank vendors as of now.
    pub fn rank_vendors(&self, query: &RankingQuery) -> Result<Vec<RankingEntry>> {
        self.rank_vendors_at(query, Utc::now())
    }

    /// Rank vendors as of an explicit `now`.
    ///
    /// Candidates are the verified vendors with at least one review that
    /// match the query filters. Errors loading any candidate propagate
    /// immediately — there is no partial ranking.
    pub fn rank_vendors_at(
        &self,
        query: &RankingQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<RankingEntry>> {
        let candidates = self.load_candidates(query)?;
        tracing::debug!(candidates = candidates.len(), "ranking vendors");

        // Benchmarks and peer orderings are shared across all candidates of
        // a category within this call.
        let mut benchmarks: HashMap<String, CategoryBenchmarks> = HashMap::new();
        let mut orderings: HashMap<String, Vec<VendorId>> = HashMap::new();

        let mut entries = Vec::with_capacity(candidates.len());
        for snapshot in &candidates {
            let factors = self.score_vendor(snapshot, now, &mut benchmarks, &mut orderings)?;
            entries.push(RankingEntry {
                vendor_id: snapshot.vendor_id.clone(),
                overall_score: round_dp(factors.overall(), 1),
                rank: 0, // assigned after the sort
                factors,
            });
        }

        // Stable sort: ties keep first-seen input order
        entries.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = index + 1;
        }
        entries.truncate(query.limit);
        Ok(entries)
    }

    fn load_candidates(&self, query: &RankingQuery) -> Result<Vec<VendorSnapshot>> {
        let ids = self.store.load_all_ratable_vendors()?;
        let mut candidates = Vec::with_capacity(ids.len());
        for id in &ids {
            let snapshot = self.store.load_vendor_snapshot(id)?;
            if !snapshot.is_verified() {
                continue;
            }
            if let Some(category) = &query.category {
                if !snapshot.service_categories.iter().any(|c| c == category) {
                    continue;
                }
            }
            if let Some(location) = &query.location {
                let matches = snapshot
                    .location
                    .as_deref()
                    .is_some_and(|l| l.eq_ignore_ascii_case(location));
                if !matches {
                    continue;
                }
            }
            candidates.push(snapshot);
        }
        Ok(candidates)
    }

    fn score_vendor(
        &self,
        snapshot: &VendorSnapshot,
        now: DateTime<Utc>,
        benchmarks: &mut HashMap<String, CategoryBenchmarks>,
        orderings: &mut HashMap<String, Vec<VendorId>>,
    ) -> Result<VendorRankingFactors> {
        let primary = snapshot.primary_category().map(str::to_string);

        let benchmark = match &primary {
            Some(category) => match benchmarks.get(category) {
                Some(benchmark) => *benchmark,
                None => {
                    let benchmark = CategoryBenchmarks::for_category(self.store, category)?;
                    benchmarks.insert(category.clone(), benchmark);
                    benchmark
                }
            },
            None => CategoryBenchmarks::defaults(),
        };

        let rating = self
            .aggregator
            .weighted_rating_with_benchmark(snapshot, &benchmark, now)?;

        let category_rank = match &primary {
            Some(category) => {
                if !orderings.contains_key(category) {
                    orderings.insert(category.clone(), self.peer_ordering(category)?);
                }
                let ordering = &orderings[category];
                ordering
                    .iter()
                    .position(|id| id == &snapshot.vendor_id)
                    .map_or(ordering.len() + 1, |pos| pos + 1)
            }
            // No category means no peer ordering to be absent from
            None => 1,
        };

        let review_count = snapshot.review_count();
        Ok(VendorRankingFactors {
            weighted_rating: rating.weighted_rating,
            review_count,
            category_rank,
            rating_score: (rating.weighted_rating / 5.0) * 40.0,
            volume_score: ((review_count as f64 + 1.0).ln() * 5.0).min(20.0),
            verification_score: if snapshot.is_verified() { 10.0 } else { 0.0 },
            completion_score: (snapshot.completion_rate / 100.0) * 15.0,
            response_time_score: (10.0 - (snapshot.response_time_hours / 24.0) * 10.0).max(0.0),
            category_rank_score: (5.0 - category_rank as f64 / 10.0).max(0.0),
        })
    }

    /// Category peers ordered by `(rating desc, review_count desc)`.
    fn peer_ordering(&self, category: &str) -> Result<Vec<VendorId>> {
        let mut peers = self.store.load_category_peers(category)?;
        peers.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then_with(|| b.review_count().cmp(&a.review_count()))
        });
        Ok(peers.into_iter().map(|p| p.vendor_id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Review, VerificationStatus};
    use crate::store::InMemoryVendorStore;
    use chrono::Utc;

    fn vendor(id: &str, rating: f64, reviews: usize, verified: bool) -> VendorSnapshot {
        VendorSnapshot {
            vendor_id: VendorId::from(id),
            reviews: (0..reviews)
                .map(|_| Review::new(rating.round() as u8, Utc::now()))
                .collect(),
            service_categories: vec!["catering".to_string()],
            rating,
            completion_rate: 90.0,
            response_time_hours: 12.0,
            verification_status: if verified {
                VerificationStatus::Verified
            } else {
                VerificationStatus::Pending
            },
            location: Some("berlin".to_string()),
            bookings: Vec::new(),
        }
    }

    #[test]
    fn test_ranks_are_dense_and_one_based() {
        let store = InMemoryVendorStore::new();
        store.insert(vendor("a", 5.0, 30, true));
        store.insert(vendor("b", 3.0, 10, true));
        store.insert(vendor("c", 4.0, 20, true));

        let engine = RankingEngine::new(&store);
        let entries = engine
            .rank_vendors(&RankingQuery::top(10))
            .expect("ranking");

        assert_eq!(entries.len(), 3);
        let ranks: Vec<usize> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        // Scores are descending
        for pair in entries.windows(2) {
            assert!(pair[0].overall_score >= pair[1].overall_score);
        }
    }

    #[test]
    fn test_unverified_vendors_excluded() {
        let store = InMemoryVendorStore::new();
        store.insert(vendor("a", 5.0, 30, true));
        store.insert(vendor("b", 5.0, 30, false));

        let engine = RankingEngine::new(&store);
        let entries = engine
            .rank_vendors(&RankingQuery::top(10))
            .expect("ranking");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].vendor_id.as_str(), "a");
    }

    #[test]
    fn test_category_filter() {
        let store = InMemoryVendorStore::new();
        store.insert(vendor("a", 5.0, 30, true));
        let mut other = vendor("b", 5.0, 30, true);
        other.service_categories = vec!["photography".to_string()];
        store.insert(other);

        let engine = RankingEngine::new(&store);
        let query = RankingQuery {
            category: Some("photography".to_string()),
            location: None,
            limit: 10,
        };
        let entries = engine.rank_vendors(&query).expect("ranking");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].vendor_id.as_str(), "b");
    }

    #[test]
    fn test_location_filter_is_case_insensitive() {
        let store = InMemoryVendorStore::new();
        store.insert(vendor("a", 5.0, 30, true));

        let engine = RankingEngine::new(&store);
        let query = RankingQuery {
            category: None,
            location: Some("Berlin".to_string()),
            limit: 10,
        };
        assert_eq!(engine.rank_vendors(&query).expect("ranking").len(), 1);

        let query = RankingQuery {
            category: None,
            location: Some("munich".to_string()),
            limit: 10,
        };
        assert!(engine.rank_vendors(&query).expect("ranking").is_empty());
    }

    #[test]
    fn test_limit_truncates_after_ranking() {
        let store = InMemoryVendorStore::new();
        for i in 0..5_usize {
            store.insert(vendor(&format!("v{i}"), 4.0, 10 + i, true));
        }
        let engine = RankingEngine::new(&store);
        let entries = engine.rank_vendors(&RankingQuery::top(2)).expect("ranking");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].rank, 2);
    }

    #[test]
    fn test_response_time_term_floors_at_zero() {
        let store = InMemoryVendorStore::new();
        let mut slow = vendor("slow", 4.0, 10, true);
        slow.response_time_hours = 72.0;
        store.insert(slow);

        let engine = RankingEngine::new(&store);
        let entries = engine
            .rank_vendors(&RankingQuery::top(1))
            .expect("ranking");
        assert_eq!(entries[0].factors.response_time_score, 0.0);
    }

    #[test]
    fn test_category_rank_feeds_score_term() {
        let store = InMemoryVendorStore::new();
        store.insert(vendor("top", 5.0, 40, true));
        store.insert(vendor("second", 4.0, 10, true));

        let engine = RankingEngine::new(&store);
        let entries = engine
            .rank_vendors(&RankingQuery::top(10))
            .expect("ranking");

        let top = entries
            .iter()
            .find(|e| e.vendor_id.as_str() == "top")
            .expect("top entry");
        let second = entries
            .iter()
            .find(|e| e.vendor_id.as_str() == "second")
            .expect("second entry");
        assert_eq!(top.factors.category_rank, 1);
        assert_eq!(second.factors.category_rank, 2);
        assert!((top.factors.category_rank_score - 4.9).abs() < 1e-9);
        assert!((second.factors.category_rank_score - 4.8).abs() < 1e-9);
    }

    #[test]
    fn test_reranking_unchanged_input_is_deterministic() {
        let store = InMemoryVendorStore::new();
        for i in 0..6 {
            store.insert(vendor(&format!("v{i}"), 4.0, 12, true));
        }
        let engine = RankingEngine::new(&store);
        let now = Utc::now();
        let first = engine
            .rank_vendors_at(&RankingQuery::top(10), now)
            .expect("ranking");
        let second = engine
            .rank_vendors_at(&RankingQuery::top(10), now)
            .expect("ranking");
        assert_eq!(first, second);
    }
}
