use std::fmt::Display;

use crate::models::{MatchResult, MatchThresholds, RouteQuery, RouteWeights, TripCandidate};
use crate::core::{
    filters::{passes_thresholds, sort_matches},
    scoring::score_route,
};

/// Result of the matching process
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
    pub skipped_records: usize,
}

/// Main matching orchestrator - ranks candidate trips against a route
///
/// # Pipeline Stages
/// 1. Route scoring (similarity and percent distance, per candidate)
/// 2. Threshold filtering
/// 3. Near-tie ordering
/// 4. Optional prefix truncation
///
/// Stateless: every call is an independent computation over its inputs.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: RouteWeights,
    thresholds: MatchThresholds,
}

impl Matcher {
    pub fn new(weights: RouteWeights, thresholds: MatchThresholds) -> Self {
        Self { weights, thresholds }
    }

    pub fn with_defaults() -> Self {
        Self {
            weights: RouteWeights::default(),
            thresholds: MatchThresholds::default(),
        }
    }

    /// Find every candidate trip matching a passenger's route
    ///
    /// # Arguments
    /// * `passenger_id` - The requesting passenger, copied into each result
    /// * `query` - The desired route
    /// * `candidates` - Eligible trips, already filtered upstream
    /// * `max_distance` - Upper bound on the route percent distance (0-100)
    ///
    /// # Returns
    /// MatchOutcome with all qualifying matches, ordered
    pub fn find_matches(
        &self,
        passenger_id: i64,
        query: &RouteQuery,
        candidates: &[TripCandidate],
        max_distance: f64,
    ) -> MatchOutcome {
        let mut matches: Vec<MatchResult> = candidates
            .iter()
            .filter_map(|candidate| self.score_candidate(passenger_id, query, candidate, max_distance))
            .collect();

        sort_matches(&mut matches, self.thresholds.tie_epsilon);

        MatchOutcome {
            matches,
            total_candidates: candidates.len(),
            skipped_records: 0,
        }
    }

    /// Like [`Matcher::find_matches`], over records that may have failed to decode
    ///
    /// A record that failed to decode is logged and skipped; the scan carries
    /// on with the rest.
    pub fn find_matches_from_records<I, E>(
        &self,
        passenger_id: i64,
        query: &RouteQuery,
        records: I,
        max_distance: f64,
    ) -> MatchOutcome
    where
        I: IntoIterator<Item = Result<TripCandidate, E>>,
        E: Display,
    {
        let mut skipped_records = 0;
        let candidates: Vec<TripCandidate> = records
            .into_iter()
            .filter_map(|record| match record {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    tracing::warn!("Skipping malformed trip record: {}", e);
                    skipped_records += 1;
                    None
                }
            })
            .collect();

        let mut outcome = self.find_matches(passenger_id, query, &candidates, max_distance);
        outcome.total_candidates += skipped_records;
        outcome.skipped_records = skipped_records;
        outcome
    }

    /// Best `limit` matches for a passenger's route
    ///
    /// Runs [`Matcher::find_matches`] and keeps the prefix of the ordered
    /// result; nothing is re-sorted.
    pub fn top_n(
        &self,
        passenger_id: i64,
        query: &RouteQuery,
        candidates: &[TripCandidate],
        max_distance: f64,
        limit: usize,
    ) -> MatchOutcome {
        let mut outcome = self.find_matches(passenger_id, query, candidates, max_distance);
        outcome.matches.truncate(limit);
        outcome
    }

    /// [`Matcher::top_n`] over records that may have failed to decode
    pub fn top_n_from_records<I, E>(
        &self,
        passenger_id: i64,
        query: &RouteQuery,
        records: I,
        max_distance: f64,
        limit: usize,
    ) -> MatchOutcome
    where
        I: IntoIterator<Item = Result<TripCandidate, E>>,
        E: Display,
    {
        let mut outcome = self.find_matches_from_records(passenger_id, query, records, max_distance);
        outcome.matches.truncate(limit);
        outcome
    }

    fn score_candidate(
        &self,
        passenger_id: i64,
        query: &RouteQuery,
        candidate: &TripCandidate,
        max_distance: f64,
    ) -> Option<MatchResult> {
        let (similarity, distance) = score_route(query, &candidate.route(), &self.weights);

        if !passes_thresholds(similarity, distance, max_distance, &self.thresholds) {
            return None;
        }

        Some(MatchResult {
            trip_id: candidate.trip_id,
            passenger_id,
            similarity,
            distance,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
