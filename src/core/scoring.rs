use crate::core::{distance::route_distance, text::composite};
use crate::models::{RouteQuery, RouteWeights};

/// Weighted similarity of two routes (0-1)
///
/// Scoring formula:
/// similarity = (
///     composite(from) * 0.45 +     # origin
///     composite(to)   * 0.55       # destination, riders care more where they end up
/// )
pub fn route_similarity(query: &RouteQuery, candidate: &RouteQuery, weights: &RouteWeights) -> f64 {
    let from_similarity = composite(&query.from, &candidate.from);
    let to_similarity = composite(&query.to, &candidate.to);

    let total = from_similarity * weights.from_similarity + to_similarity * weights.to_similarity;

    total.clamp(0.0, 1.0)
}

/// Score a candidate route against a query
///
/// # Returns
/// `(similarity, distance)`, each from its own heuristic
#[inline]
pub fn score_route(query: &RouteQuery, candidate: &RouteQuery, weights: &RouteWeights) -> (f64, f64) {
    (
        route_similarity(query, candidate, weights),
        route_distance(query, candidate, weights),
    )
}
