use std::cmp::Ordering;

use crate::models::{MatchResult, MatchThresholds};

/// Check a scored candidate against the ranking thresholds
///
/// Keeps the candidate iff `similarity >= min_similarity` and
/// `distance <= max_distance`.
#[inline]
pub fn passes_thresholds(
    similarity: f64,
    distance: f64,
    max_distance: f64,
    thresholds: &MatchThresholds,
) -> bool {
    similarity >= thresholds.min_similarity && distance <= max_distance
}

/// Near-tie ordering of two matches
///
/// Higher similarity first. When the similarities differ by less than
/// `epsilon` the pair is treated as tied and the lower distance goes first.
///
/// Not transitive over chains of near-ties, so it must only be fed to
/// [`sort_matches`], never to `slice::sort_by`.
pub fn compare_matches(a: &MatchResult, b: &MatchResult, epsilon: f64) -> Ordering {
    if (a.similarity - b.similarity).abs() < epsilon {
        return a
            .distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal);
    }

    b.similarity
        .partial_cmp(&a.similarity)
        .unwrap_or(Ordering::Equal)
}

/// Sort matches in place with the near-tie ordering
///
/// Two passes:
/// 1. Total order on `(similarity desc, distance asc)`
/// 2. Stable insertion pass with [`compare_matches`], letting near-tied
///    neighbours settle by distance
///
/// After the first pass every element to the left has an equal or higher
/// similarity, so the second pass only moves an element past matches less
/// than `epsilon` above it. A match is therefore never ranked below one whose
/// similarity is at least `epsilon` lower.
pub fn sort_matches(matches: &mut [MatchResult], epsilon: f64) {
    matches.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.distance.total_cmp(&b.distance))
    });

    for i in 1..matches.len() {
        let mut j = i;
        while j > 0 && compare_matches(&matches[j], &matches[j - 1], epsilon) == Ordering::Less {
            matches.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(trip_id: i64, similarity: f64, distance: f64) -> MatchResult {
        MatchResult {
            trip_id,
            passenger_id: 1,
            similarity,
            distance,
        }
    }

    #[test]
    fn test_thresholds() {
        let thresholds = MatchThresholds::default();

        assert!(passes_thresholds(0.3, 50.0, 50.0, &thresholds));
        assert!(!passes_thresholds(0.29, 10.0, 50.0, &thresholds));
        assert!(!passes_thresholds(0.9, 50.1, 50.0, &thresholds));
    }

    #[test]
    fn test_compare_by_similarity() {
        let a = scored(1, 0.9, 40.0);
        let b = scored(2, 0.5, 10.0);

        assert_eq!(compare_matches(&a, &b, 0.01), Ordering::Less);
        assert_eq!(compare_matches(&b, &a, 0.01), Ordering::Greater);
    }

    #[test]
    fn test_near_tie_falls_back_to_distance() {
        let higher = scored(1, 0.505, 10.0);
        let closer = scored(2, 0.50, 5.0);

        assert_eq!(compare_matches(&closer, &higher, 0.01), Ordering::Less);

        let mut matches = vec![higher, closer];
        sort_matches(&mut matches, 0.01);
        assert_eq!(matches[0].trip_id, 2);
        assert_eq!(matches[1].trip_id, 1);
    }

    #[test]
    fn test_sort_is_stable_on_full_ties() {
        let mut matches = vec![scored(1, 0.7, 5.0), scored(2, 0.7, 5.0), scored(3, 0.7, 5.0)];
        sort_matches(&mut matches, 0.01);

        let ids: Vec<i64> = matches.iter().map(|m| m.trip_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_orders_descending_similarity() {
        let mut matches = vec![
            scored(1, 0.4, 0.0),
            scored(2, 0.95, 30.0),
            scored(3, 0.6, 10.0),
            scored(4, 0.8, 0.0),
        ];
        sort_matches(&mut matches, 0.01);

        let ids: Vec<i64> = matches.iter().map(|m| m.trip_id).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_sort_near_tie_chain_keeps_primary_order() {
        // 0.500 ~ 0.508 ~ 0.516, but 0.500 and 0.516 are not tied
        let mut matches = vec![
            scored(1, 0.500, 1.0),
            scored(2, 0.508, 2.0),
            scored(3, 0.516, 3.0),
        ];
        sort_matches(&mut matches, 0.01);

        let ids: Vec<i64> = matches.iter().map(|m| m.trip_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert!(matches[0].similarity >= matches[2].similarity);
    }

    #[test]
    fn test_sort_ascending_chain_puts_best_first() {
        // 0.400, 0.405, ... 0.495: every neighbour is near-tied
        let mut matches: Vec<MatchResult> = (0..20)
            .map(|i| scored(i, 0.40 + i as f64 * 0.005, 10.0))
            .collect();
        sort_matches(&mut matches, 0.01);

        assert_eq!(matches[0].trip_id, 19);
        assert_eq!(matches[19].trip_id, 0);
        assert!(matches[0].similarity >= matches[19].similarity);
    }

    #[test]
    fn test_sort_never_inverts_a_clear_gap() {
        let mut matches: Vec<MatchResult> = (0..30)
            .map(|i| scored(i, 0.30 + (i % 10) as f64 * 0.007, (30 - i) as f64))
            .collect();
        sort_matches(&mut matches, 0.01);

        for (i, a) in matches.iter().enumerate() {
            for b in &matches[i + 1..] {
                assert!(
                    b.similarity < a.similarity + 0.01,
                    "{:?} ranked below {:?}",
                    b,
                    a
                );
            }
        }
    }
}
