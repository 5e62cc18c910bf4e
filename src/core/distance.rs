use crate::core::text::{levenshtein, normalize};
use crate::models::{RouteQuery, RouteWeights};

/// Upper bound of a percent distance
pub const MAX_PERCENT_DISTANCE: f64 = 100.0;

/// Percent edit distance between two location strings (0-100)
///
/// Normalised the same way as the similarity scorer. This is a textual
/// dissimilarity, not a physical distance.
///
/// # Returns
/// `0` for equal strings (two empty strings included), otherwise
/// `levenshtein / max_len * 100`
#[inline]
pub fn percent_distance(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 0.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }

    levenshtein(&a, &b) as f64 / max_len as f64 * MAX_PERCENT_DISTANCE
}

/// Weighted percent distance of two routes (0-100)
///
/// Computed independently of the route similarity; the destination carries
/// the larger weight. Clamped to `0..=100` whatever the weights.
pub fn route_distance(query: &RouteQuery, candidate: &RouteQuery, weights: &RouteWeights) -> f64 {
    let from_distance = percent_distance(&query.from, &candidate.from);
    let to_distance = percent_distance(&query.to, &candidate.to);

    (from_distance * weights.from_distance + to_distance * weights.to_distance)
        .clamp(0.0, MAX_PERCENT_DISTANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_distance_equal() {
        assert_eq!(percent_distance("Boston", "boston"), 0.0);
        assert_eq!(percent_distance("", ""), 0.0);
        assert_eq!(percent_distance("  ", ""), 0.0);
    }

    #[test]
    fn test_percent_distance_against_empty() {
        assert_eq!(percent_distance("boston", ""), 100.0);
    }

    #[test]
    fn test_percent_distance_typo() {
        // one edit over six chars
        let d = percent_distance("Boston", "Bostn");
        assert!((d - 100.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_route_distance_identical_route() {
        let query = RouteQuery::new("Boston", "New York");
        let candidate = RouteQuery::new(" boston", "NEW YORK ");

        assert_eq!(route_distance(&query, &candidate, &RouteWeights::default()), 0.0);
    }

    #[test]
    fn test_route_distance_weights_destination() {
        let weights = RouteWeights::default();
        let query = RouteQuery::new("abc", "abc");

        // only the origin differs completely
        let origin_off = route_distance(&query, &RouteQuery::new("xyz", "abc"), &weights);
        // only the destination differs completely
        let dest_off = route_distance(&query, &RouteQuery::new("abc", "xyz"), &weights);

        assert!((origin_off - 40.0).abs() < 1e-9);
        assert!((dest_off - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_route_distance_stays_in_range_with_oversized_weights() {
        let weights = RouteWeights {
            from_distance: 0.9,
            to_distance: 0.9,
            ..RouteWeights::default()
        };
        let query = RouteQuery::new("abc", "abc");

        let d = route_distance(&query, &RouteQuery::new("xyz", "xyz"), &weights);
        assert_eq!(d, MAX_PERCENT_DISTANCE);
    }
}
