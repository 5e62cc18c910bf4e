// Unit tests for Rideshare Match

use rideshare_match::core::{
    distance::{percent_distance, route_distance},
    filters::{passes_thresholds, sort_matches},
    scoring::route_similarity,
    text::{composite, edit_similarity, levenshtein, prefix_overlap_score, substring_score, word_overlap_score},
};
use rideshare_match::models::{MatchResult, MatchThresholds, RouteQuery, RouteWeights};

const LOCATIONS: &[&str] = &[
    "Boston",
    "boston ",
    "New York",
    "new york city",
    "Newark",
    "Providence",
    "Hartford",
    "NYC",
    "South Station, Boston",
    "Zürich HB",
];

#[test]
fn test_composite_identity_for_non_empty() {
    for s in LOCATIONS {
        assert_eq!(composite(s, s), 1.0, "composite({:?}, {:?})", s, s);
    }
}

#[test]
fn test_composite_against_empty_is_zero() {
    for s in LOCATIONS {
        assert_eq!(composite(s, ""), 0.0);
        assert_eq!(composite("", s), 0.0);
    }
}

#[test]
fn test_composite_is_bounded() {
    for a in LOCATIONS {
        for b in LOCATIONS {
            let score = composite(a, b);
            assert!(score.is_finite());
            assert!((0.0..=1.0).contains(&score), "{:?} vs {:?} gave {}", a, b, score);
        }
    }
}

#[test]
fn test_levenshtein_kitten_sitting() {
    assert_eq!(levenshtein("kitten", "sitting"), 3);
}

#[test]
fn test_edit_similarity_symmetric() {
    for a in LOCATIONS {
        for b in LOCATIONS {
            assert_eq!(edit_similarity(a, b), edit_similarity(b, a));
        }
    }
}

#[test]
fn test_heuristics_on_partial_names() {
    // "boston" sits inside "south station, boston"
    let contained = substring_score("boston", "south station, boston");
    assert!((contained - 6.0 / 21.0 * 0.9).abs() < 1e-12);

    // one of three words matches
    let overlap = word_overlap_score("boston", "south station, boston");
    assert!((overlap - 2.0 / 4.0).abs() < 1e-12);

    assert_eq!(prefix_overlap_score("nyc", "new york"), 1.0 / 8.0);
}

#[test]
fn test_percent_distance_bounds() {
    for a in LOCATIONS {
        for b in LOCATIONS {
            let d = percent_distance(a, b);
            assert!(d.is_finite());
            assert!((0.0..=100.0).contains(&d), "{:?} vs {:?} gave {}", a, b, d);
        }
    }
}

#[test]
fn test_route_distance_zero_for_equal_routes() {
    let weights = RouteWeights::default();
    let query = RouteQuery::new("Boston", "New York");
    let same = RouteQuery::new("  BOSTON", "new york  ");

    assert_eq!(route_distance(&query, &same, &weights), 0.0);
    assert_eq!(route_similarity(&query, &same, &weights), 1.0);
}

#[test]
fn test_route_scores_bounded() {
    let weights = RouteWeights::default();
    for a in LOCATIONS {
        for b in LOCATIONS {
            let query = RouteQuery::new(*a, *b);
            let candidate = RouteQuery::new(*b, *a);

            let similarity = route_similarity(&query, &candidate, &weights);
            let distance = route_distance(&query, &candidate, &weights);

            assert!((0.0..=1.0).contains(&similarity));
            assert!((0.0..=100.0 + 1e-9).contains(&distance));
        }
    }
}

#[test]
fn test_threshold_boundaries_are_inclusive() {
    let thresholds = MatchThresholds::default();
    assert!(passes_thresholds(0.3, 40.0, 40.0, &thresholds));
}

#[test]
fn test_near_tie_prefers_lower_distance() {
    let mut matches = vec![
        MatchResult { trip_id: 1, passenger_id: 5, similarity: 0.505, distance: 10.0 },
        MatchResult { trip_id: 2, passenger_id: 5, similarity: 0.50, distance: 5.0 },
    ];

    sort_matches(&mut matches, 0.01);

    assert_eq!(matches[0].trip_id, 2);
    assert_eq!(matches[1].trip_id, 1);
}

#[test]
fn test_clear_similarity_gap_ignores_distance() {
    let mut matches = vec![
        MatchResult { trip_id: 1, passenger_id: 5, similarity: 0.60, distance: 50.0 },
        MatchResult { trip_id: 2, passenger_id: 5, similarity: 0.80, distance: 70.0 },
    ];

    sort_matches(&mut matches, 0.01);

    assert_eq!(matches[0].trip_id, 2);
}
