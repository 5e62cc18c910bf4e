// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod text;

pub use distance::{percent_distance, route_distance};
pub use filters::{compare_matches, passes_thresholds, sort_matches};
pub use matcher::{Matcher, MatchOutcome};
pub use scoring::{route_similarity, score_route};
pub use text::{composite, levenshtein};
