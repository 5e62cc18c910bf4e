//! Rideshare Match - trip matching and ranking for the rideshare backend
//!
//! Scores every joinable trip against a passenger's desired route by free-text
//! similarity and percent edit distance, filters by thresholds and returns an
//! ordered top-N list. The engine in [`core`] is pure; [`services`] and
//! [`routes`] wrap it as a small HTTP service.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{Matcher, MatchOutcome, text::{composite, levenshtein}};
pub use models::{RouteQuery, TripCandidate, MatchResult, RouteWeights, MatchThresholds, FindTripMatchesRequest, FindTripMatchesResponse};
