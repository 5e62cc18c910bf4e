// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{RouteQuery, TripCandidate, MatchResult, RouteWeights, MatchThresholds};
pub use requests::FindTripMatchesRequest;
pub use responses::{FindTripMatchesResponse, HealthResponse, ErrorResponse};
