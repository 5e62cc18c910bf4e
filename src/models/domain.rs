use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A desired origin/destination pair, as typed by the rider
///
/// Values are kept raw; normalisation happens inside the scorers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub from: String,
    pub to: String,
}

impl RouteQuery {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Snapshot of a joinable trip supplied by the candidate source
///
/// Eligibility (active, not full, departing in the future, not driven by the
/// requester) is decided upstream and never re-checked here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TripCandidate {
    #[serde(rename = "tripId")]
    #[sqlx(rename = "id")]
    pub trip_id: i64,
    #[serde(rename = "from")]
    pub from_location: String,
    #[serde(rename = "to")]
    pub to_location: String,
    #[serde(rename = "departureTime")]
    pub departure_time: DateTime<Utc>,
    #[serde(rename = "maxPassengers")]
    pub max_passengers: i32,
    #[serde(rename = "currentPassengers")]
    pub current_passengers: i32,
}

impl TripCandidate {
    /// The trip's route, in the same shape as a rider query
    pub fn route(&self) -> RouteQuery {
        RouteQuery::new(self.from_location.as_str(), self.to_location.as_str())
    }
}

/// One ranked trip for a passenger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "tripId")]
    pub trip_id: i64,
    #[serde(rename = "passengerId")]
    pub passenger_id: i64,
    pub similarity: f64,
    pub distance: f64,
}

/// Route-level weights for combining per-field scores
#[derive(Debug, Clone, Copy)]
pub struct RouteWeights {
    pub from_similarity: f64,
    pub to_similarity: f64,
    pub from_distance: f64,
    pub to_distance: f64,
}

impl Default for RouteWeights {
    fn default() -> Self {
        Self {
            from_similarity: 0.45,
            to_similarity: 0.55,
            from_distance: 0.4,
            to_distance: 0.6,
        }
    }
}

/// Ranking thresholds
#[derive(Debug, Clone, Copy)]
pub struct MatchThresholds {
    /// Candidates scoring below this similarity are dropped
    pub min_similarity: f64,
    /// Similarities closer than this are near-tied and ordered by distance
    pub tie_epsilon: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            min_similarity: 0.3,
            tie_epsilon: 0.01,
        }
    }
}
