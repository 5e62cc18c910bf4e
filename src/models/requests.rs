use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::RouteQuery;

/// Request to rank trips for a desired route
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindTripMatchesRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "passenger_id", rename = "passengerId")]
    pub passenger_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub from: String,
    #[validate(length(min = 1, max = 255))]
    pub to: String,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default, alias = "max_distance", rename = "maxDistance")]
    pub max_distance: Option<f64>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<usize>,
}

impl FindTripMatchesRequest {
    pub fn route(&self) -> RouteQuery {
        RouteQuery::new(self.from.as_str(), self.to.as_str())
    }
}
