use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::{ErrorResponse, FindTripMatchesRequest, FindTripMatchesResponse, HealthResponse};
use crate::services::PostgresClient;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on the database check behind `/health`
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/trips/matches", web::post().to(find_trip_matches));
}

/// Health check endpoint
///
/// Reports `degraded` when the database errors or does not answer within
/// [`HEALTH_CHECK_TIMEOUT`].
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = match tokio::time::timeout(HEALTH_CHECK_TIMEOUT, state.postgres.health_check()).await {
        Ok(result) => result.unwrap_or(false),
        Err(_) => {
            tracing::warn!("Database health check timed out after {:?}", HEALTH_CHECK_TIMEOUT);
            false
        }
    };

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find trip matches endpoint
///
/// POST /api/v1/trips/matches
///
/// Request body:
/// ```json
/// {
///   "passengerId": 7,
///   "from": "Boston",
///   "to": "New York",
///   "maxDistance": 60.0,
///   "limit": 10
/// }
/// ```
///
/// `maxDistance` defaults to `matching.default_max_distance`. `limit` is
/// optional: when absent the full sorted list is returned, capped at
/// `matching.max_limit` (100 by default). A supplied `limit` is capped the
/// same way.
async fn find_trip_matches(
    state: web::Data<AppState>,
    req: web::Json<FindTripMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_trip_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let passenger_id = req.passenger_id;
    let query = req.route();
    let max_distance = req.max_distance.unwrap_or(state.matching.default_max_distance);
    let limit = state.matching.effective_limit(req.limit);

    tracing::info!(
        "Finding trip matches for passenger {}: {:?} -> {:?} (max distance {}, limit {})",
        passenger_id,
        query.from,
        query.to,
        max_distance,
        limit
    );

    let records = match state.postgres.fetch_candidates(passenger_id).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Failed to fetch candidate trips for {}: {}", passenger_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch candidate trips".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Scoring is CPU-bound; keep it off the async worker
    let matcher = state.matcher.clone();
    let ranked = web::block(move || {
        matcher.top_n_from_records(passenger_id, &query, records, max_distance, limit)
    })
    .await;

    let outcome = match ranked {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Ranking failed for passenger {}: {}", passenger_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to rank trips".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::info!(
        "Returning {} matches for passenger {} (from {} candidates, {} skipped)",
        outcome.matches.len(),
        passenger_id,
        outcome.total_candidates,
        outcome.skipped_records
    );

    HttpResponse::Ok().json(FindTripMatchesResponse {
        matches: outcome.matches,
        total_candidates: outcome.total_candidates,
        skipped_records: outcome.skipped_records,
    })
}
