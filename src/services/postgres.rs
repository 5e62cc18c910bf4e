use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool};
use std::time::Duration;
use thiserror::Error;

use crate::models::TripCandidate;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),
}

/// Eligible trips for a passenger: active, seats left, departing later,
/// not driven by the passenger
const CANDIDATE_TRIPS_QUERY: &str = r#"
    SELECT t.id::BIGINT AS id,
           t.from_location,
           t.to_location,
           t.departure_time,
           t.max_passengers::INT AS max_passengers,
           t.current_passengers::INT AS current_passengers
    FROM trips t
    WHERE t.status = 'active'
    AND t.driver_id != $1
    AND t.current_passengers < t.max_passengers
    AND t.departure_time > NOW()
    ORDER BY t.departure_time ASC
"#;

/// PostgreSQL client supplying candidate trips
///
/// Reads the trips table owned by the rideshare backend. The schema and all
/// writes belong to that backend; this client only selects.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = pool_options(max_connections, min_connections, acquire_timeout, idle_timeout)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a client whose connections are opened on first use
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<Self, PostgresError> {
        let pool = pool_options(max_connections, 0, Duration::from_secs(5), Duration::from_secs(600))
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Fetch every trip the passenger could join
    ///
    /// Fails as a whole if the query cannot run. Rows are decoded one by one
    /// and handed back individually so a single malformed row can be skipped
    /// by the caller.
    pub async fn fetch_candidates(
        &self,
        passenger_id: i64,
    ) -> Result<Vec<Result<TripCandidate, sqlx::Error>>, PostgresError> {
        let rows: Vec<PgRow> = sqlx::query(CANDIDATE_TRIPS_QUERY)
            .bind(passenger_id)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Fetched {} candidate trips for passenger {}", rows.len(), passenger_id);

        Ok(rows.iter().map(TripCandidate::from_row).collect())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn pool_options(
    max_connections: u32,
    min_connections: u32,
    acquire_timeout: Duration,
    idle_timeout: Duration,
) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(min_connections)
        .acquire_timeout(acquire_timeout)
        .idle_timeout(idle_timeout)
        .test_before_acquire(true)
}
