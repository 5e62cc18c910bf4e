use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{MatchThresholds, RouteWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,
    #[serde(default = "default_tie_epsilon")]
    pub tie_epsilon: f64,
    #[serde(default = "default_max_distance")]
    pub default_max_distance: f64,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            min_similarity: default_min_similarity(),
            tie_epsilon: default_tie_epsilon(),
            default_max_distance: default_max_distance(),
            max_limit: default_max_limit(),
        }
    }
}

impl MatchingSettings {
    pub fn thresholds(&self) -> MatchThresholds {
        MatchThresholds {
            min_similarity: self.min_similarity,
            tie_epsilon: self.tie_epsilon,
        }
    }

    /// Number of matches to return for a requested limit
    ///
    /// An absent limit means the full list, capped at `max_limit` like any
    /// explicit one.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.max_limit).min(self.max_limit)
    }
}

fn default_min_similarity() -> f64 { 0.3 }
fn default_tie_epsilon() -> f64 { 0.01 }
fn default_max_distance() -> f64 { 100.0 }
fn default_max_limit() -> usize { 100 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_from_similarity_weight")]
    pub from_similarity: f64,
    #[serde(default = "default_to_similarity_weight")]
    pub to_similarity: f64,
    #[serde(default = "default_from_distance_weight")]
    pub from_distance: f64,
    #[serde(default = "default_to_distance_weight")]
    pub to_distance: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            from_similarity: default_from_similarity_weight(),
            to_similarity: default_to_similarity_weight(),
            from_distance: default_from_distance_weight(),
            to_distance: default_to_distance_weight(),
        }
    }
}

impl From<&WeightsConfig> for RouteWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            from_similarity: config.from_similarity,
            to_similarity: config.to_similarity,
            from_distance: config.from_distance,
            to_distance: config.to_distance,
        }
    }
}

impl WeightsConfig {
    /// Each pair of weights must be non-negative and sum to 1, otherwise route
    /// scores leave their documented ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_pair("similarity", self.from_similarity, self.to_similarity)?;
        check_pair("distance", self.from_distance, self.to_distance)
    }
}

fn check_pair(name: &str, from: f64, to: f64) -> Result<(), ConfigError> {
    if !from.is_finite() || !to.is_finite() || from < 0.0 || to < 0.0 {
        return Err(ConfigError::Message(format!(
            "scoring.weights: {} weights must be non-negative numbers (from = {}, to = {})",
            name, from, to
        )));
    }

    if (from + to - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::Message(format!(
            "scoring.weights: {} weights must sum to 1 (from = {}, to = {})",
            name, from, to
        )));
    }

    Ok(())
}

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

fn default_from_similarity_weight() -> f64 { 0.45 }
fn default_to_similarity_weight() -> f64 { 0.55 }
fn default_from_distance_weight() -> f64 { 0.4 }
fn default_to_distance_weight() -> f64 { 0.6 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with RIDESHARE__)
    /// 5. DATABASE_URL, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., RIDESHARE__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        let settings: Self = apply_database_url(settings)?.try_deserialize()?;
        settings.scoring.weights.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        let settings: Self = settings.try_deserialize()?;
        settings.scoring.weights.validate()?;
        Ok(settings)
    }

    pub fn route_weights(&self) -> RouteWeights {
        RouteWeights::from(&self.scoring.weights)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("RIDESHARE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Let a plain DATABASE_URL win over file values, as the backend's own
/// deployment sets it
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        Err(_) => Ok(settings),
    }
}
