//! Configuration for feedrank.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{FeedError, FeedResult};

/// Tolerance used when checking that scoring weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Main configuration for feedrank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Ranking cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Scoring weights.
    #[serde(default)]
    pub scoring: ScoringWeights,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind. `0` picks an ephemeral port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Ranking cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached user rankings.
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,

    /// Artificial delay added to every cache miss, in milliseconds.
    #[serde(default = "default_miss_latency_ms")]
    pub miss_latency_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            miss_latency_ms: default_miss_latency_ms(),
        }
    }
}

impl CacheConfig {
    /// Capacity as a `NonZeroUsize`, rejecting zero.
    pub fn capacity_non_zero(&self) -> FeedResult<NonZeroUsize> {
        NonZeroUsize::new(self.capacity)
            .ok_or_else(|| FeedError::config("cache.capacity must be greater than zero"))
    }

    /// Miss-path delay as a `Duration`.
    pub fn miss_latency(&self) -> Duration {
        Duration::from_millis(self.miss_latency_ms)
    }
}

pub(crate) fn default_cache_capacity() -> usize {
    128
}

fn default_miss_latency_ms() -> u64 {
    100
}

/// Weights of the linear scoring formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight applied to item freshness.
    #[serde(default = "default_freshness_weight")]
    pub freshness: f64,

    /// Weight applied to user affinity.
    #[serde(default = "default_affinity_weight")]
    pub affinity: f64,

    /// Weight applied to engagement.
    #[serde(default = "default_engagement_weight")]
    pub engagement: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            freshness: default_freshness_weight(),
            affinity: default_affinity_weight(),
            engagement: default_engagement_weight(),
        }
    }
}

impl ScoringWeights {
    /// Checks that weights are finite, non-negative and sum to 1.0.
    pub fn validate(&self) -> FeedResult<()> {
        let weights = [
            ("freshness", self.freshness),
            ("affinity", self.affinity),
            ("engagement", self.engagement),
        ];

        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(FeedError::config(format!(
                    "scoring.{} must be a finite, non-negative number (got {})",
                    name, weight
                )));
            }
        }

        let sum = self.freshness + self.affinity + self.engagement;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(FeedError::config(format!(
                "scoring weights must sum to 1.0 (got {})",
                sum
            )));
        }

        Ok(())
    }
}

fn default_freshness_weight() -> f64 {
    0.5
}

fn default_affinity_weight() -> f64 {
    0.3
}

fn default_engagement_weight() -> f64 {
    0.2
}

/// Catalog source settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file holding the catalog. The built-in demo catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> FeedResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> FeedResult<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Renders the configuration as pretty TOML.
    pub fn to_toml(&self) -> FeedResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            scoring: ScoringWeights::default(),
            catalog: CatalogConfig::default(),
        }
    }

    /// Validates values that serde cannot check on its own.
    pub fn validate(&self) -> FeedResult<()> {
        self.cache.capacity_non_zero()?;
        self.scoring.validate()?;

        match self.general.log_format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(FeedError::config(format!(
                    "general.log_format must be 'text' or 'json' (got '{}')",
                    other
                )))
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
