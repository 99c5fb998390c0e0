use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

use crate::data::DEFAULT_PROJECT_COUNT;

/// Prefix for every environment variable the dashboard reads
pub const ENV_PREFIX: &str = "OUTAGE_";

/// Configuration for the application
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// Seed for the mock dataset; a random one is drawn when unset
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of work packages to generate
    #[serde(default = "default_project_count")]
    pub project_count: usize,

    /// Rows in the cost overrun ranking
    #[serde(default = "default_top_overruns")]
    pub top_overruns: usize,

    /// File that receives tracing output while the TUI owns the terminal
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Filter directive used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_project_count() -> usize {
    DEFAULT_PROJECT_COUNT
}

fn default_top_overruns() -> usize {
    5
}

fn default_log_file() -> String {
    "outage_dashboard.log".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            project_count: default_project_count(),
            top_overruns: default_top_overruns(),
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from `OUTAGE_*` environment variables
    pub fn load() -> Result<Self> {
        let config = envy::prefixed(ENV_PREFIX).from_env::<Config>()?;
        Ok(config)
    }

    /// Parse configuration from explicit key/value pairs
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::prefixed(ENV_PREFIX).from_iter::<_, Config>(pairs)?;
        Ok(config)
    }
}

/// Load `.env` if present, then read the environment
pub fn init() -> Result<Config> {
    dotenv().ok();

    Config::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_pairs(pairs(&[("PATH", "/usr/bin")])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.project_count, 85);
        assert_eq!(config.top_overruns, 5);
    }

    #[test]
    fn test_reads_prefixed_values() {
        let config = Config::from_pairs(pairs(&[
            ("OUTAGE_SEED", "42"),
            ("OUTAGE_PROJECT_COUNT", "20"),
            ("OUTAGE_TOP_OVERRUNS", "3"),
            ("OUTAGE_LOG_FILE", "/tmp/outage.log"),
            ("OUTAGE_LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.project_count, 20);
        assert_eq!(config.top_overruns, 3);
        assert_eq!(config.log_file, "/tmp/outage.log");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_rejects_malformed_numbers() {
        assert!(Config::from_pairs(pairs(&[("OUTAGE_PROJECT_COUNT", "many")])).is_err());
    }
}
