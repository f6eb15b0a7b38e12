//! Configuration management for the Seaweed Trade Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SWT_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Grading oracle configuration
    pub oracle: OracleConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OracleConfig {
    /// API credential for the generative-text service.
    /// Absence is a legal, handled state: grading falls back rather
    /// than failing startup.
    pub api_key: Option<String>,

    /// Model identifier
    pub model: String,

    /// Base URL of the generateContent endpoint
    pub endpoint: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("SWT_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("oracle.model", "gemini-3-flash-preview")?
            .set_default(
                "oracle.endpoint",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("oracle.timeout_secs", 60)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SWT_ prefix)
            .add_source(
                Environment::with_prefix("SWT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-3-flash-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 60,
        }
    }
}
