//! Configuration loading from environment.

use std::env;

const DEFAULT_UPSTREAM: &str = "https://api.frankfurter.app";

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub upstream_base_url: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let upstream_base_url =
            env::var("FRANKFURTER_BASE_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM.to_string());

        Ok(Self {
            port,
            upstream_base_url,
        })
    }
}
