use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Client settings: defaults, then `rental-scout.toml`, then `RENTAL_*` variables
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub user_id: i64,
    pub page_size: usize,
    pub success_banner_ms: u64,
    /// No timeout when unset
    pub request_timeout_secs: Option<u64>,
    /// Serve the demo catalog from memory instead of calling the service
    pub offline: bool,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok();

        let builder = Self::defaults()?
            .add_source(File::with_name("rental-scout").required(false))
            .add_source(Environment::with_prefix("RENTAL").try_parsing(true));

        builder
            .build()?
            .try_deserialize()
            .context("Invalid rental-scout configuration")
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("base_url", "http://localhost:4000")?
            .set_default("user_id", 1)?
            .set_default("page_size", 12)?
            .set_default("success_banner_ms", 3000)?
            .set_default("offline", false)?)
    }

    pub fn success_banner(&self) -> Duration {
        Duration::from_millis(self.success_banner_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
