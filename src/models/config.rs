//! Configuration model loaded from external sources.

use std::env;

use config::{Config, ConfigError};
use serde::Deserialize;

use crate::services::gallery::PageSizes;

fn default_desktop_per_page() -> usize {
    20
}

fn default_mobile_per_page() -> usize {
    15
}

fn default_catalog_size() -> u32 {
    100
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub assets_dir: String,
    #[serde(default = "default_desktop_per_page")]
    pub desktop_per_page: usize,
    #[serde(default = "default_mobile_per_page")]
    pub mobile_per_page: usize,
    /// Number of images in the generated sample catalog.
    #[serde(default = "default_catalog_size")]
    pub catalog_size: u32,
    /// Delay applied before every data source call.
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

impl ServerConfig {
    /// Layers `config/default.yaml`, `config/{APP_ENV}.yaml` (default `local`)
    /// and `APP_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }

    pub fn page_sizes(&self) -> PageSizes {
        PageSizes {
            desktop: self.desktop_per_page,
            mobile: self.mobile_per_page,
        }
    }
}
