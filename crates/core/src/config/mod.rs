//! Application configuration with layered loading.
//!
//! Loading precedence (highest wins):
//! 1. Environment variables (VACSTAT_*)
//! 2. TOML config file (if VACSTAT_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Which acquisition strategy serves vacancy data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Official hh.ru JSON API.
    Api,
    /// Static HTML scrape of hh.ru search pages.
    Html,
}

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    ///
    /// Set via VACSTAT_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Path to the SQLite result store.
    ///
    /// Set via VACSTAT_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Acquisition strategy: "api" or "html".
    ///
    /// Set via VACSTAT_SOURCE environment variable.
    #[serde(default = "default_source")]
    pub source: SourceKind,

    /// Base URL of the hh.ru JSON API.
    #[serde(default = "default_hh_base_url")]
    pub hh_base_url: String,

    /// Base URL of the hh.ru site for HTML scraping.
    #[serde(default = "default_hh_html_base_url")]
    pub hh_html_base_url: String,

    /// User-Agent string for upstream requests.
    ///
    /// Set via VACSTAT_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request HTTP timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// hh.ru area id restricting the search (1 = Moscow).
    #[serde(default = "default_area")]
    pub area: u32,

    /// Listings requested per page (hh.ru caps this at 100).
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Maximum pages fetched per query.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Minimum pause between page requests, in milliseconds.
    ///
    /// Together with the jitter this keeps the service below one request per
    /// second toward the upstream site.
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Upper bound of the random extra pause added to each page delay.
    #[serde(default = "default_page_jitter_ms")]
    pub page_jitter_ms: u64,

    /// USD to RUB conversion rate used by the salary normalizer.
    #[serde(default = "default_usd_rate")]
    pub usd_rate: f64,

    /// EUR to RUB conversion rate used by the salary normalizer.
    #[serde(default = "default_eur_rate")]
    pub eur_rate: f64,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./vacstat-cache.sqlite")
}

fn default_source() -> SourceKind {
    SourceKind::Api
}

fn default_hh_base_url() -> String {
    "https://api.hh.ru".into()
}

fn default_hh_html_base_url() -> String {
    "https://hh.ru".into()
}

fn default_user_agent() -> String {
    "HH-Analytics-Bot/1.0 (+hi@yourapp.com)".into()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_area() -> u32 {
    1 // Moscow
}

fn default_per_page() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    3
}

fn default_page_delay_ms() -> u64 {
    1_100
}

fn default_page_jitter_ms() -> u64 {
    400
}

fn default_usd_rate() -> f64 {
    90.0
}

fn default_eur_rate() -> f64 {
    100.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            db_path: default_db_path(),
            source: default_source(),
            hh_base_url: default_hh_base_url(),
            hh_html_base_url: default_hh_html_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            area: default_area(),
            per_page: default_per_page(),
            max_pages: default_max_pages(),
            page_delay_ms: default_page_delay_ms(),
            page_jitter_ms: default_page_jitter_ms(),
            usd_rate: default_usd_rate(),
            eur_rate: default_eur_rate(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Minimum inter-page pause as Duration.
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// Jitter upper bound as Duration.
    pub fn page_jitter(&self) -> Duration {
        Duration::from_millis(self.page_jitter_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("VACSTAT_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("VACSTAT_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
