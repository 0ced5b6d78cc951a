//! Client configuration resolved at build time.

use log::LevelFilter;
use std::str::FromStr;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the attendance store, without a trailing slash
    pub api_base_url: String,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl AppConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url: String = api_base_url.into();
        Self {
            api_base_url: api_base_url.trim().trim_end_matches('/').to_string(),
            log_level: LevelFilter::Info,
        }
    }

    pub fn with_log_level(mut self, log_level: LevelFilter) -> Self {
        self.log_level = log_level;
        self
    }

    /// Build from optional raw values, falling back to defaults for missing
    /// or blank ones. An unparseable log level also falls back.
    pub fn from_values(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let base = api_base_url
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);
        let level = log_level
            .and_then(|v| LevelFilter::from_str(v.trim()).ok())
            .unwrap_or(LevelFilter::Info);
        Self::new(base).with_log_level(level)
    }

    /// Absolute URL for a path below the store's base, e.g. `/stats/monthly/x`
    pub fn endpoint(&self, path: &str) -> String {
        if path.is_empty() || path == "/" {
            return self.api_base_url.clone();
        }
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}
