use crate::error::{config_error, env_error, RosterResult};
use crate::schedule::{DayOrder, WeekFilter};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Default base URL of the roster backend API
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// File that can override the view settings
pub const VIEW_CONFIG_PATH: &str = "config/view.toml";

/// How schedules are presented
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub week_filter: WeekFilter,
    #[serde(default)]
    pub day_order: DayOrder,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the backend API, e.g. http://localhost:5000/api
    pub api_base_url: String,
    /// Session cookie obtained elsewhere, forwarded as-is
    pub session_cookie: Option<String>,
    /// Timeout for each backend request
    pub request_timeout_secs: u64,
    /// Presentation settings
    pub view: ViewConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            session_cookie: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            view: ViewConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> RosterResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let api_base_url =
            env::var("ROSTER_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        if api_base_url.trim().is_empty() {
            return Err(config_error("ROSTER_API_BASE must not be empty"));
        }

        let session_cookie = env::var("ROSTER_SESSION_COOKIE")
            .ok()
            .filter(|cookie| !cookie.trim().is_empty());

        let request_timeout_secs = match env::var("ROSTER_REQUEST_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| env_error("ROSTER_REQUEST_TIMEOUT_SECS"))?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let mut view = ViewConfig::default();

        // The view file is optional; environment variables win over it
        if Path::new(VIEW_CONFIG_PATH).exists() {
            let content = fs::read_to_string(VIEW_CONFIG_PATH)?;
            view = parse_view_config(&content)?;
            debug!("Loaded view settings from {}", VIEW_CONFIG_PATH);
        }

        if let Ok(value) = env::var("ROSTER_WEEK_FILTER") {
            view.week_filter = value.parse::<WeekFilter>().map_err(|e: String| {
                warn!("{}", e);
                env_error("ROSTER_WEEK_FILTER")
            })?;
        }

        if let Ok(value) = env::var("ROSTER_DAY_ORDER") {
            view.day_order = value.parse::<DayOrder>().map_err(|e: String| {
                warn!("{}", e);
                env_error("ROSTER_DAY_ORDER")
            })?;
        }

        Ok(Config {
            api_base_url,
            session_cookie,
            request_timeout_secs,
            view,
        })
    }
}

/// Parse the contents of `config/view.toml`
pub fn parse_view_config(content: &str) -> RosterResult<ViewConfig> {
    Ok(toml::from_str::<ViewConfig>(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.session_cookie.is_none());
        assert_eq!(config.view.week_filter, WeekFilter::All);
        assert_eq!(config.view.day_order, DayOrder::Weekday);
    }

    #[test]
    fn test_parse_view_config() {
        let view = parse_view_config("week_filter = \"next_week\"\nday_order = \"chronological\"\n")
            .unwrap();
        assert_eq!(view.week_filter, WeekFilter::NextWeek);
        assert_eq!(view.day_order, DayOrder::Chronological);

        // Missing keys fall back to defaults
        let view = parse_view_config("day_order = \"chronological\"").unwrap();
        assert_eq!(view.week_filter, WeekFilter::All);

        assert!(parse_view_config("week_filter = \"fortnight\"").is_err());
    }
}
