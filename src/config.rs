use crate::toast::ToastTiming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default configuration file name, resolved against the working directory
pub const CONFIG_FILE: &str = "config.json5";

/// Default address of the Library Logger server
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Clock refresh period in seconds
pub const DEFAULT_CLOCK_REFRESH_SECS: u64 = 60;

/// Dashboard poll period in seconds
pub const DEFAULT_DASHBOARD_REFRESH_SECS: u64 = 5;

/// Runtime configuration structure
///
/// Every field has a default, so an empty JSON5 object (`{}`) is a valid
/// configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Scheme, host and port of the Library Logger server
    pub base_url: String,
    /// Clock format to use (24-hour, 12-hour, or no clock)
    pub clock: Clock,
    /// How often the page clock is re-rendered
    pub clock_refresh_secs: u64,
    /// How often the dashboard refresh hook runs
    pub dashboard_refresh_secs: u64,
    /// Page paths on which dashboard polling starts automatically
    pub dashboard_paths: Vec<String>,
    /// How long a toast stays fully visible
    pub toast_visible_ms: u64,
    /// Length of the toast exit animation
    pub toast_exit_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            clock: Clock::default(),
            clock_refresh_secs: DEFAULT_CLOCK_REFRESH_SECS,
            dashboard_refresh_secs: DEFAULT_DASHBOARD_REFRESH_SECS,
            dashboard_paths: vec!["/".to_string(), "/dashboard".to_string()],
            toast_visible_ms: ToastTiming::default().visible.as_millis() as u64,
            toast_exit_ms: ToastTiming::default().exit.as_millis() as u64,
        }
    }
}

impl Config {
    /// Load the runtime configuration from a JSON5 file.
    ///
    /// Falls back to [`CONFIG_FILE`] when no path is given. The loaded
    /// configuration is validated before it is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read, parsed or
    /// fails validation
    pub fn load(path: Option<&Path>) -> crate::error::Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(CONFIG_FILE));
        tracing::debug!("Loading configuration from {}", path.display());

        let config_str = fs::read_to_string(path)?;
        let config = Self::from_json5(&config_str)?;

        tracing::info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate a configuration from JSON5 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON5 or fails validation
    pub fn from_json5(text: &str) -> crate::error::Result<Self> {
        let config: Config = json5::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid setting
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(crate::error::LibraryLoggerError::from(
                "Base URL cannot be empty",
            ));
        }

        if Url::parse(&self.base_url).is_err() {
            return Err(crate::error::LibraryLoggerError::from(format!(
                "Invalid URL format: {}",
                self.base_url
            )));
        }

        if self.clock_refresh_secs == 0 {
            return Err(crate::error::LibraryLoggerError::from(
                "Clock refresh interval must be greater than zero",
            ));
        }

        if self.dashboard_refresh_secs == 0 {
            return Err(crate::error::LibraryLoggerError::from(
                "Dashboard refresh interval must be greater than zero",
            ));
        }

        if self.dashboard_paths.iter().any(|p| p.trim().is_empty()) {
            return Err(crate::error::LibraryLoggerError::from(
                "Dashboard paths cannot be empty",
            ));
        }

        Ok(())
    }

    /// Parsed server address.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL
    pub fn api_base(&self) -> crate::error::Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    #[must_use]
    pub fn clock_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.clock_refresh_secs)
    }

    #[must_use]
    pub fn dashboard_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.dashboard_refresh_secs)
    }

    #[must_use]
    pub fn toast_timing(&self) -> ToastTiming {
        ToastTiming {
            visible: Duration::from_millis(self.toast_visible_ms),
            exit: Duration::from_millis(self.toast_exit_ms),
        }
    }

    /// Whether dashboard polling should start automatically on `path`
    #[must_use]
    pub fn is_dashboard_path(&self, path: &str) -> bool {
        self.dashboard_paths.iter().any(|p| p == path)
    }
}

/// Clock format options
///
/// Defines the format in which to display the time in the page header
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum Clock {
    /// 24-hour format (e.g., Sun, Oct 18, 2026, 14:05)
    Hour24,
    /// 12-hour format with AM/PM (e.g., Sun, Oct 18, 2026, 02:05 PM)
    #[default]
    Hour12,
    /// No clock displayed
    None,
}

impl std::fmt::Display for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Clock::Hour24 => f.write_str("24hour"),
            Clock::Hour12 => f.write_str("12hour"),
            Clock::None => f.write_str("none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_timings() {
        let config = Config::default();
        assert_eq!(config.clock, Clock::Hour12);
        assert_eq!(config.clock_refresh_interval(), Duration::from_secs(60));
        assert_eq!(config.dashboard_refresh_interval(), Duration::from_secs(5));
        assert_eq!(config.toast_timing().visible, Duration::from_millis(5000));
        assert_eq!(config.toast_timing().exit, Duration::from_millis(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = Config::from_json5("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_json5_overrides() {
        let config = Config::from_json5(
            r#"{
                // trailing commas and comments are fine in JSON5
                base_url: "http://library.local:8080",
                clock: "Hour24",
                dashboard_paths: ["/dashboard"],
            }"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://library.local:8080");
        assert_eq!(config.clock, Clock::Hour24);
        assert!(config.is_dashboard_path("/dashboard"));
        assert!(!config.is_dashboard_path("/"));
        assert_eq!(config.clock_refresh_secs, DEFAULT_CLOCK_REFRESH_SECS);
    }

    #[test]
    fn test_dashboard_paths() {
        let config = Config::default();
        assert!(config.is_dashboard_path("/"));
        assert!(config.is_dashboard_path("/dashboard"));
        assert!(!config.is_dashboard_path("/students"));
        assert!(!config.is_dashboard_path("/dashboard/"));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = Config {
            base_url: "library".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "Error: Invalid URL format: library"
        );
    }

    #[test]
    fn test_validate_rejects_zero_intervals() {
        let config = Config {
            dashboard_refresh_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            clock_refresh_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clock_display() {
        assert_eq!(Clock::Hour24.to_string(), "24hour");
        assert_eq!(Clock::Hour12.to_string(), "12hour");
        assert_eq!(Clock::None.to_string(), "none");
    }
}
