//! Monitor configuration.
//!
//! Built from CLI arguments and the environment, builder style.
//!
//! ```ignore
//! use birdedge_monitor::config::MonitorConfig;
//!
//! let config = MonitorConfig::new()
//!     .with_base_url("http://birdclient-1a2b.local");
//! assert_eq!(config.status_url(), "http://birdclient-1a2b.local/status.json");
//! ```

use std::path::PathBuf;
use std::time::Duration;

use crate::status::STATUS_PATH;

/// Device address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://birdclient.local";

/// Environment variable overriding the device address.
pub const BASE_URL_ENV: &str = "BIRDEDGE_URL";

/// How often the status document is fetched.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Runtime settings for the monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Base URL of the microphone unit
    pub base_url: String,
    /// Delay between the starts of consecutive polls
    pub poll_interval: Duration,
    /// Upper bound on a single status request
    pub request_timeout: Duration,
    /// Where log output goes (the TUI owns stdout)
    pub log_file: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_POLL_INTERVAL,
            log_file: default_log_file(),
        }
    }
}

impl MonitorConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the device base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the poll interval. The request timeout follows it.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self.request_timeout = interval;
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the log file path.
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Resolve a path relative to the device base URL.
    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// URL of the status document.
    pub fn status_url(&self) -> String {
        self.endpoint(STATUS_PATH)
    }
}

/// Join a base URL and a relative path with exactly one `/`.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// `<cache dir>/birdedge-monitor/monitor.log`, if a cache dir exists.
pub fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("birdedge-monitor").join("monitor.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval, Duration::from_millis(5000));
        assert_eq!(config.request_timeout, config.poll_interval);
    }

    #[test]
    fn test_status_url() {
        let config = MonitorConfig::new().with_base_url("http://10.0.0.12");
        assert_eq!(config.status_url(), "http://10.0.0.12/status.json");
    }

    #[test]
    fn test_join_url_slashes() {
        assert_eq!(join_url("http://a/", "status.json"), "http://a/status.json");
        assert_eq!(join_url("http://a", "/wifi"), "http://a/wifi");
        assert_eq!(join_url("http://a//", "//restart"), "http://a/restart");
        assert_eq!(join_url("http://a/www", "status.json"), "http://a/www/status.json");
    }

    #[test]
    fn test_interval_moves_timeout() {
        let config = MonitorConfig::new().with_poll_interval(Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(2));

        let config = config.with_request_timeout(Duration::from_secs(1));
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(1));
    }
}
