//! Common test utilities for integration tests.

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;

use birdedge_monitor::config::MonitorConfig;
use birdedge_monitor::display::DisplayBoard;
use birdedge_monitor::poller::StatusPoller;
use std::sync::Arc;

/// Base URL used by the mock device.
pub const BASE_URL: &str = "http://birdclient.local";

/// Status URL of the mock device.
pub const STATUS_URL: &str = "http://birdclient.local/status.json";

/// A document as served by real firmware.
#[allow(dead_code)]
pub const DEVICE_STATUS: &str = r#"{
    "hostname": "birdclient-1a2b",
    "ip": "10.0.0.12",
    "ping": 3,
    "uptime": "3600",
    "wifi_rssi": "-61",
    "wifi_ssid": "BirdEdge",
    "wifi_pass": "BirdsAndBats",
    "heap": 182344,
    "streaming": false,
    "battery": 3.91
}"#;

/// Config pointing at the mock device.
pub fn test_config() -> MonitorConfig {
    MonitorConfig::new().with_base_url(BASE_URL).with_log_file(None)
}

/// Poller over `client` writing into `board`.
pub fn test_poller(client: &MockHttpClient, board: DisplayBoard) -> StatusPoller {
    StatusPoller::new(Arc::new(client.clone()), &test_config(), board)
}
