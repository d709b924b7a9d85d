//! Commands sent to the microphone unit.
//!
//! Both endpoints make the device reboot, and it answers with a redirect to
//! its "restarting" page, so any 2xx or 3xx status counts as accepted.

use std::sync::Arc;

use crate::config::MonitorConfig;
use crate::display::DisplayBoard;
use crate::error::DeviceError;
use crate::traits::{Headers, HttpClient, Response};

/// Path of the WiFi configuration endpoint.
pub const WIFI_PATH: &str = "wifi";

/// Path of the restart endpoint.
pub const RESTART_PATH: &str = "restart";

/// Station credentials the device should join after rebooting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    pub ssid: String,
    pub password: String,
}

impl WifiCredentials {
    /// Read the credentials from the board's `wifi_ssid` and `wifi_pass`
    /// fields.
    pub fn from_board(board: &DisplayBoard) -> Result<Self, DeviceError> {
        let ssid = board.value("wifi_ssid").unwrap_or_default();
        if ssid.is_empty() {
            return Err(DeviceError::MissingField("wifi_ssid"));
        }
        Ok(Self {
            ssid,
            password: board.value("wifi_pass").unwrap_or_default(),
        })
    }

    /// `application/x-www-form-urlencoded` body.
    pub fn form_body(&self) -> String {
        format!(
            "wifi_ssid={}&wifi_pass={}",
            urlencoding::encode(&self.ssid),
            urlencoding::encode(&self.password)
        )
    }
}

/// Client for the device's command endpoints.
#[derive(Clone)]
pub struct DeviceClient {
    client: Arc<dyn HttpClient>,
    config: MonitorConfig,
}

impl DeviceClient {
    pub fn new(client: Arc<dyn HttpClient>, config: MonitorConfig) -> Self {
        Self { client, config }
    }

    /// Store new station credentials; the device restarts afterwards.
    pub async fn save_wifi(&self, credentials: &WifiCredentials) -> Result<(), DeviceError> {
        let mut headers = Headers::new();
        headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );

        tracing::info!("Saving WiFi credentials for SSID {:?}", credentials.ssid);
        let response = self
            .client
            .post(&self.config.endpoint(WIFI_PATH), &credentials.form_body(), &headers)
            .await?;

        accepted("wifi", &response)
    }

    /// Ask the device to reboot.
    pub async fn restart(&self) -> Result<(), DeviceError> {
        tracing::info!("Restarting device at {}", self.config.base_url);
        let response = self
            .client
            .post(&self.config.endpoint(RESTART_PATH), "", &Headers::new())
            .await?;

        accepted("restart", &response)
    }
}

fn accepted(command: &'static str, response: &Response) -> Result<(), DeviceError> {
    if response.is_success() || response.is_redirect() {
        Ok(())
    } else {
        tracing::warn!("Device rejected {} with HTTP {}", command, response.status);
        Err(DeviceError::Rejected {
            command,
            status: response.status,
        })
    }
}
