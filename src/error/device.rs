//! Device command failures.

use thiserror::Error;

use crate::traits::HttpError;

/// Errors from commands sent to the microphone unit.
#[derive(Debug, Clone, Error)]
pub enum DeviceError {
    /// The request never got an answer.
    #[error("device unreachable: {0}")]
    Transport(#[from] HttpError),

    /// The device rejected the command.
    #[error("device rejected {command} with HTTP {status}")]
    Rejected { command: &'static str, status: u16 },

    /// A required form field was empty.
    #[error("{0} must not be empty")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            DeviceError::Rejected {
                command: "restart",
                status: 500
            }
            .to_string(),
            "device rejected restart with HTTP 500"
        );
        assert_eq!(
            DeviceError::MissingField("wifi_ssid").to_string(),
            "wifi_ssid must not be empty"
        );
    }
}
