//! Mock configurations for test fixtures.

pub use birdedge_monitor::adapters::mock::{MockHttpClient, MockResponse};
pub use birdedge_monitor::traits::{HttpClient, HttpError, Response};

use bytes::Bytes;

/// Builder for a [`MockHttpClient`] answering the status endpoint.
pub struct MockDeviceConfig {
    client: MockHttpClient,
}

impl MockDeviceConfig {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Answer `url` with a 200 and the given JSON body.
    pub fn with_json_response(self, url: &str, json: &str) -> Self {
        self.client.set_response(url, json_response(json));
        self
    }

    /// Answer `url` with a transport error.
    #[allow(dead_code)]
    pub fn with_transport_error(self, url: &str) -> Self {
        self.client.set_response(
            url,
            MockResponse::Error(HttpError::ConnectionFailed("network unreachable".to_string())),
        );
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockDeviceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A 200 response carrying `json`.
pub fn json_response(json: &str) -> MockResponse {
    MockResponse::Success(Response::new(200, Bytes::from(json.to_string())))
}
