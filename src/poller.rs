//! Periodic status polling.
//!
//! [`StatusPoller::poll`] fetches `status.json` once and writes it into the
//! [`DisplayBoard`]. [`StatusPoller::start`] polls immediately and then on a
//! fixed interval from a spawned task owned by the returned [`PollerHandle`].
//!
//! Failures never reach the board: a failed cycle leaves every target as it
//! was until the next successful poll.
//!
//! Polls are serialized. The task awaits each poll before waiting for the
//! next tick, and ticks missed while a request was in flight are skipped, so
//! a slow device never has two requests outstanding from the same poller.
//! Each request is bounded by the configured timeout.

use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::MonitorConfig;
use crate::display::{ApplyReport, DisplayBoard};
use crate::error::PollError;
use crate::status::StatusDocument;
use crate::traits::{Headers, HttpClient, HttpError};

/// Result of one poll cycle.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// The document was fetched and written into the board.
    Applied(ApplyReport),
    /// Nothing was written; the display is stale.
    Failed(PollError),
}

impl PollOutcome {
    /// Whether the cycle updated the board.
    pub fn is_applied(&self) -> bool {
        matches!(self, PollOutcome::Applied(_))
    }
}

/// Notification sent after every poll cycle.
#[derive(Debug, Clone)]
pub struct PollEvent {
    /// When the cycle finished
    pub at: DateTime<Local>,
    /// What the cycle did
    pub outcome: PollOutcome,
}

/// Fetches the status document and applies it to a board.
pub struct StatusPoller {
    client: Arc<dyn HttpClient>,
    status_url: String,
    board: DisplayBoard,
    interval: Duration,
    timeout: Duration,
}

impl StatusPoller {
    /// Create a poller for the device described by `config`.
    ///
    /// The board is shared: clones held elsewhere see every write.
    pub fn new(client: Arc<dyn HttpClient>, config: &MonitorConfig, board: DisplayBoard) -> Self {
        Self {
            client,
            status_url: config.status_url(),
            board,
            interval: config.poll_interval,
            timeout: config.request_timeout,
        }
    }

    /// URL polled on every cycle.
    pub fn status_url(&self) -> &str {
        &self.status_url
    }

    /// The board this poller writes into.
    pub fn board(&self) -> &DisplayBoard {
        &self.board
    }

    /// Fetch and parse the status document without touching the board.
    pub async fn fetch(&self) -> Result<StatusDocument, PollError> {
        let headers = Headers::new();
        let request = self.client.get(&self.status_url, &headers);
        let response = match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(PollError::Transport(HttpError::Timeout(format!(
                    "no answer within {}ms",
                    self.timeout.as_millis()
                ))))
            }
        };

        if !response.is_success() {
            return Err(PollError::Status {
                status: response.status,
            });
        }

        StatusDocument::parse(&response.body)
    }

    /// Run one poll cycle.
    pub async fn poll(&self) -> PollOutcome {
        match self.fetch().await {
            Ok(document) => {
                let report = self.board.apply(&document);
                tracing::trace!(
                    written = report.written,
                    kept = report.kept,
                    unmatched = report.unmatched.len(),
                    "Status applied"
                );
                PollOutcome::Applied(report)
            }
            Err(err) => {
                tracing::debug!(code = err.error_code(), "Status poll failed: {}", err);
                PollOutcome::Failed(err)
            }
        }
    }

    /// Poll now and then every interval until the handle is stopped.
    pub fn start(self) -> PollerHandle {
        self.spawn(None)
    }

    /// Like [`start`](Self::start), reporting each cycle on `events`.
    ///
    /// The task ends by itself once the receiver is dropped.
    pub fn start_with_events(self, events: mpsc::UnboundedSender<PollEvent>) -> PollerHandle {
        self.spawn(Some(events))
    }

    fn spawn(self, events: Option<mpsc::UnboundedSender<PollEvent>>) -> PollerHandle {
        let task = tokio::spawn(async move {
            tracing::info!(
                "Status poller started ({} every {}ms)",
                self.status_url,
                self.interval.as_millis()
            );

            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                // First tick completes immediately.
                interval.tick().await;

                let outcome = self.poll().await;

                if let Some(ref tx) = events {
                    let event = PollEvent {
                        at: Local::now(),
                        outcome,
                    };
                    if tx.send(event).is_err() {
                        tracing::debug!("Poll event channel closed, stopping status poller");
                        break;
                    }
                }
            }
        });

        PollerHandle { task }
    }
}

/// Owner of a running poll task.
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop polling. A request in flight is abandoned.
    pub fn stop(&self) {
        if !self.task.is_finished() {
            tracing::info!("Status poller stopped");
        }
        self.task.abort();
    }

    /// Whether the task is still alive.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Build a poller from `config` and start it.
pub fn spawn_status_poller(
    client: Arc<dyn HttpClient>,
    config: &MonitorConfig,
    board: DisplayBoard,
    events: mpsc::UnboundedSender<PollEvent>,
) -> PollerHandle {
    StatusPoller::new(client, config, board).start_with_events(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::display::Label;
    use crate::traits::{DisplayTarget, Response};
    use bytes::Bytes;

    const URL: &str = "http://birdclient.local/status.json";

    fn poller(client: &MockHttpClient, board: DisplayBoard) -> StatusPoller {
        StatusPoller::new(Arc::new(client.clone()), &MonitorConfig::default(), board)
    }

    fn ok(body: &str) -> MockResponse {
        MockResponse::Success(Response::new(200, Bytes::from(body.to_string())))
    }

    #[test]
    fn test_status_url_from_config() {
        let client = MockHttpClient::new();
        let config = MonitorConfig::new().with_base_url("http://10.0.0.12/");
        let poller = StatusPoller::new(Arc::new(client), &config, DisplayBoard::new());
        assert_eq!(poller.status_url(), "http://10.0.0.12/status.json");
    }

    #[tokio::test]
    async fn test_fetch_sends_plain_get() {
        let client = MockHttpClient::new();
        client.set_response(URL, ok(r#"{"ip": "10.0.0.12"}"#));

        let document = poller(&client, DisplayBoard::new()).fetch().await.unwrap();

        assert_eq!(document.len(), 1);
        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].url, URL);
        assert!(requests[0].headers.is_empty());
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let client = MockHttpClient::new();
        client.set_response(URL, MockResponse::Success(Response::new(503, Bytes::new())));

        let err = poller(&client, DisplayBoard::new()).fetch().await.unwrap_err();
        assert!(matches!(err, PollError::Status { status: 503 }));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let client = MockHttpClient::new();
        client.set_response(URL, ok("{}"));
        client.set_delay(Duration::from_millis(200));

        let config = MonitorConfig::default().with_request_timeout(Duration::from_millis(20));
        let poller = StatusPoller::new(Arc::new(client), &config, DisplayBoard::new());

        let err = poller.fetch().await.unwrap_err();
        assert!(matches!(err, PollError::Transport(HttpError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_poll_applies_document() {
        let client = MockHttpClient::new();
        client.set_response(URL, ok(r#"{"hostname": "birdclient-1a2b"}"#));

        let label = Arc::new(Label::new());
        let board = DisplayBoard::new().bind("hostname", label.clone());

        let outcome = poller(&client, board).poll().await;

        assert!(outcome.is_applied());
        assert_eq!(label.value(), "birdclient-1a2b");
        assert_eq!(client.get_requests()[0].method, "GET");
    }

    #[tokio::test]
    async fn test_poll_parse_failure_leaves_board() {
        let client = MockHttpClient::new();
        client.set_response(URL, ok("<html>not json</html>"));

        let label = Arc::new(Label::with_text("old"));
        let board = DisplayBoard::new().bind("hostname", label.clone());

        let outcome = poller(&client, board).poll().await;

        assert!(matches!(outcome, PollOutcome::Failed(PollError::Parse(_))));
        assert_eq!(label.value(), "old");
    }

    #[tokio::test]
    async fn test_start_polls_immediately() {
        let client = MockHttpClient::new();
        client.set_response(URL, ok(r#"{"ip": "10.0.0.12"}"#));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let board = DisplayBoard::birdedge();
        let handle = poller(&client, board.clone()).start_with_events(tx);

        let event = tokio::time::timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("first poll should not wait for the interval")
            .unwrap();

        assert!(event.outcome.is_applied());
        assert_eq!(board.value("ip").as_deref(), Some("10.0.0.12"));
        handle.stop();
    }

    #[tokio::test]
    async fn test_stop_ends_polling() {
        let client = MockHttpClient::new();
        client.set_response(URL, ok("{}"));

        let config = MonitorConfig::default().with_poll_interval(Duration::from_millis(10));
        let handle = StatusPoller::new(Arc::new(client.clone()), &config, DisplayBoard::new()).start();

        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.stop();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_running());

        let count = client.request_count();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(client.request_count(), count);
    }

    #[tokio::test]
    async fn test_dropped_receiver_ends_task() {
        let client = MockHttpClient::new();
        client.set_response(URL, ok("{}"));
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let handle = poller(&client, DisplayBoard::new()).start_with_events(tx);
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!handle.is_running());
        assert_eq!(client.request_count(), 1);
    }
}
