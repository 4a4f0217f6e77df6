use crate::{
    config::{PollConfig, ServerConfig},
    error::{ProbeError, Result},
    models::{HealthResponse, HealthStatus},
};
use reqwest::Client;
use std::time::Duration;
use tokio::time::Instant;

/// Terminal outcome of a readiness-polling loop. Exactly one of these is
/// produced per call; the caller decides what to do about it (the library
/// never exits the process).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Ready { attempts: u32 },
    ServerError { detail: Option<String> },
    TimedOut { waited: Duration, attempts: u32 },
}

impl PollOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, PollOutcome::Ready { .. })
    }
}

#[derive(Clone)]
pub struct HealthClient {
    client: Client,
    config: ServerConfig,
}

impl HealthClient {
    pub fn new(client: Client, config: ServerConfig) -> Self {
        Self { client, config }
    }

    /// One GET against `/health`.
    ///
    /// Transport faults and non-200 statuses come back as `Err`; the polling
    /// loop treats both as "still waiting" while single callers see the
    /// specific failure.
    pub async fn check(&self) -> Result<HealthResponse> {
        let response = self
            .client
            .get(self.config.health_url())
            .timeout(self.config.health_timeout())
            .send()
            .await
            .map_err(|e| ProbeError::TransportError(format!("health request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<HealthResponse>()
            .await
            .map_err(|e| ProbeError::ResponseError(format!("invalid health body: {}", e)))
    }

    /// Poll `/health` until the server reports a terminal status or the
    /// wall-clock budget runs out.
    ///
    /// `ready` and `error` stop the loop immediately; every other status and
    /// every failed GET logs a progress line, sleeps for the configured
    /// interval, and retries. The deadline is evaluated after each attempt so
    /// the loop never sleeps past its budget.
    pub async fn wait_until_ready(&self, poll: &PollConfig) -> PollOutcome {
        let start = Instant::now();
        let mut attempts: u32 = 0;

        log::info!(
            "Polling {} for model readiness (budget {}s, every {}s)",
            self.config.health_url(),
            poll.timeout.as_secs(),
            poll.interval.as_secs()
        );

        loop {
            attempts += 1;

            match self.check().await {
                Ok(health) => match health.parsed_status() {
                    HealthStatus::Ready => {
                        log::info!("Model ready after {} poll(s)", attempts);
                        return PollOutcome::Ready { attempts };
                    }
                    HealthStatus::Error => {
                        log::error!(
                            "Model failed to load: {}",
                            health.detail.as_deref().unwrap_or("no detail from server")
                        );
                        return PollOutcome::ServerError {
                            detail: health.detail,
                        };
                    }
                    status => {
                        log::info!("Model status: {}", status.as_str());
                    }
                },
                Err(e) => {
                    log::info!("Waiting for server... ({})", e);
                }
            }

            if start.elapsed() >= poll.timeout {
                log::warn!(
                    "Timed out after {} poll(s) ({}s budget)",
                    attempts,
                    poll.timeout.as_secs()
                );
                return PollOutcome::TimedOut {
                    waited: start.elapsed(),
                    attempts,
                };
            }

            tokio::time::sleep(poll.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::GenServerClient;
    use httpmock::{Method::GET, MockServer};

    fn client_for(server: &MockServer) -> GenServerClient {
        GenServerClient::new(ServerConfig::new().with_base_url(server.base_url())).unwrap()
    }

    fn fast_poll() -> PollConfig {
        PollConfig::new()
            .with_timeout(Duration::from_secs(5))
            .with_interval(Duration::from_millis(50))
    }

    #[tokio::test]
    async fn ready_on_first_poll_stops_immediately() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/health");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"status": "ready"}"#);
            })
            .await;

        let client = client_for(&server);
        let outcome = client.health().wait_until_ready(&fast_poll()).await;

        assert_eq!(outcome, PollOutcome::Ready { attempts: 1 });
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn error_status_is_terminal_regardless_of_budget() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/health");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"status": "error", "detail": "weights missing"}"#);
            })
            .await;

        let client = client_for(&server);
        let poll = fast_poll().with_timeout(Duration::from_secs(300));
        let outcome = client.health().wait_until_ready(&poll).await;

        assert_eq!(
            outcome,
            PollOutcome::ServerError {
                detail: Some("weights missing".to_string())
            }
        );
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn keeps_polling_through_loading_until_ready() {
        let server = MockServer::start_async().await;
        let mut loading = server
            .mock_async(|when, then| {
                when.method(GET).path("/health");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"status": "loading"}"#);
            })
            .await;

        let health = client_for(&server).health().clone();
        let poll = fast_poll();
        let handle = tokio::spawn(async move { health.wait_until_ready(&poll).await });

        // Let a few loading polls land, then flip the server to ready.
        tokio::time::sleep(Duration::from_millis(150)).await;
        let loading_polls = loading.hits_async().await;
        loading.delete_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/health");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"status": "ready"}"#);
            })
            .await;

        let outcome = handle.await.unwrap();
        assert!(loading_polls >= 1);
        match outcome {
            PollOutcome::Ready { attempts } => assert!(attempts > loading_polls as u32),
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_server_times_out() {
        // Discard-port URL nothing listens on; every poll is a transport fault.
        let config = ServerConfig::new()
            .with_base_url("http://127.0.0.1:9")
            .with_health_timeout(1);
        let client = GenServerClient::new(config).unwrap();
        let poll = PollConfig::new()
            .with_timeout(Duration::from_millis(200))
            .with_interval(Duration::from_millis(50));

        let outcome = client.health().wait_until_ready(&poll).await;

        match outcome {
            PollOutcome::TimedOut { waited, attempts } => {
                assert!(waited >= Duration::from_millis(200));
                assert!(attempts >= 1);
            }
            other => panic!("expected TimedOut, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_200_health_counts_as_waiting() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/health");
                then.status(503).body("starting up");
            })
            .await;

        let client = client_for(&server);
        let err = client.health().check().await.unwrap_err();
        assert!(matches!(
            err,
            ProbeError::ServerError { status: 503, ref body } if body == "starting up"
        ));

        let poll = PollConfig::new()
            .with_timeout(Duration::from_millis(120))
            .with_interval(Duration::from_millis(40));
        let outcome = client.health().wait_until_ready(&poll).await;
        assert!(matches!(outcome, PollOutcome::TimedOut { attempts, .. } if attempts > 1));
    }

    #[tokio::test]
    async fn check_maps_transport_failure() {
        let config = ServerConfig::new()
            .with_base_url("http://127.0.0.1:9")
            .with_health_timeout(1);
        let client = GenServerClient::new(config).unwrap();

        let err = client.health().check().await.unwrap_err();
        assert!(matches!(err, ProbeError::TransportError(_)));
    }
}
