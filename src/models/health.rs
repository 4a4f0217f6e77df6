use serde::Deserialize;

/// Parsed readiness state of the generation server.
///
/// Only `Ready` and `Error` are terminal; every other value (including
/// statuses this client has never seen) means the model is still loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Loading,
    Ready,
    Error,
    Other(String),
}

impl HealthStatus {
    pub fn from_str(status: &str) -> Self {
        match status {
            "loading" => HealthStatus::Loading,
            "ready" => HealthStatus::Ready,
            "error" => HealthStatus::Error,
            other => HealthStatus::Other(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, HealthStatus::Ready | HealthStatus::Error)
    }

    pub fn as_str(&self) -> &str {
        match self {
            HealthStatus::Loading => "loading",
            HealthStatus::Ready => "ready",
            HealthStatus::Error => "error",
            HealthStatus::Other(raw) => raw,
        }
    }
}

/// Raw `/health` body. Extra fields are ignored; `detail` carries the
/// server's load-failure message when it reports one.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub detail: Option<String>,
}

impl HealthResponse {
    pub fn parsed_status(&self) -> HealthStatus {
        HealthStatus::from_str(&self.status)
    }
}
