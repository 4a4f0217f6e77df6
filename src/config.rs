use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Connection settings for the generation server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub base_url: String,
    pub health_timeout_secs: u64,
    pub generate_timeout_secs: u64,
}

/// Budget and cadence for the readiness-polling loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            health_timeout_secs: 5,
            // Generation can take minutes on CPU-only hardware.
            generate_timeout_secs: 300,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("SDPROBE_BASE_URL") {
            config.base_url = url;
        }
        if let Some(secs) = env::var("SDPROBE_HEALTH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.health_timeout_secs = secs;
        }
        if let Some(secs) = env::var("SDPROBE_GENERATE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.generate_timeout_secs = secs;
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_health_timeout(mut self, secs: u64) -> Self {
        self.health_timeout_secs = secs;
        self
    }

    pub fn with_generate_timeout(mut self, secs: u64) -> Self {
        self.generate_timeout_secs = secs;
        self
    }

    /// Base URL without a trailing slash, ready for endpoint joins.
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url_trimmed())
    }

    pub fn generate_url(&self) -> String {
        format!("{}/generate", self.base_url_trimmed())
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    pub fn generate_timeout(&self) -> Duration {
        Duration::from_secs(self.generate_timeout_secs)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            // 5 minute budget for model load.
            timeout: Duration::from_secs(300),
            interval: Duration::from_secs(5),
        }
    }
}

impl PollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(secs) = env::var("SDPROBE_POLL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env::var("SDPROBE_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.interval = Duration::from_secs(secs);
        }

        config
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}
