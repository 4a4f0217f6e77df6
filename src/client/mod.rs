pub mod generation;
pub mod health;

use crate::{
    config::ServerConfig,
    error::{ProbeError, Result},
};
use reqwest::Client;

pub use generation::GenerationClient;
pub use health::{HealthClient, PollOutcome};

/// Facade over one generation server: a shared HTTP client handed to the
/// health and generation sub-clients.
#[derive(Clone)]
pub struct GenServerClient {
    health_client: HealthClient,
    generation_client: GenerationClient,
}

impl GenServerClient {
    pub fn new(config: ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ProbeError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            health_client: HealthClient::new(client.clone(), config.clone()),
            generation_client: GenerationClient::new(client, config),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ServerConfig::from_env())
    }

    pub fn health(&self) -> &HealthClient {
        &self.health_client
    }

    pub fn generation(&self) -> &GenerationClient {
        &self.generation_client
    }
}
