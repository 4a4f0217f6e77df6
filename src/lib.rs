pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;

pub use client::{GenServerClient, GenerationClient, HealthClient, PollOutcome};
pub use config::{PollConfig, ServerConfig};
pub use error::{ProbeError, Result};
pub use models::{
    DecodedImage, GenerationRequest, GenerationResponse, HealthResponse, HealthStatus,
};
