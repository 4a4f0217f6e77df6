use crate::{
    config::ServerConfig,
    error::{ProbeError, Result},
    models::{DecodedImage, GenerationRequest, GenerationResponse},
};
use reqwest::Client;
use std::path::Path;

#[derive(Clone)]
pub struct GenerationClient {
    client: Client,
    config: ServerConfig,
}

impl GenerationClient {
    pub fn new(client: Client, config: ServerConfig) -> Self {
        Self { client, config }
    }

    /// One POST against `/generate`.
    ///
    /// Single-shot: generation is expensive and not safe to blindly retry, so
    /// a transport fault here is terminal, unlike during health polling. A 200
    /// whose body lacks a usable `image` field is a validation failure carrying
    /// the raw body for diagnosis, not a server failure.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        log::info!(
            "Sending generation request: prompt={:?} steps={:?}",
            request.prompt,
            request.steps
        );

        let response = self
            .client
            .post(self.config.generate_url())
            .timeout(self.config.generate_timeout())
            .json(request)
            .send()
            .await
            .map_err(|e| ProbeError::TransportError(format!("generate request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProbeError::TransportError(format!("failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(ProbeError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerationResponse = serde_json::from_str(&body).map_err(|_| {
            ProbeError::ResponseError(format!("no image field in response: {}", body))
        })?;

        if parsed.image.is_empty() {
            return Err(ProbeError::ResponseError(format!(
                "empty image field in response: {}",
                body
            )));
        }

        Ok(parsed)
    }

    /// Generate, decode, and persist the image to `path`.
    pub async fn generate_to_file(
        &self,
        request: &GenerationRequest,
        path: impl AsRef<Path>,
    ) -> Result<DecodedImage> {
        let response = self.generate(request).await?;
        let image = response.decode()?;
        image.save(&path)?;

        log::info!(
            "Saved {} byte image to {}",
            image.len(),
            path.as_ref().display()
        );
        Ok(image)
    }
}
