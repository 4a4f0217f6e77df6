use crate::error::{ProbeError, Result};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DATA_URI_MARKER: &str = ";base64,";
const PNG_MAGIC: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];

#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    // Omitted when None so the server applies its own default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            steps: None,
        }
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }
}

/// Successful `/generate` body. The `image` field is either a bare base64
/// payload or a `data:image/<fmt>;base64,<payload>` URI; nothing else in the
/// body is contractually guaranteed.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    pub image: String,
}

impl GenerationResponse {
    /// The base64 payload with any recognized data-URI prefix stripped.
    pub fn payload(&self) -> &str {
        match self.split_data_uri() {
            Some((_, payload)) => payload,
            None => &self.image,
        }
    }

    /// Image format declared by the data-URI prefix, e.g. `png`.
    pub fn image_format(&self) -> Option<&str> {
        self.split_data_uri().map(|(format, _)| format)
    }

    fn split_data_uri(&self) -> Option<(&str, &str)> {
        let rest = self.image.strip_prefix("data:image/")?;
        let marker = rest.find(DATA_URI_MARKER)?;
        Some((&rest[..marker], &rest[marker + DATA_URI_MARKER.len()..]))
    }

    pub fn decode(&self) -> Result<DecodedImage> {
        let payload = self.payload();
        if payload.is_empty() {
            return Err(ProbeError::ResponseError(
                "image field is empty".to_string(),
            ));
        }

        let bytes = general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| ProbeError::DecodeError(format!("invalid base64 image: {}", e)))?;

        Ok(DecodedImage {
            bytes,
            format: self.image_format().map(String::from),
        })
    }
}

/// Decoded image bytes plus the format declared by the data URI, if any.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub format: Option<String>,
}

impl DecodedImage {
    pub fn is_png(&self) -> bool {
        self.bytes.starts_with(&PNG_MAGIC)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), &self.bytes).map_err(|e| {
            ProbeError::IoError(format!(
                "failed to write {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }
}
