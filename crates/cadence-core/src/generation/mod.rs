//! Clients for the external generative service.
//!
//! The controller only sees the [`PlanGenerator`] and [`ImageGenerator`]
//! traits; [`GeminiClient`] implements both against the Gemini
//! `generateContent` REST endpoint. Each call is a single request with no
//! streaming, no retries and no local timeout beyond the HTTP client's own.
//!
//! - [`prompt`]: system instruction, user prompt and response schema
//! - [`decode`]: strict decoding of the returned plan JSON
//! - [`gemini`]: the HTTP client

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::{
    error::{CadenceError, Result},
    models::{MarketingInput, MarketingPlan},
};

pub mod decode;
pub mod gemini;
pub mod prompt;

pub use gemini::GeminiClient;

/// Turns a marketing input into a complete plan.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Generates one plan with a fresh id and timestamp, or fails.
    ///
    /// Callers validate the input first; implementations may assume the
    /// industry is non-empty.
    async fn generate_plan(&self, input: &MarketingInput) -> Result<MarketingPlan>;
}

/// Turns a short text prompt into one image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage>;
}

/// An image returned inline by the model, still base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    /// Base64 payload exactly as returned
    pub data: String,
}

impl GeneratedImage {
    /// Self-contained URI that can be displayed directly.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decoded image bytes.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.data.trim())
            .map_err(|e| CadenceError::malformed(format!("image payload is not base64: {e}")))
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}
