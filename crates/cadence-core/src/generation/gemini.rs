//! Gemini `generateContent` client (API key based).

use async_trait::async_trait;
use jiff::Zoned;
use log::{debug, error, info};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{decode, prompt, GeneratedImage, ImageGenerator, PlanGenerator};
use crate::{
    config::{Config, API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL},
    error::{CadenceError, Result},
    models::{MarketingInput, MarketingPlan},
};

const DEFAULT_IMAGE_MIME: &str = "image/png";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> Option<&[Part]> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
    }

    /// Concatenated text of the first candidate.
    fn text(&self) -> String {
        self.first_parts()
            .unwrap_or_default()
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

/// Client for the Gemini REST API.
///
/// The credential is checked before every call, so a client built without
/// one can still be handed to the controller; generation then fails with
/// [`CadenceError::MissingCredential`] and no request is sent.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    /// Creates a client with the default endpoint and models.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| CadenceError::Configuration {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            api_key: api_key
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        })
    }

    /// Creates a client from the loaded configuration.
    ///
    /// A missing credential is not an error here; it is reported when a
    /// request is attempted.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.credential().ok().map(str::to_string);
        Ok(Self::new(api_key)?
            .with_base_url(&config.api_base_url)
            .with_models(&config.text_model, &config.image_model))
    }

    /// Points the client at another host, e.g. a proxy or a test server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_models(mut self, text_model: &str, image_model: &str) -> Self {
        self.text_model = text_model.to_string();
        self.image_model = image_model.to_string();
        self
    }

    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    /// Whether a credential is configured. Says nothing about its validity.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn credential(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| CadenceError::MissingCredential {
                variable: API_KEY_ENV.to_string(),
            })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }

    async fn generate_content(&self, model: &str, body: &Value) -> Result<GenerateContentResponse> {
        let api_key = self.credential()?;

        debug!("Calling {model}:generateContent");
        let resp = self
            .http
            .post(self.endpoint(model))
            .header("content-type", "application/json")
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(envelope) if envelope.error.status.is_empty() => envelope.error.message,
                Ok(envelope) => format!("{} ({})", envelope.error.message, envelope.error.status),
                Err(_) => text,
            };
            error!("{model} rejected the request with HTTP {status}: {message}");
            return Err(CadenceError::service(status.as_u16(), message));
        }

        serde_json::from_str(&text).map_err(|e| {
            error!("{model} returned an unreadable body: {e}");
            CadenceError::malformed(format!("unreadable response envelope: {e}"))
        })
    }

    fn plan_request(input: &MarketingInput) -> Value {
        let start = prompt::next_monday(Zoned::now().date());
        json!({
            "systemInstruction": {
                "parts": [{ "text": prompt::system_instruction(input) }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt::user_prompt(input, start) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": prompt::response_schema()
            }
        })
    }

    fn image_request(text: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": text }]
            }],
            "generationConfig": {
                "responseModalities": ["TEXT", "IMAGE"],
                "imageConfig": { "aspectRatio": "1:1" }
            }
        })
    }
}

#[async_trait]
impl PlanGenerator for GeminiClient {
    async fn generate_plan(&self, input: &MarketingInput) -> Result<MarketingPlan> {
        let body = Self::plan_request(input);
        let response = self.generate_content(&self.text_model, &body).await?;

        let text = response.text();
        if text.trim().is_empty() {
            let reason = response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("none");
            error!("{} returned no text (finish reason: {reason})", self.text_model);
            return Err(CadenceError::EmptyResponse);
        }

        let weeks = decode::decode_weeks(&text).map_err(|e| {
            error!("Plan response failed validation: {e}");
            e
        })?;

        let plan = MarketingPlan::new(input.clone(), weeks);
        info!("Generated plan {} for '{}'", plan.id, plan.title());
        Ok(plan)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_image(&self, description: &str) -> Result<GeneratedImage> {
        if description.trim().is_empty() {
            return Err(CadenceError::invalid_input("imagePrompt").with_reason("Prompt is empty"));
        }

        let body = Self::image_request(&prompt::image_prompt(description));
        let response = self.generate_content(&self.image_model, &body).await?;

        let parts = response
            .first_parts()
            .ok_or_else(|| CadenceError::malformed("response has no candidate content"))?;

        parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
            .map(|inline| GeneratedImage {
                mime_type: inline
                    .mime_type
                    .clone()
                    .filter(|mime| mime.starts_with("image/"))
                    .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
                data: inline.data.clone(),
            })
            .ok_or(CadenceError::NoImageData)
    }
}
