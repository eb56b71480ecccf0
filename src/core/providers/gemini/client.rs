//! Gemini client
//!
//! `generateContent` calls against Google AI Studio with image output
//! enabled. The key travels in the `x-goog-api-key` header, never in the URL.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::prompts;
use crate::core::providers::unified_provider::ProviderError;
use crate::core::traits::ImageGenerator;
use crate::core::types::{GenerationResult, ImagePayload};
use crate::utils::mask_api_key;

use super::config::GeminiConfig;
use super::error::{
    GeminiErrorMapper, gemini_config_error, gemini_network_error, gemini_no_image_error,
    gemini_parse_error, gemini_safety_error, gemini_timeout_error,
};

const API_KEY_HEADER: &str = "x-goog-api-key";
const GENERATE_CONTENT: &str = "generateContent";
const SAFETY_REASONS: [&str; 4] = ["SAFETY", "IMAGE_SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<&'static str>,
}

/// One request part: an instruction or an inline image
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64, standard alphabet
    pub data: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(image: &ImagePayload) -> Self {
        Self::Image {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: general_purpose::STANDARD.encode(&image.bytes),
            },
        }
    }
}

impl GenerateContentRequest {
    /// Single-turn request asking for text and image output
    pub fn new(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_modalities: vec!["TEXT", "IMAGE"],
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
    prompt_feedback: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    #[serde(alias = "inline_data")]
    inline_data: Option<ResponseBlob>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ResponseBlob {
    #[serde(alias = "mime_type")]
    mime_type: Option<String>,
    data: Option<String>,
}

impl ResponseBlob {
    fn decode(self) -> Result<ImagePayload, ProviderError> {
        let data = self
            .data
            .ok_or_else(|| gemini_parse_error("inlineData without data"))?;
        let bytes = general_purpose::STANDARD
            .decode(data.trim())
            .map_err(|e| gemini_parse_error(format!("inlineData is not base64: {}", e)))?;
        if bytes.is_empty() {
            return Err(gemini_no_image_error("inlineData is empty"));
        }
        let mime_type = self.mime_type.unwrap_or_else(|| "image/png".to_string());
        Ok(ImagePayload::new(bytes, mime_type))
    }
}

/// Image and commentary extracted from one response
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiOutput {
    pub image: Option<ImagePayload>,
    pub text: Option<String>,
}

impl GeminiOutput {
    fn into_result(self) -> Result<GenerationResult, ProviderError> {
        let image = self
            .image
            .ok_or_else(|| gemini_no_image_error("response contained no image"))?;
        Ok(GenerationResult::from_image(&image, self.text))
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        config.validate().map_err(gemini_config_error)?;

        let mut builder = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| gemini_config_error(format!("invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let http = builder
            .build()
            .map_err(|e| gemini_network_error(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Run one `generateContent` call
    pub async fn generate(
        &self,
        parts: Vec<Part>,
        credential: &str,
    ) -> Result<GeminiOutput, ProviderError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(gemini_config_error("API key is required"));
        }

        let url = self.config.model_url(GENERATE_CONTENT);
        debug!(url = %url, key = %mask_api_key(credential), "Sending Gemini request");

        let response = self
            .http
            .post(&url)
            .headers(Self::auth_headers(credential)?)
            .json(&GenerateContentRequest::new(parts))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        debug!(status = %status, bytes = body.len(), "Gemini response received");

        if !status.is_success() {
            let error = GeminiErrorMapper::from_http_status(status.as_u16(), &body);
            warn!(status = %status, error = %error, "Gemini request failed");
            return Err(error);
        }

        let json: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| gemini_parse_error(format!("response is not JSON: {}", e)))?;
        Self::extract_output(&json)
    }

    fn auth_headers(credential: &str) -> Result<HeaderMap, ProviderError> {
        let mut key = HeaderValue::from_str(credential)
            .map_err(|_| gemini_config_error("API key contains invalid characters"))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        Ok(headers)
    }

    fn transport_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            gemini_timeout_error(format!(
                "no answer within {}s",
                self.config.timeout.as_secs()
            ))
        } else {
            gemini_network_error(err.to_string())
        }
    }

    /// Pull the first inline image out of a parsed response.
    ///
    /// Text parts of the winning candidate are concatenated into the
    /// commentary. A text-only answer becomes [`ProviderError::NoImage`]
    /// carrying the model's words.
    pub fn extract_output(response: &serde_json::Value) -> Result<GeminiOutput, ProviderError> {
        if response.get("error").is_some() {
            return Err(GeminiErrorMapper::from_api_response(response));
        }

        let parsed = GenerateContentResponse::deserialize(response)
            .map_err(|e| gemini_parse_error(format!("unexpected response shape: {}", e)))?;

        if parsed.candidates.is_empty() {
            return Err(match parsed.prompt_feedback {
                Some(_) => GeminiErrorMapper::from_api_response(response),
                None => gemini_no_image_error("no candidates in response"),
            });
        }

        let mut commentary = None;
        let mut finish_reason = None;

        for candidate in parsed.candidates {
            let parts = candidate.content.map(|c| c.parts).unwrap_or_default();

            let mut text = String::new();
            let mut blob = None;
            for part in parts {
                if let Some(fragment) = part.text {
                    text.push_str(&fragment);
                }
                if blob.is_none() {
                    blob = part.inline_data;
                }
            }
            let text = Some(text).filter(|t| !t.trim().is_empty());

            if let Some(blob) = blob {
                return Ok(GeminiOutput {
                    image: Some(blob.decode()?),
                    text,
                });
            }

            commentary = commentary.or(text);
            finish_reason = finish_reason.or(candidate.finish_reason);
        }

        match finish_reason {
            Some(reason) if SAFETY_REASONS.contains(&reason.as_str()) => {
                Err(gemini_safety_error(reason))
            }
            _ => Err(gemini_no_image_error(
                commentary.unwrap_or_else(|| "response contained no image".to_string()),
            )),
        }
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn text_to_image(
        &self,
        prompt: &str,
        credential: &str,
    ) -> Result<ImagePayload, ProviderError> {
        info!(model = %self.config.image_model, "Generating source image");
        self.generate(vec![Part::text(prompt)], credential)
            .await?
            .image
            .ok_or_else(|| gemini_no_image_error("response contained no image"))
    }

    async fn outpaint(
        &self,
        template: &ImagePayload,
        prompt: &str,
        credential: &str,
    ) -> Result<GenerationResult, ProviderError> {
        info!(
            model = %self.config.image_model,
            template_bytes = template.len(),
            "Requesting outpaint"
        );
        let parts = vec![Part::text(prompt), Part::image(template)];
        self.generate(parts, credential).await?.into_result()
    }

    async fn enhance(
        &self,
        image: &ImagePayload,
        credential: &str,
    ) -> Result<GenerationResult, ProviderError> {
        info!(
            model = %self.config.image_model,
            image_bytes = image.len(),
            "Requesting enhance"
        );
        let parts = vec![Part::text(prompts::ENHANCE_PROMPT), Part::image(image)];
        self.generate(parts, credential).await?.into_result()
    }
}
