//! Images API client using reqwest.

use crate::openai::{ImagesRequest, ImagesResponse};
use crate::{GeneratedImage, ImageDriver};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use maquette_core::ImageSize;
use maquette_error::{MaquetteResult, ProviderError, ProviderErrorKind};
use reqwest::Client;
use tracing::{debug, error, instrument};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI Images API client.
#[derive(Debug, Clone)]
pub struct OpenAiImagesClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiImagesClient {
    /// Creates a new client, reading the API key from `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not set in the environment.
    #[instrument(skip_all, fields(model = %model))]
    pub fn new(model: String) -> MaquetteResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|e| {
            ProviderError::new(ProviderErrorKind::Credential(format!(
                "OPENAI_API_KEY not set: {}",
                e
            )))
        })?;
        Ok(Self::with_api_key(api_key, model))
    }

    /// Creates a new client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
        }
    }

    /// Override the base URL (self-hosted gateways, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ImageDriver for OpenAiImagesClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, size = %size))]
    async fn generate_image(
        &self,
        prompt: &str,
        size: ImageSize,
    ) -> MaquetteResult<GeneratedImage> {
        let request = ImagesRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: size.as_str(),
            response_format: "b64_json",
        };

        let url = format!("{}/images/generations", self.base_url);
        debug!(url = %url, prompt_len = prompt.len(), "Sending image generation request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                ProviderError::new(ProviderErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_text, "API error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message: error_text,
            })
            .into());
        }

        let parsed: ImagesResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::InvalidResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        let encoded = parsed
            .data
            .into_iter()
            .next()
            .and_then(|datum| datum.b64_json)
            .ok_or_else(|| ProviderError::new(ProviderErrorKind::MissingImageData))?;

        let data = STANDARD.decode(encoded.as_bytes()).map_err(|e| {
            ProviderError::new(ProviderErrorKind::InvalidResponse(format!(
                "Failed to base64-decode image: {}",
                e
            )))
        })?;

        debug!(bytes = data.len(), "Decoded generated image");
        Ok(GeneratedImage::new("image/png", data))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_pins_count_and_format() {
        let request = ImagesRequest {
            model: "gpt-image-1",
            prompt: "a red cube",
            n: 1,
            size: ImageSize::Square512.as_str(),
            response_format: "b64_json",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["n"], 1);
        assert_eq!(json["size"], "512x512");
        assert_eq!(json["response_format"], "b64_json");
    }

    #[test]
    fn missing_payload_is_the_fixed_error() {
        let err = ProviderError::new(ProviderErrorKind::MissingImageData);
        assert!(err.to_string().contains("No image data returned"));
    }
}
