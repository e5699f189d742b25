//! Visual API client with signed or bearer credentials.

use crate::volc::signing::{SigningRequest, sign_request};
use crate::volc::{VisualRequest, VisualResponse};
use crate::{Credential, GeneratedImage, ImageDriver};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use maquette_core::ImageSize;
use maquette_error::{MaquetteResult, ProviderError, ProviderErrorKind};
use reqwest::Client;
use tracing::{debug, error, instrument};

const DEFAULT_HOST: &str = "visual.volcengineapi.com";
const SERVICE: &str = "cv";
const ACTION_QUERY: &str = "Action=CVProcess&Version=2022-08-31";
const CONTENT_TYPE: &str = "application/json";

/// Visual API client.
///
/// The credential is a tagged choice made once at construction: either a key
/// pair for request signing or a pre-issued bearer key, never both.
#[derive(Debug, Clone)]
pub struct VolcImageClient {
    client: Client,
    host: String,
    region: String,
    req_key: String,
    credential: Credential,
}

impl VolcImageClient {
    /// Creates a new client bound to a region and task type.
    #[instrument(skip(credential), fields(region = %region, req_key = %req_key))]
    pub fn new(credential: Credential, region: String, req_key: String) -> Self {
        debug!("Created visual API client");
        Self {
            client: Client::new(),
            host: DEFAULT_HOST.to_string(),
            region,
            req_key,
            credential,
        }
    }

    /// Override the API host (regional endpoints, tests).
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }
}

#[async_trait]
impl ImageDriver for VolcImageClient {
    #[instrument(skip(self, prompt), fields(req_key = %self.req_key, size = %size))]
    async fn generate_image(
        &self,
        prompt: &str,
        size: ImageSize,
    ) -> MaquetteResult<GeneratedImage> {
        let body = VisualRequest {
            req_key: &self.req_key,
            prompt,
            width: size.width(),
            height: size.height(),
            return_url: false,
            image_num: 1,
        };
        let payload = serde_json::to_vec(&body).map_err(|e| {
            ProviderError::new(ProviderErrorKind::Encoding(format!(
                "Failed to encode request body: {}",
                e
            )))
        })?;

        let url = format!("https://{}/?{}", self.host, ACTION_QUERY);
        debug!(url = %url, prompt_len = prompt.len(), "Sending visual API request");

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", CONTENT_TYPE);

        match &self.credential {
            Credential::Signed {
                access_key,
                secret_key,
            } => {
                let signing = SigningRequest {
                    method: "POST",
                    path: "/",
                    query: ACTION_QUERY,
                    host: &self.host,
                    content_type: CONTENT_TYPE,
                    region: &self.region,
                    service: SERVICE,
                    payload: &payload,
                    timestamp: Utc::now(),
                };
                let headers = sign_request(&signing, access_key, secret_key)?;
                request = request
                    .header("X-Date", &headers.x_date)
                    .header("X-Content-Sha256", &headers.x_content_sha256)
                    .header("Authorization", &headers.authorization);
            }
            Credential::Bearer { api_key } => {
                request = request.bearer_auth(api_key);
            }
        }

        let response = request.body(payload).send().await.map_err(|e| {
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

        let parsed: VisualResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::InvalidResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        let encoded = parsed
            .data
            .and_then(|data| data.binary_data_base64.into_iter().next());
        let encoded = match encoded {
            Some(encoded) => encoded,
            None => {
                return Err(match parsed.message {
                    Some(message) => ProviderError::new(ProviderErrorKind::InvalidResponse(
                        format!("Provider reported: {}", message),
                    )),
                    None => ProviderError::new(ProviderErrorKind::MissingImageData),
                }
                .into());
            }
        };

        let data = STANDARD.decode(encoded.as_bytes()).map_err(|e| {
            ProviderError::new(ProviderErrorKind::InvalidResponse(format!(
                "Failed to base64-decode image: {}",
                e
            )))
        })?;

        debug!(bytes = data.len(), code = ?parsed.code, "Decoded generated image");
        Ok(GeneratedImage::new("image/png", data))
    }

    fn provider_name(&self) -> &'static str {
        "volc"
    }

    fn model_name(&self) -> &str {
        &self.req_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_maps_size_to_dimensions() {
        let body = VisualRequest {
            req_key: "high_aes_general_v21_L",
            prompt: "a red cube",
            width: ImageSize::Square256.width(),
            height: ImageSize::Square256.height(),
            return_url: false,
            image_num: 1,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["width"], 256);
        assert_eq!(json["height"], 256);
        assert_eq!(json["image_num"], 1);
        assert_eq!(json["return_url"], false);
    }

    #[test]
    fn empty_payload_parses_without_data_field() {
        let parsed: VisualResponse =
            serde_json::from_str(r#"{"code": 10000, "message": "quota exceeded"}"#).unwrap();
        assert!(parsed.data.is_none());
        assert_eq!(parsed.message.as_deref(), Some("quota exceeded"));
    }
}
