//! Wire types for the Images API.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/images/generations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagesRequest<'a> {
    /// Model identifier
    pub model: &'a str,
    /// Final assembled prompt
    pub prompt: &'a str,
    /// Image count, always 1 in this pipeline
    pub n: u8,
    /// Size bucket in `WxH` form
    pub size: &'a str,
    /// Fixed to `b64_json` so the payload arrives inline
    pub response_format: &'a str,
}

/// Response body for `POST /v1/images/generations`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesResponse {
    /// Generated images; may legitimately be empty
    #[serde(default)]
    pub data: Vec<ImageDatum>,
}

/// One generated image entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageDatum {
    /// Base64-encoded PNG bytes
    #[serde(default)]
    pub b64_json: Option<String>,
}
