//! Wire types for the visual API.

use serde::{Deserialize, Serialize};

/// Request body for the text-to-image task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualRequest<'a> {
    /// Task type identifier the endpoint dispatches on
    pub req_key: &'a str,
    /// Final assembled prompt
    pub prompt: &'a str,
    /// Output width in pixels
    pub width: i32,
    /// Output height in pixels
    pub height: i32,
    /// Inline payloads only; no hosted URLs
    pub return_url: bool,
    /// Image count, always 1 in this pipeline
    pub image_num: u8,
}

/// Response envelope for the visual API.
#[derive(Debug, Clone, Deserialize)]
pub struct VisualResponse {
    /// Provider status code
    pub code: Option<i64>,
    /// Error description when the payload is absent
    pub message: Option<String>,
    /// Payload container
    #[serde(default)]
    pub data: Option<VisualData>,
}

/// Payload container carrying the generated images.
#[derive(Debug, Clone, Deserialize)]
pub struct VisualData {
    /// Base64-encoded images
    #[serde(default)]
    pub binary_data_base64: Vec<String>,
}
