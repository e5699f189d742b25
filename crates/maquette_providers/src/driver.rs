//! The backend-agnostic image generation contract.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use maquette_core::ImageSize;
use maquette_error::MaquetteResult;

/// One generated image as returned by a backend.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct GeneratedImage {
    /// MIME type of the payload, `image/png` for both current backends
    mime_type: String,
    /// Decoded image bytes
    data: Vec<u8>,
}

impl GeneratedImage {
    /// Create a generated image from decoded bytes.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Re-encode the payload as standard base64 for inline persistence.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

/// Core trait every image generation backend implements.
///
/// Calls are stateless and carry no retry logic: a non-success response or a
/// missing payload is a terminal failure for that call, and the orchestration
/// pipeline decides what it means for the job.
#[async_trait]
pub trait ImageDriver: Send + Sync {
    /// Generate one image for the prompt at the given size bucket.
    async fn generate_image(
        &self,
        prompt: &str,
        size: ImageSize,
    ) -> MaquetteResult<GeneratedImage>;

    /// Provider name (e.g. "openai", "volc").
    fn provider_name(&self) -> &'static str;

    /// Model or task identifier the client is bound to.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl ImageDriver for Box<dyn ImageDriver> {
    async fn generate_image(
        &self,
        prompt: &str,
        size: ImageSize,
    ) -> MaquetteResult<GeneratedImage> {
        (**self).generate_image(prompt, size).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: ImageDriver + ?Sized> ImageDriver for std::sync::Arc<T> {
    async fn generate_image(
        &self,
        prompt: &str,
        size: ImageSize,
    ) -> MaquetteResult<GeneratedImage> {
        (**self).generate_image(prompt, size).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
