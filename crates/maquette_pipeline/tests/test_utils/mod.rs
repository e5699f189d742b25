//! Shared test helpers: a scripted mock image driver.

use async_trait::async_trait;
use maquette_core::ImageSize;
use maquette_error::{MaquetteResult, ProviderError, ProviderErrorKind};
use maquette_providers::{GeneratedImage, ImageDriver};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Minimal PNG-ish payload; the pipeline never inspects image bytes.
pub const FAKE_PNG: &[u8] = &[0x89, b'P', b'N', b'G'];

/// Mock driver recording every prompt it receives.
///
/// `fail_after(n)` makes the driver return the missing-payload error once
/// `n` calls have succeeded, which is how the tests exercise mid-run aborts.
pub struct MockImageDriver {
    fail_after: Option<usize>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockImageDriver {
    pub fn new_success() -> Self {
        Self {
            fail_after: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn new_empty() -> Self {
        Self::fail_after(0)
    }

    pub fn fail_after(successes: usize) -> Self {
        Self {
            fail_after: Some(successes),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageDriver for MockImageDriver {
    async fn generate_image(
        &self,
        prompt: &str,
        _size: ImageSize,
    ) -> MaquetteResult<GeneratedImage> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(limit) = self.fail_after {
            if call >= limit {
                return Err(ProviderError::new(ProviderErrorKind::MissingImageData).into());
            }
        }
        Ok(GeneratedImage::new("image/png", FAKE_PNG.to_vec()))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-image-1"
    }
}
