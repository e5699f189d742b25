//! Backend selection and credential resolution.
//!
//! The active backend is chosen exactly once, when settings are loaded, and
//! the resulting driver is threaded into the pipeline. The credential for the
//! signed backend is a tagged choice: a request-signing key pair or a
//! pre-issued bearer key, never both at the same time.

use crate::{ImageDriver, OpenAiImagesClient, VolcImageClient};
use maquette_error::{ConfigError, MaquetteResult, ProviderError, ProviderErrorKind};
use tracing::debug;

const DEFAULT_OPENAI_MODEL: &str = "gpt-image-1";
const DEFAULT_VOLC_REQ_KEY: &str = "high_aes_general_v21_L";
const DEFAULT_VOLC_REGION: &str = "cn-north-1";

/// Which image generation backend to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BackendKind {
    /// OpenAI Images API
    #[display("openai")]
    OpenAi,
    /// Volcano-style signed visual API
    #[display("volc")]
    Volc,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(BackendKind::OpenAi),
            "volc" => Ok(BackendKind::Volc),
            _ => Err(format!("Unknown image backend: {}", s)),
        }
    }
}

/// How a backend call authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Key pair for canonical-request signing
    Signed {
        /// Access key identifier placed in the credential scope
        access_key: String,
        /// Secret key the signing key chain is derived from
        secret_key: String,
    },
    /// Single pre-issued API key sent as a bearer token
    Bearer {
        /// The API key
        api_key: String,
    },
}

/// Backend configuration resolved once at process start.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ProviderSettings {
    /// Selected backend
    backend: BackendKind,
    /// Model or task identifier
    model: String,
    /// Region for the credential scope (signed backend only)
    region: Option<String>,
    /// Resolved credential
    credential: Credential,
}

impl ProviderSettings {
    /// Settings for the OpenAI Images backend.
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            backend: BackendKind::OpenAi,
            model: model.into(),
            region: None,
            credential: Credential::Bearer {
                api_key: api_key.into(),
            },
        }
    }

    /// Settings for the signed visual API backend.
    pub fn volc(credential: Credential, region: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            backend: BackendKind::Volc,
            model: model.into(),
            region: Some(region.into()),
            credential,
        }
    }

    /// Resolve settings from the environment.
    ///
    /// `MAQUETTE_IMAGE_BACKEND` selects the backend (default `openai`) and
    /// `MAQUETTE_IMAGE_MODEL` overrides the backend's default model. The
    /// visual API credential prefers a pre-issued `VOLC_API_KEY`; otherwise
    /// `VOLC_ACCESS_KEY` and `VOLC_SECRET_KEY` select the signing path.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend label is unknown or no usable
    /// credential is configured for the selected backend.
    pub fn from_env() -> MaquetteResult<Self> {
        let backend = match std::env::var("MAQUETTE_IMAGE_BACKEND") {
            Ok(label) => label
                .parse::<BackendKind>()
                .map_err(ConfigError::new)?,
            Err(_) => BackendKind::OpenAi,
        };

        let settings = match backend {
            BackendKind::OpenAi => {
                let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
                    ConfigError::new("OPENAI_API_KEY not set")
                })?;
                let model = std::env::var("MAQUETTE_IMAGE_MODEL")
                    .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string());
                Self::openai(api_key, model)
            }
            BackendKind::Volc => {
                let credential = resolve_volc_credential()?;
                let region = std::env::var("VOLC_REGION")
                    .unwrap_or_else(|_| DEFAULT_VOLC_REGION.to_string());
                let model = std::env::var("MAQUETTE_IMAGE_MODEL")
                    .unwrap_or_else(|_| DEFAULT_VOLC_REQ_KEY.to_string());
                Self::volc(credential, region, model)
            }
        };

        debug!(backend = %settings.backend, model = %settings.model, "Resolved provider settings");
        Ok(settings)
    }

    /// Build the driver for these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential shape does not fit the backend
    /// (the OpenAI backend only takes a bearer key).
    pub fn build_driver(&self) -> MaquetteResult<Box<dyn ImageDriver>> {
        match self.backend {
            BackendKind::OpenAi => match &self.credential {
                Credential::Bearer { api_key } => Ok(Box::new(OpenAiImagesClient::with_api_key(
                    api_key.clone(),
                    self.model.clone(),
                ))),
                Credential::Signed { .. } => Err(ProviderError::new(
                    ProviderErrorKind::Credential(
                        "OpenAI backend requires a bearer API key".to_string(),
                    ),
                )
                .into()),
            },
            BackendKind::Volc => {
                let region = self
                    .region
                    .clone()
                    .unwrap_or_else(|| DEFAULT_VOLC_REGION.to_string());
                Ok(Box::new(VolcImageClient::new(
                    self.credential.clone(),
                    region,
                    self.model.clone(),
                )))
            }
        }
    }
}

fn resolve_volc_credential() -> MaquetteResult<Credential> {
    if let Ok(api_key) = std::env::var("VOLC_API_KEY") {
        return Ok(Credential::Bearer { api_key });
    }
    match (
        std::env::var("VOLC_ACCESS_KEY"),
        std::env::var("VOLC_SECRET_KEY"),
    ) {
        (Ok(access_key), Ok(secret_key)) => Ok(Credential::Signed {
            access_key,
            secret_key,
        }),
        _ => Err(ProviderError::new(ProviderErrorKind::Credential(
            "set VOLC_API_KEY, or both VOLC_ACCESS_KEY and VOLC_SECRET_KEY".to_string(),
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_labels_round_trip() {
        for kind in [BackendKind::OpenAi, BackendKind::Volc] {
            assert_eq!(kind.to_string().parse::<BackendKind>().unwrap(), kind);
        }
        assert!("dall-e".parse::<BackendKind>().is_err());
    }

    #[test]
    fn openai_settings_build_a_driver() {
        let settings = ProviderSettings::openai("test-key", "gpt-image-1");
        let driver = settings.build_driver().unwrap();
        assert_eq!(driver.provider_name(), "openai");
        assert_eq!(driver.model_name(), "gpt-image-1");
    }

    #[test]
    fn volc_settings_accept_either_credential_shape() {
        for credential in [
            Credential::Bearer {
                api_key: "key".to_string(),
            },
            Credential::Signed {
                access_key: "ak".to_string(),
                secret_key: "sk".to_string(),
            },
        ] {
            let settings =
                ProviderSettings::volc(credential, "cn-north-1", "high_aes_general_v21_L");
            let driver = settings.build_driver().unwrap();
            assert_eq!(driver.provider_name(), "volc");
        }
    }

    #[test]
    fn openai_rejects_a_signing_key_pair() {
        let settings = ProviderSettings {
            backend: BackendKind::OpenAi,
            model: "gpt-image-1".to_string(),
            region: None,
            credential: Credential::Signed {
                access_key: "ak".to_string(),
                secret_key: "sk".to_string(),
            },
        };
        assert!(settings.build_driver().is_err());
    }
}
