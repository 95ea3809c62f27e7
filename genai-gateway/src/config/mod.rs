use crate::services::providers::gemini::{GeminiConfig, GEMINI_API_BASE};
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Default upload cap (20MB); attachments are buffered in memory.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub models: ModelConfig,
    pub google: GoogleConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model for text generation (e.g., gemini-2.0-flash)
    pub text_model: String,
    /// Provider REST base URL
    pub api_base_url: String,
    /// Provider request timeout; `None` waits indefinitely
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub max_upload_bytes: usize,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(GatewayConfig {
            common: common_config,
            models: ModelConfig {
                text_model: get_env("GENAI_TEXT_MODEL", Some("gemini-2.0-flash"), is_prod)?,
                api_base_url: get_env("GENAI_API_BASE_URL", Some(GEMINI_API_BASE), is_prod)?,
                request_timeout_secs: parse_optional(
                    "GENAI_REQUEST_TIMEOUT_SECS",
                    env::var("GENAI_REQUEST_TIMEOUT_SECS").ok(),
                )?,
            },
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", None, is_prod)?,
            },
            uploads: UploadConfig {
                max_upload_bytes: parse_optional(
                    "GENAI_MAX_UPLOAD_BYTES",
                    env::var("GENAI_MAX_UPLOAD_BYTES").ok(),
                )?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            },
        })
    }

    /// Provider settings derived from this configuration.
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.google.api_key.clone(),
            model: self.models.text_model.clone(),
            base_url: self.models.api_base_url.clone(),
            timeout: self.models.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_optional<T>(key: &str, raw: Option<String>) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} is not valid ({}): {}", key, value, e))
        }),
    }
}
