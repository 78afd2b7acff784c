//! Gemini client configuration.

use serde::{Deserialize, Serialize};

/// Gemini endpoint, model and retry settings.
///
/// Retry values left unset fall back to per-error defaults from
/// [`RetryableError::retry_strategy_params`](scenecraft_error::RetryableError::retry_strategy_params).
/// `max_retries = 0` disables retrying.
///
/// # Examples
///
/// ```
/// use scenecraft_models::GeminiConfig;
///
/// let config: GeminiConfig = serde_json::from_str(r#"{"text_model": "gemini-2.5-flash"}"#).unwrap();
/// assert_eq!(config.text_model(), "gemini-2.5-flash");
/// assert_eq!(config.image_model(), "imagen-4.0-generate-001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct GeminiConfig {
    /// REST base URL, without a trailing `/models`
    base_url: String,
    /// Model used for script and SEO generation
    text_model: String,
    /// Imagen model used for concept images
    image_model: String,
    /// Retry attempts after the first failure
    max_retries: Option<usize>,
    /// First backoff delay in milliseconds
    initial_backoff_ms: Option<u64>,
    /// Upper bound on a single backoff delay in seconds
    max_backoff_secs: Option<u64>,
    /// Per-request timeout in seconds
    request_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-2.5-pro".to_string(),
            image_model: "imagen-4.0-generate-001".to_string(),
            max_retries: None,
            initial_backoff_ms: None,
            max_backoff_secs: None,
            request_timeout_secs: 300,
        }
    }
}

impl GeminiConfig {
    /// Point the client at a different base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Disable retries entirely.
    pub fn without_retries(mut self) -> Self {
        self.max_retries = Some(0);
        self
    }
}
