//! Gemini REST client implementing the scenecraft engine traits.

use super::GeminiConfig;
use super::dto::{
    GenerateContentRequest, GenerateContentResponse, PredictInstance, PredictParameters,
    PredictRequest, PredictResponse,
};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use scenecraft_core::{ApiKey, GeneratedImage, ImageRequest, TextRequest};
use scenecraft_error::{EngineError, EngineErrorKind, EngineResult, RetryableError};
use scenecraft_interface::{ImageEngine, TextEngine};
use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini client for structured text (Gemini) and images (Imagen).
///
/// The client holds no credential; the key is supplied per call so that the
/// caller's credential store stays the single source of truth.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all, fields(text_model = %config.text_model(), image_model = %config.image_model()))]
    pub fn new(config: GeminiConfig) -> EngineResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(*config.request_timeout_secs()))
            .build()
            .map_err(|e| EngineError::new(EngineErrorKind::ClientCreation(e.to_string())))?;

        Ok(Self { http, config })
    }

    /// Client configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Strip an optional `models/` prefix from a model name.
    fn bare_model(name: &str) -> &str {
        name.strip_prefix("models/").unwrap_or(name)
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.base_url().trim_end_matches('/'),
            Self::bare_model(model),
            method
        )
    }

    /// POST a JSON body and decode a JSON response.
    async fn post_json<B, R>(&self, url: &str, key: &ApiKey, body: &B) -> EngineResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, key.expose())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                let detail = if e.is_timeout() {
                    format!("request timed out: {}", e)
                } else {
                    format!("request failed: {}", e)
                };
                EngineError::new(EngineErrorKind::Transport(detail))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| e.to_string());
        Self::decode_body(status.as_u16(), body)
    }

    /// Turn a status code and body read into a decoded value.
    ///
    /// A body that could not be read is a transport failure, whatever the
    /// status.
    fn decode_body<R: DeserializeOwned>(
        status_code: u16,
        body: Result<String, String>,
    ) -> EngineResult<R> {
        let text = body.map_err(|e| {
            EngineError::new(EngineErrorKind::Transport(format!(
                "failed to read response body: {}",
                e
            )))
        })?;

        if !(200..300).contains(&status_code) {
            return Err(EngineError::from_response(status_code, &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            EngineError::new(EngineErrorKind::MalformedResponse(format!(
                "failed to parse response body: {}",
                e
            )))
        })
    }

    /// Run `attempt`, retrying transient failures with exponential backoff.
    ///
    /// The first failure picks the strategy: permanent errors return at once,
    /// transient ones use their error-specific parameters, overridden by any
    /// values set in [`GeminiConfig`].
    async fn with_retry<T, F, Fut>(&self, operation: &'static str, mut attempt: F) -> EngineResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = EngineResult<T>>,
    {
        use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};

        let first_error = match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !first_error.is_retryable() {
            warn!(operation, error = %first_error, "Permanent engine error, failing immediately");
            return Err(first_error);
        }

        let (mut initial_ms, mut max_retries, mut max_delay_secs) =
            first_error.retry_strategy_params();
        if let Some(override_backoff) = self.config.initial_backoff_ms() {
            initial_ms = *override_backoff;
        }
        if let Some(override_retries) = self.config.max_retries() {
            max_retries = *override_retries;
        }
        if let Some(override_delay) = self.config.max_backoff_secs() {
            max_delay_secs = *override_delay;
        }

        if max_retries == 0 {
            return Err(first_error);
        }

        info!(
            operation,
            error = %first_error,
            initial_backoff_ms = initial_ms,
            max_retries,
            max_delay_secs,
            "Engine call failed, will retry with configured strategy"
        );

        let retry_strategy = ExponentialBackoff::from_millis(initial_ms)
            .factor(2)
            .max_delay(Duration::from_secs(max_delay_secs))
            .map(jitter)
            .take(max_retries);

        Retry::spawn(retry_strategy, || {
            let next = attempt();
            async move {
                match next.await {
                    Ok(value) => Ok(value),
                    Err(e) if e.is_retryable() => {
                        warn!(operation, error = %e, "Engine call failed, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => {
                        warn!(operation, error = %e, "Permanent engine error, failing immediately");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await
    }

    fn decode_images(response: PredictResponse) -> EngineResult<Vec<GeneratedImage>> {
        response
            .predictions
            .into_iter()
            .filter_map(|p| {
                let mime_type = p.mime_type.unwrap_or_else(|| "image/png".to_string());
                p.bytes_base64_encoded.map(|encoded| (mime_type, encoded))
            })
            .map(|(mime_type, encoded)| {
                STANDARD
                    .decode(encoded.as_bytes())
                    .map(|bytes| GeneratedImage::new(mime_type, bytes))
                    .map_err(|e| {
                        EngineError::new(EngineErrorKind::MalformedResponse(format!(
                            "invalid base64 image payload: {}",
                            e
                        )))
                    })
            })
            .collect()
    }
}

#[async_trait]
impl TextEngine for GeminiClient {
    #[instrument(
        skip(self, key, req),
        fields(
            model = tracing::field::Empty,
            system_len = req.system_instruction().len(),
            query_len = req.user_query().len()
        )
    )]
    async fn generate_text(&self, key: &ApiKey, req: &TextRequest) -> EngineResult<String> {
        let model = req
            .model()
            .as_deref()
            .unwrap_or(self.config.text_model().as_str());
        tracing::Span::current().record("model", model);

        let url = self.endpoint(model, "generateContent");
        let body = GenerateContentRequest::structured(
            req.system_instruction(),
            req.user_query(),
            req.schema(),
        );
        debug!(url = %url, "Sending Gemini generateContent request");

        let response: GenerateContentResponse = self
            .with_retry("generate_content", || self.post_json(&url, key, &body))
            .await?;

        let text = response
            .into_text()
            .map_err(|reason| EngineError::new(EngineErrorKind::MalformedResponse(reason)))?;

        debug!(response_len = text.len(), "Received Gemini response");
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        self.config.text_model()
    }
}

#[async_trait]
impl ImageEngine for GeminiClient {
    #[instrument(
        skip(self, key, req),
        fields(model = tracing::field::Empty, prompt_len = req.prompt().len(), count = *req.count())
    )]
    async fn generate_images(
        &self,
        key: &ApiKey,
        req: &ImageRequest,
    ) -> EngineResult<Vec<GeneratedImage>> {
        let model = req
            .model()
            .as_deref()
            .unwrap_or(self.config.image_model().as_str());
        tracing::Span::current().record("model", model);

        let url = self.endpoint(model, "predict");
        let body = PredictRequest {
            instances: vec![PredictInstance {
                prompt: req.prompt().clone(),
            }],
            parameters: PredictParameters {
                sample_count: *req.count(),
                aspect_ratio: req.aspect_ratio().clone(),
            },
        };
        debug!(url = %url, "Sending Imagen predict request");

        let response: PredictResponse = self
            .with_retry("predict", || self.post_json(&url, key, &body))
            .await?;

        let images = Self::decode_images(response)?;
        debug!(images = images.len(), "Received Imagen response");
        Ok(images)
    }

    fn image_model_name(&self) -> &str {
        self.config.image_model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_strips_models_prefix() {
        let client = GeminiClient::new(GeminiConfig::default().with_base_url("http://localhost/v1/"))
            .expect("client");
        assert_eq!(
            client.endpoint("models/gemini-2.5-pro", "generateContent"),
            "http://localhost/v1/models/gemini-2.5-pro:generateContent"
        );
        assert_eq!(
            client.endpoint("imagen-4.0-generate-001", "predict"),
            "http://localhost/v1/models/imagen-4.0-generate-001:predict"
        );
    }

    #[test]
    fn test_filtered_predictions_are_skipped() {
        let response: PredictResponse = serde_json::from_value(json!({
            "predictions": [
                {"bytesBase64Encoded": "iVBORw==", "mimeType": "image/png"},
                {"raiFilteredReason": "blocked"}
            ]
        }))
        .expect("deserialize");

        let images = GeminiClient::decode_images(response).expect("decode");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].data(), &vec![0x89, 0x50, 0x4e, 0x47]);
    }

    #[test]
    fn test_invalid_base64_is_malformed() {
        let response: PredictResponse = serde_json::from_value(json!({
            "predictions": [{"bytesBase64Encoded": "***"}]
        }))
        .expect("deserialize");

        let err = GeminiClient::decode_images(response).expect_err("invalid");
        assert!(matches!(err.kind, EngineErrorKind::MalformedResponse(_)));
    }

    #[test]
    fn test_unreadable_body_is_transport_error() {
        let err = GeminiClient::decode_body::<serde_json::Value>(
            200,
            Err("connection closed before message completed".to_string()),
        )
        .expect_err("unreadable");

        assert!(matches!(err.kind, EngineErrorKind::Transport(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_unparseable_success_body_is_malformed() {
        let err = GeminiClient::decode_body::<serde_json::Value>(200, Ok("<html>".to_string()))
            .expect_err("unparseable");
        assert!(matches!(err.kind, EngineErrorKind::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_body_read_failure_is_retried() {
        let config: GeminiConfig = serde_json::from_value(json!({
            "max_retries": 2,
            "initial_backoff_ms": 1,
            "max_backoff_secs": 1
        }))
        .expect("config");
        let client = GeminiClient::new(config).expect("client");
        let calls = std::sync::atomic::AtomicUsize::new(0);

        let result: EngineResult<serde_json::Value> = client
            .with_retry("test", || {
                let n = calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                async move {
                    if n == 0 {
                        GeminiClient::decode_body(200, Err("connection reset".to_string()))
                    } else {
                        GeminiClient::decode_body(200, Ok("{\"ok\": true}".to_string()))
                    }
                }
            })
            .await;

        assert_eq!(result.expect("retried"), json!({"ok": true}));
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let client = GeminiClient::new(GeminiConfig::default()).expect("client");
        let calls = std::sync::atomic::AtomicUsize::new(0);

        let result: EngineResult<()> = client
            .with_retry("test", || {
                calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                async { Err(EngineError::from_response(400, "bad request")) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_error_is_retried_until_success() {
        let config: GeminiConfig = serde_json::from_value(json!({
            "max_retries": 3,
            "initial_backoff_ms": 1,
            "max_backoff_secs": 1
        }))
        .expect("config");
        let client = GeminiClient::new(config).expect("client");
        let calls = std::sync::atomic::AtomicUsize::new(0);

        let result = client
            .with_retry("test", || {
                let n = calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(EngineError::from_response(503, "busy"))
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.expect("eventual success"), 2);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3);
    }
}
