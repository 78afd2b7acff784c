//! Engine capability traits.

use async_trait::async_trait;
use scenecraft_core::{ApiKey, GeneratedImage, ImageRequest, TextRequest};
use scenecraft_error::EngineResult;

/// Structured-output text generation.
///
/// The credential is passed on every call so that a key saved or cleared
/// between calls takes effect immediately.
#[async_trait]
pub trait TextEngine: Send + Sync {
    /// Generate text conforming to `req.schema()`.
    ///
    /// Returns the raw text body produced by the model; parsing and
    /// validation belong to the caller.
    async fn generate_text(&self, key: &ApiKey, req: &TextRequest) -> EngineResult<String>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default text model identifier.
    fn model_name(&self) -> &str;
}

/// Image generation.
#[async_trait]
pub trait ImageEngine: Send + Sync {
    /// Generate up to `req.count()` images. An empty list is a valid answer.
    async fn generate_images(
        &self,
        key: &ApiKey,
        req: &ImageRequest,
    ) -> EngineResult<Vec<GeneratedImage>>;

    /// Default image model identifier.
    fn image_model_name(&self) -> &str;
}
