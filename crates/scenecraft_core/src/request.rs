//! Requests handed to the generation engines.

use serde::{Deserialize, Serialize};

/// A structured-output text generation request.
///
/// # Examples
///
/// ```
/// use scenecraft_core::TextRequest;
/// use serde_json::json;
///
/// let request = TextRequest::builder()
///     .system_instruction("You are a screenwriter.")
///     .user_query("Write a script about a storm.")
///     .schema(json!({"type": "OBJECT"}))
///     .build()
///     .unwrap();
///
/// assert!(request.model().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct TextRequest {
    /// Rules the engine must follow
    system_instruction: String,
    /// The task itself
    user_query: String,
    /// Response schema in the engine's OpenAPI subset
    schema: serde_json::Value,
    /// Model override; the engine default is used when absent
    #[builder(default)]
    model: Option<String>,
}

impl TextRequest {
    /// Create a new builder.
    pub fn builder() -> TextRequestBuilder {
        TextRequestBuilder::default()
    }
}

impl TextRequestBuilder {
    /// Build the TextRequest.
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing.
    pub fn build(&self) -> Result<TextRequest, String> {
        self.build_internal().map_err(|e| e.to_string())
    }
}

/// An image generation request.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct ImageRequest {
    /// Image prompt
    prompt: String,
    /// Aspect ratio such as `16:9`
    #[builder(default = "\"16:9\".to_string()")]
    aspect_ratio: String,
    /// Number of images to request
    #[builder(default = "1")]
    count: u32,
    /// Model override; the engine default is used when absent
    #[builder(default)]
    model: Option<String>,
}

impl ImageRequest {
    /// Create a new builder.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}

impl ImageRequestBuilder {
    /// Build the ImageRequest.
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing.
    pub fn build(&self) -> Result<ImageRequest, String> {
        self.build_internal().map_err(|e| e.to_string())
    }
}
