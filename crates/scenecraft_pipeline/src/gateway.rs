//! Boundary between the pipeline and the opaque generation engines.

use crate::{ImageOptions, RegenerationPrompt, SchemaContract, ScriptPrompt};
use scenecraft_core::{ApiKey, GeneratedImage, ImageRequest, Script, SeoPatch};
use scenecraft_error::{
    EngineError, EngineErrorKind, GenerationError, GenerationErrorKind, GenerationResult,
};
use scenecraft_interface::{ImageEngine, TextEngine};
use scenecraft_storage::CredentialStore;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Map a raw engine failure onto the pipeline taxonomy.
///
/// This is the only place raw engine conditions are inspected.
///
/// # Examples
///
/// ```
/// use scenecraft_error::{EngineError, GenerationErrorKind};
/// use scenecraft_pipeline::normalize;
///
/// let raw = EngineError::from_response(
///     503,
///     r#"{"error":{"code":503,"message":"Overloaded","status":"UNAVAILABLE"}}"#,
/// );
/// let err = normalize(raw);
/// assert!(matches!(err.kind, GenerationErrorKind::EngineOverloaded { .. }));
/// assert!(err.hint().is_some());
///
/// let raw = EngineError::from_response(400, r#"{"error":{"message":"API key not valid"}}"#);
/// assert_eq!(normalize(raw).message(), "API key not valid");
/// ```
#[track_caller]
pub fn normalize(err: EngineError) -> GenerationError {
    let kind = if err.kind.is_overloaded() {
        GenerationErrorKind::EngineOverloaded {
            message: err.message(),
        }
    } else {
        match &err.kind {
            EngineErrorKind::MalformedResponse(reason) => {
                GenerationErrorKind::SchemaViolation(reason.clone())
            }
            _ => GenerationErrorKind::Unknown(err.message()),
        }
    };
    GenerationError::new(kind)
}

/// Credential-checked access to the text and image engines.
///
/// Every operation reads the credential first and fails with
/// `MissingCredential` before touching an engine when none is saved.
#[derive(Clone)]
pub struct GenerationGateway {
    text: Arc<dyn TextEngine>,
    image: Arc<dyn ImageEngine>,
    credentials: Arc<dyn CredentialStore>,
    image_options: ImageOptions,
}

impl std::fmt::Debug for GenerationGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationGateway")
            .field("text_provider", &self.text.provider_name())
            .field("text_model", &self.text.model_name())
            .field("image_model", &self.image.image_model_name())
            .field("image_options", &self.image_options)
            .finish()
    }
}

impl GenerationGateway {
    /// Create a gateway over the given engines and credential store.
    pub fn new(
        text: Arc<dyn TextEngine>,
        image: Arc<dyn ImageEngine>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            text,
            image,
            credentials,
            image_options: ImageOptions::default(),
        }
    }

    /// Use the given image request settings.
    pub fn with_image_options(mut self, image_options: ImageOptions) -> Self {
        self.image_options = image_options;
        self
    }

    /// Credential store backing this gateway.
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Read the saved credential.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` when no key is saved, or `Unknown` if the
    /// store cannot be read.
    pub async fn require_credential(&self) -> GenerationResult<ApiKey> {
        match self.credentials.get().await {
            Ok(Some(key)) => Ok(key),
            Ok(None) => Err(GenerationError::new(GenerationErrorKind::MissingCredential)),
            Err(e) => Err(GenerationError::new(GenerationErrorKind::Unknown(format!(
                "failed to read the saved credential: {}",
                e.kind
            )))),
        }
    }

    /// Generate, extract and validate a full script.
    ///
    /// Schema violations are returned to the caller, never retried here.
    #[instrument(
        skip(self, prompt),
        fields(
            provider = self.text.provider_name(),
            model = self.text.model_name(),
            required_scenes = ?prompt.required_scene_count()
        )
    )]
    pub async fn generate_script(&self, prompt: &ScriptPrompt) -> GenerationResult<Script> {
        let key = self.require_credential().await?;
        let request = prompt.to_request()?;

        let raw = self
            .text
            .generate_text(&key, &request)
            .await
            .map_err(|e| {
                error!(error = %e, "Script generation failed");
                normalize(e)
            })?;
        debug!(response_len = raw.len(), "Received script response");

        let script = SchemaContract::parse_script(&raw)?;
        info!(
            characters = script.characters.len(),
            scenes = script.scenes.len(),
            beats = script.beat_count(),
            "Script generated"
        );
        Ok(script)
    }

    /// Generate the concept image, keeping the first image returned.
    ///
    /// # Errors
    ///
    /// Returns `EmptyResult` when the engine returns no image.
    #[instrument(
        skip(self, prompt),
        fields(model = self.image.image_model_name(), prompt_len = prompt.len())
    )]
    pub async fn generate_image(&self, prompt: &str) -> GenerationResult<GeneratedImage> {
        let key = self.require_credential().await?;
        let request = ImageRequest::builder()
            .prompt(prompt)
            .aspect_ratio(self.image_options.aspect_ratio().clone())
            .count(*self.image_options.count())
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Unknown(e)))?;

        let images = self
            .image
            .generate_images(&key, &request)
            .await
            .map_err(|e| {
                error!(error = %e, "Image generation failed");
                normalize(e)
            })?;

        let image = images
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResult))?;
        info!(mime_type = %image.mime_type(), bytes = image.len(), "Image generated");
        Ok(image)
    }

    /// Generate a single SEO field.
    #[instrument(skip(self, prompt), fields(field = %prompt.field(), model = self.text.model_name()))]
    pub async fn generate_seo_field(&self, prompt: &RegenerationPrompt) -> GenerationResult<SeoPatch> {
        let key = self.require_credential().await?;
        let request = prompt.to_request()?;

        let raw = self
            .text
            .generate_text(&key, &request)
            .await
            .map_err(normalize)?;

        let patch = SchemaContract::parse_patch(*prompt.field(), &raw)?;
        info!(entries = patch.len(), "SEO field regenerated");
        Ok(patch)
    }
}
