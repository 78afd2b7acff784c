//! Concurrent image and script generation with partial-failure results.

use crate::contract::{ContractRules, check_script};
use crate::{GenerationGateway, PipelineConfig, PromptBuilder, ScriptPrompt};
use scenecraft_core::{GeneratedImage, LengthMode, Script, StoryInputs};
use scenecraft_error::{GenerationErrorKind, GenerationResult};
use tracing::{info, instrument, warn};

/// Settled outcome of both generation tasks.
///
/// Each side succeeds or fails on its own; neither failure hides the other.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Concept image result
    pub image: GenerationResult<GeneratedImage>,
    /// Script result
    pub script: GenerationResult<Script>,
}

impl GenerationOutcome {
    /// Whether both tasks succeeded.
    pub fn is_complete(&self) -> bool {
        self.image.is_ok() && self.script.is_ok()
    }
}

/// Runs image and script generation side by side.
#[derive(Debug, Clone)]
pub struct ScriptOrchestrator {
    gateway: GenerationGateway,
    prompts: PromptBuilder,
    rules: ContractRules,
    attempts: usize,
}

impl ScriptOrchestrator {
    /// Create an orchestrator with default pipeline settings.
    pub fn new(gateway: GenerationGateway) -> Self {
        Self::with_config(gateway, PipelineConfig::default())
    }

    /// Create an orchestrator with the given pipeline settings.
    pub fn with_config(gateway: GenerationGateway, config: PipelineConfig) -> Self {
        Self {
            gateway,
            rules: ContractRules::from(&config),
            attempts: (*config.generation_attempts()).max(1),
            prompts: PromptBuilder::from_config(config),
        }
    }

    /// Gateway used by this orchestrator.
    pub fn gateway(&self) -> &GenerationGateway {
        &self.gateway
    }

    /// Generate the concept image and the script concurrently.
    ///
    /// A missing credential or invalid input fails here, before either task
    /// starts. After that, both tasks always run to completion and their
    /// outcomes are returned side by side.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` or `Validation`; engine failures are
    /// reported inside the returned [`GenerationOutcome`].
    #[instrument(
        skip(self, inputs),
        fields(style = %inputs.visual_style(), length = %inputs.length())
    )]
    pub async fn generate(&self, inputs: &StoryInputs) -> GenerationResult<GenerationOutcome> {
        self.gateway.require_credential().await?;
        let script_prompt = self.prompts.script_prompt(inputs)?;
        let image_prompt = self.prompts.image_prompt(inputs)?;

        let (image, script) = tokio::join!(
            self.gateway.generate_image(&image_prompt),
            self.generate_checked_script(&script_prompt, inputs.length()),
        );

        if let Err(e) = &image {
            warn!(error = %e.kind, "Image generation failed; continuing with the script");
        }
        if let Err(e) = &script {
            warn!(error = %e.kind, "Script generation failed");
        }
        info!(
            image_ok = image.is_ok(),
            script_ok = script.is_ok(),
            "Generation settled"
        );

        Ok(GenerationOutcome { image, script })
    }

    /// Generate a script and enforce its contracts, re-attempting only on
    /// contract breaches.
    async fn generate_checked_script(
        &self,
        prompt: &ScriptPrompt,
        length: &LengthMode,
    ) -> GenerationResult<Script> {
        let mut attempt = 1;
        loop {
            let script = self.gateway.generate_script(prompt).await?;
            match check_script(&script, length, self.rules) {
                Ok(()) => return Ok(script),
                Err(e)
                    if attempt < self.attempts
                        && matches!(e.kind, GenerationErrorKind::ContractViolation(_)) =>
                {
                    warn!(
                        attempt,
                        max_attempts = self.attempts,
                        error = %e.kind,
                        "Script broke its contract, generating again"
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
