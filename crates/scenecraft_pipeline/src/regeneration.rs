//! Single-field SEO regeneration with per-field mutual exclusion.

use crate::contract::check_patch;
use crate::{GenerationGateway, PipelineConfig, PromptBuilder};
use scenecraft_core::{Script, SeoField, SeoPatch};
use scenecraft_error::{GenerationError, GenerationErrorKind, GenerationResult};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

type InFlight = Arc<Mutex<HashSet<SeoField>>>;

fn lock(in_flight: &InFlight) -> MutexGuard<'_, HashSet<SeoField>> {
    // The set is never left half-updated, so a poisoned lock is still usable.
    in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Marks a field busy for as long as it lives.
struct InFlightGuard {
    field: SeoField,
    in_flight: InFlight,
}

impl InFlightGuard {
    fn acquire(in_flight: &InFlight, field: SeoField) -> GenerationResult<Self> {
        if !lock(in_flight).insert(field) {
            return Err(GenerationError::new(GenerationErrorKind::FieldBusy(
                field.key().to_string(),
            )));
        }
        debug!(field = %field, "Field marked in flight");
        Ok(Self {
            field,
            in_flight: Arc::clone(in_flight),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.in_flight).remove(&self.field);
        debug!(field = %self.field, "Field cleared");
    }
}

/// Regenerates one SEO field of a working script.
///
/// Only one regeneration per field may run at a time; different fields may
/// run concurrently. The returned [`SeoPatch`] is merged by the caller, so a
/// failure never touches the working script.
#[derive(Debug, Clone)]
pub struct RegenerationOrchestrator {
    gateway: GenerationGateway,
    prompts: PromptBuilder,
    in_flight: InFlight,
}

impl RegenerationOrchestrator {
    /// Create an orchestrator with default pipeline settings.
    pub fn new(gateway: GenerationGateway) -> Self {
        Self::with_config(gateway, PipelineConfig::default())
    }

    /// Create an orchestrator with the given pipeline settings.
    pub fn with_config(gateway: GenerationGateway, config: PipelineConfig) -> Self {
        Self {
            gateway,
            prompts: PromptBuilder::from_config(config),
            in_flight: Arc::default(),
        }
    }

    /// Whether a regeneration of `field` is running.
    pub fn is_in_flight(&self, field: SeoField) -> bool {
        lock(&self.in_flight).contains(&field)
    }

    /// Regenerate `field` from `script` under new instructions.
    ///
    /// # Errors
    ///
    /// - `Validation` if `instructions` is blank
    /// - `FieldBusy` if the same field is already being regenerated
    /// - `ContractViolation` if the new value has the wrong cardinality
    /// - any gateway failure
    #[instrument(skip(self, script, story_idea, instructions))]
    pub async fn regenerate(
        &self,
        field: SeoField,
        script: &Script,
        story_idea: &str,
        instructions: &str,
    ) -> GenerationResult<SeoPatch> {
        let prompt = self
            .prompts
            .regeneration_prompt(field, script, story_idea, instructions)?;

        let _guard = InFlightGuard::acquire(&self.in_flight, field).inspect_err(|_| {
            warn!("Regeneration already in progress for this field");
        })?;

        let patch = self.gateway.generate_seo_field(&prompt).await?;
        check_patch(&patch)?;
        info!(entries = patch.len(), "Regenerated field ready to merge");
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_rejects_second_holder_and_clears_on_drop() {
        let in_flight = InFlight::default();
        let guard = InFlightGuard::acquire(&in_flight, SeoField::Tags).expect("first");

        let err = InFlightGuard::acquire(&in_flight, SeoField::Tags)
            .err()
            .expect("busy");
        assert_eq!(err.kind, GenerationErrorKind::FieldBusy("tags".into()));
        assert!(InFlightGuard::acquire(&in_flight, SeoField::Titles).is_ok());

        drop(guard);
        assert!(InFlightGuard::acquire(&in_flight, SeoField::Tags).is_ok());
    }
}
