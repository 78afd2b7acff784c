//! Session history plus the active working area.

use crate::{GenerationOutcome, RegenerationOrchestrator, SessionStore};
use scenecraft_core::{GeneratedImage, Script, SeoField, SeoPatch, Session, SessionId, StoryInputs};
use scenecraft_error::{
    GenerationError, GenerationErrorKind, GenerationResult, StorageError, StorageErrorKind,
    StorageResult,
};
use scenecraft_storage::HistoryStore;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The editable copy the user is working on.
///
/// Holds clones of a stored session's data; edits here never reach history
/// unless [`Workspace::snapshot_working_copy`] is called.
#[derive(Debug, Clone, Default, derive_getters::Getters)]
pub struct WorkingArea {
    /// Session the working copy came from
    active_id: Option<SessionId>,
    /// Inputs shown in the form
    inputs: StoryInputs,
    /// Working script
    script: Option<Script>,
    /// Working concept image
    image: Option<GeneratedImage>,
    /// Last image failure
    image_error: Option<GenerationError>,
    /// Last script failure
    script_error: Option<GenerationError>,
}

impl WorkingArea {
    /// Whether the area holds nothing: no session, script or image.
    pub fn is_empty(&self) -> bool {
        self.active_id.is_none() && self.script.is_none() && self.image.is_none()
    }

    fn from_session(session: &Session) -> Self {
        Self {
            active_id: Some(*session.id()),
            inputs: session.inputs().clone(),
            script: session.script().clone(),
            image: session.image().clone(),
            image_error: None,
            script_error: None,
        }
    }
}

/// What [`Workspace::record`] did with a generation outcome.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct GenerationReport {
    /// New session, present only when the script succeeded
    session_id: Option<SessionId>,
    /// Image failure, if any
    image_error: Option<GenerationError>,
    /// Script failure, if any
    script_error: Option<GenerationError>,
}

impl GenerationReport {
    /// Whether a session was recorded.
    pub fn created_session(&self) -> bool {
        self.session_id.is_some()
    }
}

/// History and the working area, mutated only by explicit user actions.
#[derive(Debug)]
pub struct Workspace {
    history: SessionStore,
    working: WorkingArea,
}

impl Workspace {
    /// Load history and start with an empty working area.
    pub async fn open(backend: Arc<dyn HistoryStore>) -> StorageResult<Self> {
        Ok(Self {
            history: SessionStore::open(backend).await?,
            working: WorkingArea::default(),
        })
    }

    /// Stored history.
    pub fn history(&self) -> &SessionStore {
        &self.history
    }

    /// Current working area.
    pub fn working(&self) -> &WorkingArea {
        &self.working
    }

    /// Reset the working area to its defaults.
    pub fn new_session(&mut self) {
        self.working = WorkingArea::default();
        info!("Working area reset");
    }

    /// Load a stored session into the working area.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if no session has this id.
    pub fn select(&mut self, id: &SessionId) -> StorageResult<&WorkingArea> {
        let session = self
            .history
            .get(id)
            .ok_or_else(|| StorageError::new(StorageErrorKind::SessionNotFound(id.to_string())))?;
        self.working = WorkingArea::from_session(session);
        info!(%id, "Session selected");
        Ok(&self.working)
    }

    /// Delete a session from history.
    ///
    /// The working area is reset only when the deleted session is active.
    pub async fn delete(&mut self, id: &SessionId) -> StorageResult<Session> {
        let removed = self.history.remove(id).await?;
        if self.working.active_id.as_ref() == Some(id) {
            self.new_session();
        }
        Ok(removed)
    }

    /// Apply a generation outcome.
    ///
    /// A session is appended and made active iff the script succeeded; a
    /// failed image is stored as `None`. Both failures are reported.
    #[instrument(skip(self, inputs, outcome))]
    pub async fn record(
        &mut self,
        inputs: StoryInputs,
        outcome: GenerationOutcome,
    ) -> StorageResult<GenerationReport> {
        let GenerationOutcome { image, script } = outcome;
        let (image, image_error) = match image {
            Ok(image) => (Some(image), None),
            Err(e) => (None, Some(e)),
        };

        let script = match script {
            Ok(script) => script,
            Err(e) => {
                warn!(error = %e.kind, "No session recorded");
                self.working = WorkingArea {
                    inputs,
                    image,
                    image_error: image_error.clone(),
                    script_error: Some(e.clone()),
                    ..WorkingArea::default()
                };
                return Ok(GenerationReport {
                    session_id: None,
                    image_error,
                    script_error: Some(e),
                });
            }
        };

        let session = Session::new(inputs, script, image);
        let id = *session.id();
        self.history.append(session.clone()).await?;
        self.working = WorkingArea {
            image_error: image_error.clone(),
            ..WorkingArea::from_session(&session)
        };
        info!(%id, has_image = session.image().is_some(), "Session recorded");

        Ok(GenerationReport {
            session_id: Some(id),
            image_error,
            script_error: None,
        })
    }

    /// Merge a regenerated field into the working script only.
    ///
    /// Returns the updated script, or `None` when there is no working script.
    pub fn apply_patch(&mut self, patch: SeoPatch) -> Option<&Script> {
        let script = self.working.script.as_mut()?;
        *script = script.with_seo_patch(patch);
        self.working.script.as_ref()
    }

    /// Copy of the working script and its story idea.
    ///
    /// Regenerating through this copy does not hold the workspace, so
    /// different fields can be regenerated concurrently; each returned patch
    /// is then merged with [`Workspace::apply_patch`].
    ///
    /// # Errors
    ///
    /// Returns `Validation` if there is no working script.
    pub fn regeneration_source(&self) -> GenerationResult<(Script, String)> {
        let script = self.working.script.clone().ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::Validation(
                "there is no working script to regenerate".to_string(),
            ))
        })?;
        Ok((script, self.working.inputs.story_idea().clone()))
    }

    /// Regenerate one SEO field of the working script and merge it.
    ///
    /// The workspace stays borrowed for the whole engine call, so
    /// regenerations made through this method run one at a time. Use
    /// [`Workspace::regeneration_source`] to run several fields at once.
    /// On failure the working script is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if there is no working script, or whatever the
    /// orchestrator reports.
    pub async fn regenerate_field(
        &mut self,
        orchestrator: &RegenerationOrchestrator,
        field: SeoField,
        instructions: &str,
    ) -> GenerationResult<&Script> {
        let (script, story_idea) = self.regeneration_source()?;

        let patch = orchestrator
            .regenerate(field, &script, &story_idea, instructions)
            .await?;

        self.apply_patch(patch).ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::Validation(
                "the working script was cleared during regeneration".to_string(),
            ))
        })
    }

    /// Append the edited working copy to history as a new, active session.
    ///
    /// Returns `None` when there is no working script.
    pub async fn snapshot_working_copy(&mut self) -> StorageResult<Option<SessionId>> {
        let Some(script) = self.working.script.clone() else {
            return Ok(None);
        };
        let session = Session::new(
            self.working.inputs.clone(),
            script,
            self.working.image.clone(),
        );
        let id = *session.id();
        self.history.append(session).await?;
        self.working.active_id = Some(id);
        info!(%id, "Working copy saved as a new session");
        Ok(Some(id))
    }
}
