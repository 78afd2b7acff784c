//! Completed generation sessions.

use crate::{GeneratedImage, Script, StoryInputs};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const TITLE_IDEA_CHARS: usize = 40;

/// Unique, time-ordered session identifier (UUIDv7).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct SessionId(uuid::Uuid);

impl SessionId {
    /// Mint a new identifier; later ids sort after earlier ones.
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for SessionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| format!("invalid session id '{}': {}", s, e))
    }
}

/// A stored generation run.
///
/// Sessions are immutable once built; the only way to change history is to
/// append a new session or delete an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique identifier
    id: SessionId,
    /// Title shown in history listings
    title: String,
    /// When the session was recorded
    created_at: DateTime<Utc>,
    /// Inputs the script was generated from
    inputs: StoryInputs,
    /// Generated script
    script: Option<Script>,
    /// Concept image, absent when image generation failed
    image: Option<GeneratedImage>,
}

impl Session {
    /// Record a new session with a fresh id and derived title.
    ///
    /// # Examples
    ///
    /// ```
    /// use scenecraft_core::{Script, Session, StoryInputs};
    ///
    /// let inputs = StoryInputs::builder()
    ///     .story_idea("A lighthouse keeper finds a message in a bottle after the storm")
    ///     .build()
    ///     .unwrap();
    /// let session = Session::new(inputs, Script::default(), None);
    /// assert_eq!(session.title(), "A lighthouse keeper finds a message in a...");
    /// assert!(session.image().is_none());
    /// ```
    pub fn new(inputs: StoryInputs, script: Script, image: Option<GeneratedImage>) -> Self {
        Self {
            id: SessionId::new(),
            title: Self::derive_title(&inputs),
            created_at: Utc::now(),
            inputs,
            script: Some(script),
            image,
        }
    }

    /// Trimmed project name, or the first characters of the idea.
    pub fn derive_title(inputs: &StoryInputs) -> String {
        let project = inputs.project_name().trim();
        if !project.is_empty() {
            return project.to_string();
        }

        let idea = inputs.story_idea();
        let mut chars = idea.chars();
        let head: String = chars.by_ref().take(TITLE_IDEA_CHARS).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_wins_over_idea() {
        let inputs = StoryInputs::builder()
            .project_name("  The Scribe's Revenge ")
            .story_idea("A scribe rewrites history")
            .build()
            .expect("inputs");
        assert_eq!(Session::derive_title(&inputs), "The Scribe's Revenge");
    }

    #[test]
    fn test_short_idea_is_not_truncated() {
        let inputs = StoryInputs::builder()
            .story_idea("Jonah")
            .build()
            .expect("inputs");
        assert_eq!(Session::derive_title(&inputs), "Jonah");
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let first = SessionId::new();
        let second = SessionId::new();
        assert_ne!(first, second);
        assert!(first < second);
        assert_eq!(first.to_string().parse::<SessionId>(), Ok(first));
    }
}
