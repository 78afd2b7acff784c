//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, GenerationError, JsonError, StorageError};

/// Every error family a scenecraft operation can produce.
///
/// # Examples
///
/// ```
/// use scenecraft_error::{ConfigError, ScenecraftError};
///
/// let config_err = ConfigError::new("Missing [gemini] section");
/// let err: ScenecraftError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ScenecraftErrorKind {
    /// Generation pipeline failure
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Credential or history persistence failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// Scenecraft error with kind discrimination.
///
/// # Examples
///
/// ```
/// use scenecraft_error::{ScenecraftResult, StorageError, StorageErrorKind};
///
/// fn load() -> ScenecraftResult<()> {
///     Err(StorageError::new(StorageErrorKind::FileRead("history.json".into())))?
/// }
///
/// assert!(load().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Scenecraft Error: {}", _0)]
pub struct ScenecraftError(Box<ScenecraftErrorKind>);

impl ScenecraftError {
    /// Create a new error from a kind.
    pub fn new(kind: ScenecraftErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScenecraftErrorKind {
        &self.0
    }

    /// The generation error inside, if this is one.
    pub fn as_generation(&self) -> Option<&GenerationError> {
        match self.kind() {
            ScenecraftErrorKind::Generation(e) => Some(e),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to ScenecraftErrorKind
impl<T> From<T> for ScenecraftError
where
    T: Into<ScenecraftErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for scenecraft operations.
pub type ScenecraftResult<T> = std::result::Result<T, ScenecraftError>;
