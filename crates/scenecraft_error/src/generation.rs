//! Generation pipeline error taxonomy.

/// User-facing retry suggestion attached to overload failures.
pub const OVERLOAD_HINT: &str = "The AI model is overloaded. Try again later.";

/// The closed set of failures the generation pipeline reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// No engine credential is configured
    #[display("No API credential is configured. Save a key before generating.")]
    MissingCredential,
    /// The user input was rejected before any engine call
    #[display("Invalid input: {}", _0)]
    Validation(String),
    /// The engine returned data that does not match the schema contract
    #[display("Engine response does not match the schema: {}", _0)]
    SchemaViolation(String),
    /// The engine returned well-formed data that breaks a business rule
    #[display("Generated script breaks its contract: {}", _0)]
    ContractViolation(String),
    /// The engine reported transient overload
    #[display("{} ({})", OVERLOAD_HINT, message)]
    EngineOverloaded {
        /// Raw engine message
        message: String,
    },
    /// The image engine produced no image
    #[display("The image engine returned no images")]
    EmptyResult,
    /// A regeneration for this SEO field is already in flight
    #[display("A regeneration of '{}' is already in progress", _0)]
    FieldBusy(String),
    /// Any other engine failure, with its message
    #[display("{}", _0)]
    Unknown(String),
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use scenecraft_error::{GenerationError, GenerationErrorKind, OVERLOAD_HINT};
///
/// let err = GenerationError::new(GenerationErrorKind::EngineOverloaded {
///     message: "The model is overloaded.".into(),
/// });
/// assert_eq!(err.hint(), Some(OVERLOAD_HINT));
/// assert_eq!(err.message(), format!("{} (The model is overloaded.)", OVERLOAD_HINT));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }

    /// Human-readable message without the location suffix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Retry suggestion shown alongside the message, when one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self.kind {
            GenerationErrorKind::EngineOverloaded { .. } => Some(OVERLOAD_HINT),
            _ => None,
        }
    }

    /// Whether the failure was detected before any engine call.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self.kind,
            GenerationErrorKind::MissingCredential | GenerationErrorKind::Validation(_)
        )
    }
}

/// Result type for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;
