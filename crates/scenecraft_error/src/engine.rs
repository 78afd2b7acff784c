//! Generation engine error types and retry logic.

/// Raw conditions reported by a text or image generation engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum EngineErrorKind {
    /// Failed to build the HTTP client
    #[display("Failed to create engine client: {}", _0)]
    ClientCreation(String),
    /// The request never produced an HTTP response
    #[display("Engine transport failure: {}", _0)]
    Transport(String),
    /// The engine answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Provider status string (e.g. `UNAVAILABLE`), when the body carried one
        status: Option<String>,
        /// Provider error message, or the raw body when it was not the JSON envelope
        message: String,
    },
    /// The engine answered 2xx but the payload was unusable
    #[display("Malformed engine response: {}", _0)]
    MalformedResponse(String),
}

impl EngineErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineErrorKind::Api { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            EngineErrorKind::Transport(_) => true,
            _ => false,
        }
    }

    /// Whether the engine signalled transient overload.
    pub fn is_overloaded(&self) -> bool {
        match self {
            EngineErrorKind::Api {
                status_code,
                status,
                ..
            } => *status_code == 503 || status.as_deref() == Some("UNAVAILABLE"),
            _ => false,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            EngineErrorKind::Api { status_code, .. } => match *status_code {
                429 => (5000, 3, 40),
                503 => (2000, 5, 60),
                500 | 502 | 504 => (1000, 3, 8),
                408 => (2000, 4, 30),
                _ => (2000, 5, 60),
            },
            EngineErrorKind::Transport(_) => (1000, 3, 10),
            _ => (2000, 5, 60),
        }
    }
}

/// Engine error with source location tracking.
///
/// # Examples
///
/// ```
/// use scenecraft_error::{EngineError, EngineErrorKind};
///
/// let err = EngineError::new(EngineErrorKind::Transport("connection reset".into()));
/// assert!(format!("{}", err).contains("connection reset"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Engine Error: {} at line {} in {}", kind, line, file)]
pub struct EngineError {
    /// The kind of error that occurred
    pub kind: EngineErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl EngineError {
    /// Create a new EngineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: EngineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Build an [`EngineErrorKind::Api`] error from a status and response body.
    ///
    /// Engines wrap failures in `{"error": {"code", "message", "status"}}`;
    /// when the body matches, the provider message and status are lifted out,
    /// otherwise the raw body becomes the message.
    ///
    /// # Examples
    ///
    /// ```
    /// use scenecraft_error::{EngineError, EngineErrorKind};
    ///
    /// let body = r#"{"error":{"code":503,"message":"The model is overloaded.","status":"UNAVAILABLE"}}"#;
    /// let err = EngineError::from_response(503, body);
    /// assert!(err.kind.is_overloaded());
    /// assert!(matches!(err.kind, EngineErrorKind::Api { ref message, .. } if message == "The model is overloaded."));
    /// ```
    #[track_caller]
    pub fn from_response(status_code: u16, body: &str) -> Self {
        let envelope = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("error").cloned());

        let (status, message) = match envelope {
            Some(error) => (
                error
                    .get("status")
                    .and_then(|s| s.as_str())
                    .map(str::to_string),
                error
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| body.to_string()),
            ),
            None => (None, body.to_string()),
        };

        Self::new(EngineErrorKind::Api {
            status_code,
            status,
            message,
        })
    }

    /// The human-readable message without location decoration.
    pub fn message(&self) -> String {
        match &self.kind {
            EngineErrorKind::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use scenecraft_error::{EngineError, EngineErrorKind, RetryableError};
///
/// let err = EngineError::new(EngineErrorKind::Api {
///     status_code: 503,
///     status: Some("UNAVAILABLE".into()),
///     message: "Service unavailable".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// let (backoff, retries, _max_delay) = err.retry_strategy_params();
/// assert_eq!(backoff, 2000);
/// assert_eq!(retries, 5);
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 503 (service unavailable), 429 (rate limit),
    /// or network timeouts should return true. Permanent errors like 401
    /// (unauthorized) or 400 (bad request) should return false.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (2000, 5, 60)
    }
}

impl RetryableError for EngineError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        self.kind.retry_strategy_params()
    }
}
