//! Mock text and image engines for pipeline tests.

use async_trait::async_trait;
use scenecraft_core::{ApiKey, GeneratedImage, ImageRequest, TextRequest};
use scenecraft_error::{EngineError, EngineErrorKind, EngineResult};
use scenecraft_interface::{ImageEngine, TextEngine};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Behavior configuration for mock text responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always return success with the given text
    Success(String),
    /// Always return the specified error
    Error(EngineErrorKind),
    /// Fail N times with the error, then succeed with the text
    FailThenSucceed {
        fail_count: usize,
        error: EngineErrorKind,
        success_text: String,
    },
    /// Return a sequence of responses (errors or success)
    Sequence(Vec<MockResponse>),
}

/// A single mock response (success or error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(EngineErrorKind),
}

/// Mock text engine.
///
/// Clones share the call counter and request log, so a test can keep a
/// handle after moving the engine into the pipeline.
#[derive(Debug, Clone)]
pub struct MockTextEngine {
    behavior: MockBehavior,
    latency: Duration,
    call_count: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<TextRequest>>>,
}

impl MockTextEngine {
    pub fn new_with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            latency: Duration::from_millis(1),
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always succeed with `text`.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new_with_behavior(MockBehavior::Success(text.into()))
    }

    /// Always fail with `error`.
    pub fn new_error(error: EngineErrorKind) -> Self {
        Self::new_with_behavior(MockBehavior::Error(error))
    }

    #[allow(dead_code)]
    pub fn new_fail_then_succeed(
        fail_count: usize,
        error: EngineErrorKind,
        success_text: impl Into<String>,
    ) -> Self {
        Self::new_with_behavior(MockBehavior::FailThenSucceed {
            fail_count,
            error,
            success_text: success_text.into(),
        })
    }

    /// Return `responses` in order, then fail.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self::new_with_behavior(MockBehavior::Sequence(responses))
    }

    /// Simulated time each call spends in flight.
    #[allow(dead_code)]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of generate_text calls so far.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Every request received, in order.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<TextRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self, req: &TextRequest) -> EngineResult<String> {
        self.requests.lock().unwrap().push(req.clone());
        let mut count = self.call_count.lock().unwrap();
        let current_count = *count;
        *count += 1;

        match &self.behavior {
            MockBehavior::Success(text) => Ok(text.clone()),
            MockBehavior::Error(kind) => Err(EngineError::new(kind.clone())),
            MockBehavior::FailThenSucceed {
                fail_count,
                error,
                success_text,
            } => {
                if current_count < *fail_count {
                    Err(EngineError::new(error.clone()))
                } else {
                    Ok(success_text.clone())
                }
            }
            MockBehavior::Sequence(responses) => match responses.get(current_count) {
                Some(MockResponse::Success(text)) => Ok(text.clone()),
                Some(MockResponse::Error(kind)) => Err(EngineError::new(kind.clone())),
                None => Err(EngineError::new(EngineErrorKind::Transport(format!(
                    "Mock sequence exhausted (call {} beyond {} responses)",
                    current_count + 1,
                    responses.len()
                )))),
            },
        }
    }
}

#[async_trait]
impl TextEngine for MockTextEngine {
    async fn generate_text(&self, _key: &ApiKey, req: &TextRequest) -> EngineResult<String> {
        tokio::time::sleep(self.latency).await;
        self.next_response(req)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-text"
    }
}

/// Mock image engine.
#[derive(Debug, Clone)]
pub struct MockImageEngine {
    result: Result<Vec<GeneratedImage>, EngineErrorKind>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageEngine {
    /// Always return one small PNG.
    pub fn new_success() -> Self {
        Self {
            result: Ok(vec![png()]),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Always return an empty image list.
    #[allow(dead_code)]
    pub fn new_empty() -> Self {
        Self {
            result: Ok(Vec::new()),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Always fail with `error`.
    pub fn new_error(error: EngineErrorKind) -> Self {
        Self {
            result: Err(error),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of generate_images calls so far.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

/// The image every successful mock call returns.
pub fn png() -> GeneratedImage {
    GeneratedImage::new("image/png", vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a])
}

#[async_trait]
impl ImageEngine for MockImageEngine {
    async fn generate_images(
        &self,
        _key: &ApiKey,
        _req: &ImageRequest,
    ) -> EngineResult<Vec<GeneratedImage>> {
        tokio::time::sleep(Duration::from_millis(1)).await;
        *self.call_count.lock().unwrap() += 1;
        self.result.clone().map_err(EngineError::new)
    }

    fn image_model_name(&self) -> &str {
        "mock-image"
    }
}
