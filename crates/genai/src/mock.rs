use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::client::GenerationClient;
use crate::error::GenerationError;
use crate::request::GenerationRequest;
use crate::response::ModelResponse;

/// A mock generation client that returns a configured response and records
/// every request it receives.
#[derive(Debug)]
pub struct MockGenerationClient {
    response: ModelResponse,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockGenerationClient {
    /// Create a mock that always answers with `response`.
    pub fn with_response(response: ModelResponse) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that answers with one base64 PNG part.
    pub fn returning_image(base64: impl Into<String>) -> Self {
        Self::with_response(ModelResponse::image("image/png", base64))
    }

    /// Create a mock that answers with text only.
    pub fn returning_text(text: impl Into<String>) -> Self {
        Self::with_response(ModelResponse::text(text))
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests
            .lock()
            .ok()
            .and_then(|requests| requests.last().cloned())
    }
}

#[async_trait]
impl GenerationClient for MockGenerationClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<ModelResponse, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        Ok(self.response.clone())
    }
}

/// A mock generation client that always returns an API error.
#[derive(Debug)]
pub struct FailingGenerationClient {
    error_message: String,
    calls: AtomicUsize,
}

impl FailingGenerationClient {
    /// Create a failing client with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationClient for FailingGenerationClient {
    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<ModelResponse, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GenerationError::Api {
            status: 500,
            body: self.error_message.clone(),
        })
    }
}
