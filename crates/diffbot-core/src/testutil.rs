//! Test utilities: a mock transport and a recording instrumentor.
//!
//! Handwritten mocks for dependency injection in tests. Both use
//! `Arc<Mutex<_>>` so clones share state and tests can assert on what was
//! recorded after handing a clone to the code under test.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::request::Request;
use crate::traits::{Instrumentor, Transport};

// ---------------------------------------------------------------------------
// MockTransport
// ---------------------------------------------------------------------------

/// Canned response returned by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

/// Transport that never touches the network.
///
/// Records every request it is handed and answers from a queue. An empty
/// queue yields `200` with an empty JSON object. Instrumentation events are
/// emitted the same way a real transport emits them.
#[derive(Clone, Default)]
pub struct MockTransport {
    requests: Arc<Mutex<Vec<Request>>>,
    responses: Arc<Mutex<VecDeque<Result<MockResponse, AppError>>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: Vec<Result<MockResponse, AppError>>) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            responses: Arc::new(Mutex::new(responses.into())),
        }
    }

    pub fn push_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_error(&self, error: AppError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<Request> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Transport for MockTransport {
    type Response = MockResponse;

    async fn send(&self, request: Request) -> Result<MockResponse, AppError> {
        request.notify("request", &request.describe());

        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(MockResponse::ok("{}")));

        match &next {
            Ok(response) => request.notify(
                "response",
                &serde_json::json!({
                    "endpoint": request.endpoint,
                    "status": response.status,
                }),
            ),
            Err(e) => request.notify(
                "error",
                &serde_json::json!({
                    "endpoint": request.endpoint,
                    "error": e.to_string(),
                }),
            ),
        }

        self.requests.lock().unwrap().push(request);
        next
    }
}

// ---------------------------------------------------------------------------
// RecordingInstrumentor
// ---------------------------------------------------------------------------

/// Instrumentor that stores every event it receives.
#[derive(Clone, Default)]
pub struct RecordingInstrumentor {
    events: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

impl RecordingInstrumentor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(event name, payload)` pairs, oldest first.
    pub fn events(&self) -> Vec<(String, serde_json::Value)> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl Instrumentor for RecordingInstrumentor {
    fn instrument(&self, event: &str, payload: &serde_json::Value) {
        self.events
            .lock()
            .unwrap()
            .push((event.to_string(), payload.clone()));
    }
}
