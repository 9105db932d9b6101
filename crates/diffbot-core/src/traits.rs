use std::future::Future;

use crate::error::AppError;
use crate::request::Request;

/// Dispatches an assembled [`Request`] over HTTP.
///
/// Implementations must not reinterpret the response: whatever the
/// underlying client returns is handed back as `Self::Response`. Requests
/// with `mock == true` must never reach the network.
pub trait Transport: Send + Sync + Clone {
    type Response: Send;

    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Self::Response, AppError>> + Send;
}

/// Receives request lifecycle events (`diffbot.request`, `diffbot.response`,
/// `diffbot.error`).
///
/// This crate only decides whether an instrumentor is attached to a request;
/// what happens to the events is up to the implementation.
pub trait Instrumentor: Send + Sync {
    fn instrument(&self, event: &str, payload: &serde_json::Value);
}
