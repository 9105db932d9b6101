use std::time::Duration;

use diffbot_core::error::AppError;
use diffbot_core::request::{Method, Request};
use diffbot_core::traits::Transport;
use reqwest::Client;

/// HTTP transport using reqwest.
///
/// Sends each request once and returns the `reqwest::Response` as-is,
/// including non-2xx answers: Diffbot reports bad tokens and unreachable
/// pages in the response body, and that is the caller's to interpret.
/// Requests built in test mode are refused with [`AppError::StubNotFound`]
/// before any I/O.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(concat!("diffbot-rs/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: timeout.as_secs(),
        })
    }
}

impl Transport for ReqwestTransport {
    type Response = reqwest::Response;

    async fn send(&self, request: Request) -> Result<reqwest::Response, AppError> {
        if request.mock {
            return Err(AppError::StubNotFound(request.endpoint.clone()));
        }

        let url = request.url()?;
        let mut builder = self.client.request(to_reqwest_method(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        request.notify("request", &request.describe());

        match builder.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                tracing::debug!(endpoint = %request.endpoint, status, "Diffbot responded");
                request.notify(
                    "response",
                    &serde_json::json!({
                        "endpoint": request.endpoint,
                        "status": status,
                    }),
                );
                Ok(response)
            }
            Err(e) => {
                let err = if e.is_timeout() {
                    AppError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    AppError::NetworkError(format!("Connection failed: {e}"))
                } else {
                    AppError::HttpError(e.to_string())
                };
                request.notify(
                    "error",
                    &serde_json::json!({
                        "endpoint": request.endpoint,
                        "error": err.to_string(),
                    }),
                );
                Err(err)
            }
        }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Head => reqwest::Method::HEAD,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_reqwest_method(Method::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest_method(Method::Head), reqwest::Method::HEAD);
        assert_eq!(to_reqwest_method(Method::Post), reqwest::Method::POST);
        assert_eq!(to_reqwest_method(Method::Put), reqwest::Method::PUT);
        assert_eq!(to_reqwest_method(Method::Delete), reqwest::Method::DELETE);
    }

    #[tokio::test]
    async fn test_mock_request_is_refused() {
        let transport = ReqwestTransport::new().unwrap();
        let request = Request::new(
            Method::Get,
            "http://www.diffbot.com/api/article",
            "T",
            BTreeMap::new(),
        )
        .with_mock(true);

        let err = transport.send(request).await.unwrap_err();
        assert!(matches!(err, AppError::StubNotFound(ref e) if e.ends_with("/api/article")));
    }

    #[tokio::test]
    async fn test_invalid_endpoint_is_rejected() {
        let transport = ReqwestTransport::new().unwrap();
        let request = Request::new(Method::Get, "::not a url::", "T", BTreeMap::new());

        let err = transport.send(request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidUrl(_)));
    }
}
