use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::request::{Method, Request};
use crate::traits::Transport;

/// Assembles [`Request`]s from a [`Config`] and dispatches them through a
/// [`Transport`].
///
/// Every request carries the configured token (overriding any `token` in
/// the caller's query), `mock = true` in test mode, and the configured
/// instrumentor when there is one.
#[derive(Clone)]
pub struct Requester<T: Transport> {
    config: Arc<Config>,
    transport: T,
    test_mode: bool,
}

impl<T: Transport> Requester<T> {
    /// Test mode follows [`Config::test_mode`].
    pub fn new(config: Arc<Config>, transport: T) -> Self {
        let test_mode = config.test_mode();
        Self {
            config,
            transport,
            test_mode,
        }
    }

    /// Force test mode on or off regardless of the config.
    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    pub fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        query: BTreeMap<String, String>,
    ) -> Request {
        let request = Request::new(method, endpoint, self.config.token(), query)
            .with_mock(self.test_mode);

        match self.config.instrumentor() {
            Some(instrumentor) => request.with_instrumentor(Arc::clone(instrumentor)),
            None => request,
        }
    }

    pub async fn perform(
        &self,
        method: Method,
        endpoint: &str,
        query: BTreeMap<String, String>,
    ) -> Result<T::Response, AppError> {
        self.perform_with(method, endpoint, query, |_| {}).await
    }

    /// Like [`perform`](Self::perform), but lets `customize` adjust the
    /// assembled request (headers, extra params) before dispatch.
    pub async fn perform_with<F>(
        &self,
        method: Method,
        endpoint: &str,
        query: BTreeMap<String, String>,
        customize: F,
    ) -> Result<T::Response, AppError>
    where
        F: FnOnce(&mut Request) + Send,
    {
        let mut request = self.build_request(method, endpoint, query);
        customize(&mut request);

        tracing::debug!(
            method = %request.method,
            endpoint = %request.endpoint,
            mock = request.mock,
            "Dispatching Diffbot request"
        );

        self.transport.send(request).await
    }
}
