use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::error::AppError;
use crate::traits::Instrumentor;

/// Query parameter carrying the API token.
pub const TOKEN_PARAM: &str = "token";

/// Query parameter carrying the page to extract.
pub const URL_PARAM: &str = "url";

/// Scope prefixed to every instrumentation event.
pub const INSTRUMENTOR_NAME: &str = "diffbot";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully assembled outbound request.
///
/// The query map always contains `token`. It can be read freely and
/// extended through [`insert_query`](Self::insert_query), but the token
/// itself can only be set at construction.
#[derive(Clone)]
pub struct Request {
    pub method: Method,
    pub endpoint: String,
    pub headers: BTreeMap<String, String>,
    /// Set in test mode; transports must intercept instead of hitting the network.
    pub mock: bool,
    query: BTreeMap<String, String>,
    instrumentor: Option<Arc<dyn Instrumentor>>,
}

impl Request {
    /// Assemble a request. `token` is written after `query`, so a caller
    /// supplied `token` key never survives.
    pub fn new(
        method: Method,
        endpoint: impl Into<String>,
        token: &str,
        query: BTreeMap<String, String>,
    ) -> Self {
        let mut query = query;
        query.insert(TOKEN_PARAM.to_string(), token.to_string());

        Self {
            method,
            endpoint: endpoint.into(),
            headers: BTreeMap::new(),
            mock: false,
            query,
            instrumentor: None,
        }
    }

    pub fn with_mock(mut self, mock: bool) -> Self {
        self.mock = mock;
        self
    }

    pub fn with_instrumentor(mut self, instrumentor: Arc<dyn Instrumentor>) -> Self {
        self.instrumentor = Some(instrumentor);
        self
    }

    pub fn token(&self) -> &str {
        self.query
            .get(TOKEN_PARAM)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Add or replace a query parameter. Returns `false` (and changes
    /// nothing) for `token`.
    pub fn insert_query(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if name == TOKEN_PARAM {
            return false;
        }
        self.query.insert(name, value.into());
        true
    }

    pub fn instrumentor(&self) -> Option<&Arc<dyn Instrumentor>> {
        self.instrumentor.as_ref()
    }

    /// `Some("diffbot")` when an instrumentor is attached.
    pub fn instrumentor_name(&self) -> Option<&'static str> {
        self.instrumentor.as_ref().map(|_| INSTRUMENTOR_NAME)
    }

    /// Endpoint with the encoded query string, token first.
    pub fn url(&self) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.endpoint)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(TOKEN_PARAM, self.token());
            for (name, value) in self.query.iter().filter(|(k, _)| *k != TOKEN_PARAM) {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    /// Event payload describing this request. The token is never included.
    pub fn describe(&self) -> serde_json::Value {
        let params: Vec<&str> = self
            .query
            .keys()
            .map(String::as_str)
            .filter(|k| *k != TOKEN_PARAM)
            .collect();

        serde_json::json!({
            "method": self.method,
            "endpoint": self.endpoint,
            "params": params,
            "mock": self.mock,
        })
    }

    /// Forward `<scope>.<event>` to the attached instrumentor, if any.
    pub fn notify(&self, event: &str, payload: &serde_json::Value) {
        if let Some(instrumentor) = &self.instrumentor {
            instrumentor.instrument(&format!("{INSTRUMENTOR_NAME}.{event}"), payload);
        }
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query: BTreeMap<&str, &str> = self
            .query
            .iter()
            .map(|(k, v)| {
                let v = if k == TOKEN_PARAM { "[redacted]" } else { v.as_str() };
                (k.as_str(), v)
            })
            .collect();

        f.debug_struct("Request")
            .field("method", &self.method)
            .field("endpoint", &self.endpoint)
            .field("query", &query)
            .field("headers", &self.headers)
            .field("mock", &self.mock)
            .field("instrumentor_name", &self.instrumentor_name())
            .finish()
    }
}
