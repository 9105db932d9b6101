use std::fmt;
use std::sync::Arc;

use crate::error::AppError;
use crate::params::{RequestParams, Resource};
use crate::resources::{ArticleParams, FrontpageParams};
use crate::traits::Instrumentor;

/// Base URL every resource path hangs off.
pub const DEFAULT_BASE_URL: &str = "http://www.diffbot.com/api";

/// Client configuration: API token, instrumentation, test mode, and the
/// default options applied to every request of each resource type.
///
/// Build one at startup and share it (usually as `Arc<Config>`). Setters
/// replace earlier values wholesale and validate nothing; a missing token
/// is sent upstream as an empty `token` parameter.
#[derive(Clone, Default)]
pub struct Config {
    token: String,
    base_url: Option<String>,
    instrumentor: Option<Arc<dyn Instrumentor>>,
    test_mode: bool,
    pub(crate) article_defaults: ArticleParams,
    pub(crate) frontpage_defaults: FrontpageParams,
}

impl Config {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Read configuration from environment variables.
    ///
    /// - `DIFFBOT_TOKEN` (optional, defaults to an empty token)
    /// - `DIFFBOT_BASE_URL` (optional, defaults to [`DEFAULT_BASE_URL`])
    /// - `DIFFBOT_TEST_MODE` (optional, `1`/`true`/`yes` or `0`/`false`/`no`)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::new(lookup("DIFFBOT_TOKEN").unwrap_or_default());

        if let Some(base_url) = lookup("DIFFBOT_BASE_URL").filter(|s| !s.trim().is_empty()) {
            config.base_url = Some(base_url);
        }

        config.test_mode = match lookup("DIFFBOT_TEST_MODE") {
            None => false,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "" | "0" | "false" | "no" => false,
                "1" | "true" | "yes" => true,
                _ => {
                    return Err(AppError::ConfigError(format!(
                        "Invalid DIFFBOT_TEST_MODE '{raw}': expected true/false"
                    )));
                }
            },
        };

        Ok(config)
    }

    /// Run `f` once against this config, for grouped setup.
    pub fn configure(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = Some(base_url.into());
    }

    pub fn instrumentor(&self) -> Option<&Arc<dyn Instrumentor>> {
        self.instrumentor.as_ref()
    }

    pub fn set_instrumentor(&mut self, instrumentor: Arc<dyn Instrumentor>) {
        self.instrumentor = Some(instrumentor);
    }

    pub fn clear_instrumentor(&mut self) {
        self.instrumentor = None;
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    pub fn set_test_mode(&mut self, test_mode: bool) {
        self.test_mode = test_mode;
    }

    /// The defaults for resource `R`. Returns the same value on every call
    /// until it is replaced.
    pub fn defaults<R: Resource>(&self) -> &RequestParams<R> {
        R::defaults(self)
    }

    /// Populate the stored defaults for `R` in place.
    pub fn defaults_mut<R: Resource>(&mut self) -> &mut RequestParams<R> {
        R::defaults_mut(self)
    }

    pub fn set_defaults<R: Resource>(&mut self, params: RequestParams<R>) {
        *R::defaults_mut(self) = params;
    }

    /// Replace the defaults for `R` with a fresh value populated by `f`.
    ///
    /// The previous defaults are kept if `f` fails.
    pub fn replace_defaults<R, F>(&mut self, f: F) -> Result<&mut RequestParams<R>, AppError>
    where
        R: Resource,
        F: FnOnce(&mut RequestParams<R>) -> Result<(), AppError>,
    {
        let mut fresh = RequestParams::new();
        f(&mut fresh)?;
        let slot = R::defaults_mut(self);
        *slot = fresh;
        Ok(slot)
    }

    /// The endpoint URL for resource `R` under the configured base URL.
    pub fn endpoint<R: Resource>(&self) -> String {
        R::endpoint(self.base_url())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &if self.token.is_empty() { "" } else { "[redacted]" })
            .field("base_url", &self.base_url())
            .field("instrumentor", &self.instrumentor.is_some())
            .field("test_mode", &self.test_mode)
            .field("article_defaults", &self.article_defaults)
            .field("frontpage_defaults", &self.frontpage_defaults)
            .finish()
    }
}

/// Builder for [`Config`].
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = token.into();
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    pub fn instrumentor(mut self, instrumentor: Arc<dyn Instrumentor>) -> Self {
        self.config.instrumentor = Some(instrumentor);
        self
    }

    /// Mark every request as mocked so transports intercept it.
    pub fn test_mode(mut self, test_mode: bool) -> Self {
        self.config.test_mode = test_mode;
        self
    }

    pub fn defaults<R: Resource>(mut self, params: RequestParams<R>) -> Self {
        self.config.set_defaults(params);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
