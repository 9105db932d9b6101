use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::params::{RequestParams, Resource};
use crate::request::{Method, Request, URL_PARAM};
use crate::requester::Requester;
use crate::resources::{Article, Frontpage};
use crate::traits::Transport;

/// Performs extraction calls against one resource type.
///
/// Per-call options are merged over the configured defaults, flattened,
/// and sent as a single GET with the target `url`. The transport's response
/// is returned untouched; interpreting the body is the caller's job.
pub struct ResourceClient<R: Resource, T: Transport> {
    requester: Requester<T>,
    endpoint: String,
    _resource: PhantomData<fn() -> R>,
}

pub type ArticleClient<T> = ResourceClient<Article, T>;
pub type FrontpageClient<T> = ResourceClient<Frontpage, T>;

impl<R: Resource, T: Transport> ResourceClient<R, T> {
    pub fn new(config: Arc<Config>, transport: T) -> Self {
        Self::from_requester(Requester::new(config, transport))
    }

    pub fn from_requester(requester: Requester<T>) -> Self {
        let endpoint = requester.config().endpoint::<R>();
        Self {
            requester,
            endpoint,
            _resource: PhantomData,
        }
    }

    /// Force test mode on or off regardless of the config.
    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.requester = self.requester.with_test_mode(test_mode);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The configured defaults with `options` merged over them.
    pub fn effective_params(&self, options: Option<&RequestParams<R>>) -> RequestParams<R> {
        let defaults = self.requester.config().defaults::<R>();
        match options {
            Some(options) => defaults.merge(options),
            None => defaults.clone(),
        }
    }

    /// The query sent for `url`, minus the token.
    pub fn query_for(&self, url: &str, options: Option<&RequestParams<R>>) -> BTreeMap<String, String> {
        let mut query = self.effective_params(options).to_query_params();
        query.insert(URL_PARAM.to_string(), url.to_string());
        query
    }

    pub async fn fetch(
        &self,
        url: &str,
        options: Option<&RequestParams<R>>,
    ) -> Result<T::Response, AppError> {
        self.fetch_with(url, options, |_| {}).await
    }

    /// Like [`fetch`](Self::fetch), with a hook to adjust the assembled
    /// request before it is sent.
    pub async fn fetch_with<F>(
        &self,
        url: &str,
        options: Option<&RequestParams<R>>,
        customize: F,
    ) -> Result<T::Response, AppError>
    where
        F: FnOnce(&mut Request) + Send,
    {
        let query = self.query_for(url, options);
        tracing::debug!(resource = R::NAME, url, params = query.len(), "Fetching");

        self.requester
            .perform_with(Method::Get, &self.endpoint, query, customize)
            .await
    }
}

impl<R: Resource, T: Transport> Clone for ResourceClient<R, T> {
    fn clone(&self) -> Self {
        Self {
            requester: self.requester.clone(),
            endpoint: self.endpoint.clone(),
            _resource: PhantomData,
        }
    }
}

/// Entry point holding the shared [`Config`] and a transport.
///
/// ```rust
/// use diffbot_core::resources::ArticleParams;
/// use diffbot_core::testutil::MockTransport;
/// use diffbot_core::{Config, Diffbot};
///
/// # async fn run() -> Result<(), diffbot_core::AppError> {
/// let config = Config::builder()
///     .token("abc123")
///     .defaults(ArticleParams::new().with_max_tags(10))
///     .build();
/// let diffbot = Diffbot::new(config, MockTransport::new());
///
/// let response = diffbot.article().fetch("http://example.com/page", None).await?;
/// assert_eq!(response.status, 200);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Diffbot<T: Transport> {
    config: Arc<Config>,
    transport: T,
}

impl<T: Transport> Diffbot<T> {
    pub fn new(config: Config, transport: T) -> Self {
        Self::from_shared(Arc::new(config), transport)
    }

    pub fn from_shared(config: Arc<Config>, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the config. Clients already handed out keep the
    /// config they were created with.
    pub fn config_mut(&mut self) -> &mut Config {
        Arc::make_mut(&mut self.config)
    }

    pub fn requester(&self) -> Requester<T> {
        Requester::new(Arc::clone(&self.config), self.transport.clone())
    }

    pub fn resource<R: Resource>(&self) -> ResourceClient<R, T> {
        ResourceClient::from_requester(self.requester())
    }

    pub fn article(&self) -> ArticleClient<T> {
        self.resource()
    }

    pub fn frontpage(&self) -> FrontpageClient<T> {
        self.resource()
    }
}
