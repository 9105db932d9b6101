//! Request building and resource clients for the Diffbot extraction API.
//!
//! [`Config`] holds the token, instrumentation, and per-resource defaults;
//! [`Diffbot`] hands out resource clients that merge call options over those
//! defaults and send one request through a [`Transport`].

pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod request;
pub mod requester;
pub mod resources;
pub mod testutil;
pub mod traits;

pub use client::{ArticleClient, Diffbot, FrontpageClient, ResourceClient};
pub use config::Config;
pub use error::AppError;
pub use params::{ParamValue, RequestParams, Resource};
pub use request::{Method, Request};
pub use requester::Requester;
pub use resources::{Article, ArticleParams, Frontpage, FrontpageParams};
pub use traits::{Instrumentor, Transport};
