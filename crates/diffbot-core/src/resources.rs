//! The resource types exposed by the Diffbot API and their option schemas.

use crate::config::Config;
use crate::params::{FieldKind, FieldSpec, ParamValue, RequestParams, Resource};

/// Article extraction (`/api/article`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Article;

/// Front page extraction (`/api/frontpage`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frontpage;

pub type ArticleParams = RequestParams<Article>;
pub type FrontpageParams = RequestParams<Frontpage>;

impl Resource for Article {
    const NAME: &'static str = "article";
    const PATH: &'static str = "article";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("fields", "fields", FieldKind::List),
        FieldSpec::new("timeout", "timeout", FieldKind::Integer),
        FieldSpec::new("callback", "callback", FieldKind::Text),
        FieldSpec::new("html", "html", FieldKind::Flag),
        FieldSpec::new("dont_strip_ads", "dontStripAds", FieldKind::Flag),
        FieldSpec::new("tags", "tags", FieldKind::Flag),
        FieldSpec::new("max_tags", "maxTags", FieldKind::Integer),
        FieldSpec::new("comments", "comments", FieldKind::Flag),
        FieldSpec::new("summary", "summary", FieldKind::Flag),
        FieldSpec::new("stats", "stats", FieldKind::Flag),
    ];

    fn defaults(config: &Config) -> &ArticleParams {
        &config.article_defaults
    }

    fn defaults_mut(config: &mut Config) -> &mut ArticleParams {
        &mut config.article_defaults
    }
}

impl Resource for Frontpage {
    const NAME: &'static str = "frontpage";
    const PATH: &'static str = "frontpage";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("timeout", "timeout", FieldKind::Integer),
        FieldSpec::new("format", "format", FieldKind::Text),
        FieldSpec::new("all", "all", FieldKind::Flag),
    ];

    fn defaults(config: &Config) -> &FrontpageParams {
        &config.frontpage_defaults
    }

    fn defaults_mut(config: &mut Config) -> &mut FrontpageParams {
        &mut config.frontpage_defaults
    }
}

impl ArticleParams {
    /// Restrict the response to these fields.
    pub fn with_fields<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.with_value("fields", ParamValue::List(fields))
    }

    /// Upstream processing timeout, in milliseconds.
    pub fn with_timeout(self, millis: u64) -> Self {
        self.with_value("timeout", ParamValue::from(millis))
    }

    /// Wrap the JSON response in this JSONP callback.
    pub fn with_callback(self, callback: impl Into<String>) -> Self {
        self.with_value("callback", ParamValue::Text(callback.into()))
    }

    /// Include the article body as HTML.
    pub fn with_html(self, enabled: bool) -> Self {
        self.with_value("html", ParamValue::Flag(enabled))
    }

    /// Keep inline advertisements in the extracted text.
    pub fn with_dont_strip_ads(self, enabled: bool) -> Self {
        self.with_value("dont_strip_ads", ParamValue::Flag(enabled))
    }

    pub fn with_tags(self, enabled: bool) -> Self {
        self.with_value("tags", ParamValue::Flag(enabled))
    }

    /// Cap on the number of returned tags.
    pub fn with_max_tags(self, max: u32) -> Self {
        self.with_value("max_tags", ParamValue::from(max))
    }

    pub fn with_comments(self, enabled: bool) -> Self {
        self.with_value("comments", ParamValue::Flag(enabled))
    }

    pub fn with_summary(self, enabled: bool) -> Self {
        self.with_value("summary", ParamValue::Flag(enabled))
    }

    /// Include timing and page-type statistics.
    pub fn with_stats(self, enabled: bool) -> Self {
        self.with_value("stats", ParamValue::Flag(enabled))
    }
}

impl FrontpageParams {
    /// Upstream processing timeout, in milliseconds.
    pub fn with_timeout(self, millis: u64) -> Self {
        self.with_value("timeout", ParamValue::from(millis))
    }

    /// Response format, `"xml"` or `"json"`.
    pub fn with_format(self, format: impl Into<String>) -> Self {
        self.with_value("format", ParamValue::Text(format.into()))
    }

    /// Return all content from the page, not only the main items.
    pub fn with_all(self, enabled: bool) -> Self {
        self.with_value("all", ParamValue::Flag(enabled))
    }
}
