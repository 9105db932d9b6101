//! Request options and their flattening into query parameters.
//!
//! Every resource type declares a static schema of [`FieldSpec`]s. A
//! [`RequestParams`] value only ever holds fields from that schema, so
//! flattening is a lookup of the upstream name plus a per-kind transform:
//!
//! | kind      | transform                                   |
//! |-----------|---------------------------------------------|
//! | `Text`    | sent as-is                                  |
//! | `Integer` | decimal                                     |
//! | `Flag`    | `true` → `"1"`, `false` → omitted           |
//! | `List`    | comma-joined, an empty list is omitted      |
//!
//! # Example
//!
//! ```rust
//! use diffbot_core::resources::ArticleParams;
//!
//! let mut params = ArticleParams::new().with_max_tags(10);
//! params.set("fields", vec!["title", "text"]).unwrap();
//!
//! let query = params.to_query_params();
//! assert_eq!(query["maxTags"], "10");
//! assert_eq!(query["fields"], "title,text");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AppError;

/// The kind of value a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Integer,
    Flag,
    List,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "string",
            FieldKind::Integer => "integer",
            FieldKind::Flag => "boolean",
            FieldKind::List => "list",
        };
        f.write_str(name)
    }
}

/// One recognized option of a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name used on the Rust side (`max_tags`).
    pub name: &'static str,
    /// Upstream query parameter, case-sensitive (`maxTags`).
    pub param: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, param: &'static str, kind: FieldKind) -> Self {
        Self { name, param, kind }
    }
}

/// A value stored in a [`RequestParams`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Integer(i64),
    Text(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            ParamValue::Text(_) => FieldKind::Text,
            ParamValue::Integer(_) => FieldKind::Integer,
            ParamValue::Flag(_) => FieldKind::Flag,
            ParamValue::List(_) => FieldKind::List,
        }
    }

    /// The query-string form of this value, or `None` when it is not sent.
    pub fn to_query_value(&self) -> Option<String> {
        match self {
            ParamValue::Text(s) => Some(s.clone()),
            ParamValue::Integer(n) => Some(n.to_string()),
            ParamValue::Flag(true) => Some("1".to_string()),
            ParamValue::Flag(false) => None,
            ParamValue::List(items) if items.is_empty() => None,
            ParamValue::List(items) => Some(items.join(",")),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

macro_rules! integer_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    ParamValue::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        ParamValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ParamValue {
    fn from(value: &[&str]) -> Self {
        ParamValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

/// A category of extraction target with its own endpoint and option schema.
pub trait Resource: Sized + 'static {
    /// Short name used in errors and logs.
    const NAME: &'static str;

    /// Path of the endpoint below the API base URL.
    const PATH: &'static str;

    /// Recognized options.
    const FIELDS: &'static [FieldSpec];

    /// The defaults slot for this resource on a [`Config`].
    fn defaults(config: &Config) -> &RequestParams<Self>;

    fn defaults_mut(config: &mut Config) -> &mut RequestParams<Self>;

    /// Full endpoint URL below `base_url`.
    fn endpoint(base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), Self::PATH)
    }

    /// Look up a field by its Rust-side name or its upstream parameter name.
    fn field(name: &str) -> Option<&'static FieldSpec> {
        Self::FIELDS
            .iter()
            .find(|spec| spec.name == name || spec.param == name)
    }
}

/// The explicitly-set options of one request against resource `R`.
pub struct RequestParams<R: Resource> {
    values: BTreeMap<&'static str, ParamValue>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> RequestParams<R> {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            _resource: PhantomData,
        }
    }

    /// Set a field by name.
    ///
    /// Fails with [`AppError::UnknownField`] when `R` does not declare the
    /// field, and with [`AppError::InvalidFieldValue`] when the value kind
    /// does not match. The container is untouched on failure.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<ParamValue>,
    ) -> Result<&mut Self, AppError> {
        let spec = R::field(name).ok_or_else(|| AppError::UnknownField {
            resource: R::NAME,
            field: name.to_string(),
        })?;

        let value = value.into();
        if value.kind() != spec.kind {
            return Err(AppError::InvalidFieldValue {
                field: spec.name,
                expected: spec.kind,
            });
        }

        self.values.insert(spec.name, value);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        R::field(name).and_then(|spec| self.values.get(spec.name))
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Forget a field so it is neither sent nor applied on merge.
    pub fn unset(&mut self, name: &str) -> Option<ParamValue> {
        R::field(name).and_then(|spec| self.values.remove(spec.name))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flatten into upstream parameter name → value. Unset fields are absent.
    pub fn to_query_params(&self) -> BTreeMap<String, String> {
        R::FIELDS
            .iter()
            .filter_map(|spec| {
                let value = self.values.get(spec.name)?.to_query_value()?;
                Some((spec.param.to_string(), value))
            })
            .collect()
    }

    /// A new value with every field set in `overrides` replacing ours.
    pub fn merge(&self, overrides: &Self) -> Self {
        let mut merged = self.clone();
        merged
            .values
            .extend(overrides.values.iter().map(|(name, value)| (*name, value.clone())));
        merged
    }

    /// Infallible insert for the typed setters; `name` must be in the schema.
    pub(crate) fn with_value(mut self, name: &'static str, value: ParamValue) -> Self {
        debug_assert!(
            R::FIELDS
                .iter()
                .any(|spec| spec.name == name && spec.kind == value.kind()),
            "{name} is not a {} field of kind {}",
            R::NAME,
            value.kind()
        );
        self.values.insert(name, value);
        self
    }
}

impl<R: Resource> Default for RequestParams<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> Clone for RequestParams<R> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> PartialEq for RequestParams<R> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<R: Resource> fmt::Debug for RequestParams<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestParams")
            .field("resource", &R::NAME)
            .field("values", &self.values)
            .finish()
    }
}
