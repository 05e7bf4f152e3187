//! Content query filters.
//!
//! A [`ContentQuery`] renders to the query string understood by the
//! `/content` and `/contents` endpoints:
//!
//! | filter            | query string                |
//! |-------------------|-----------------------------|
//! | content type      | `contentType=Folder`        |
//! | identifier        | `id=abc`                    |
//! | identifier set    | `id[in]=abc,def`            |
//! | field match       | `fields.slug=getting-started` |
//! | language          | `language=en`               |

use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

use crate::record::ContentRecord;
use crate::types::Language;

/// Characters escaped in query values (RFC 3986 unreserved are kept).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Identifier filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdFilter {
    /// Exact identifier.
    Eq(String),
    /// Identifier is one of the set.
    In(Vec<String>),
}

/// Filter for content lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentQuery {
    content_type: Option<String>,
    id: Option<IdFilter>,
    fields: Vec<(String, String)>,
    language: Option<Language>,
}

impl ContentQuery {
    /// Create an empty query (matches everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a content type.
    #[must_use]
    pub fn content_type(mut self, name: impl Into<String>) -> Self {
        self.content_type = Some(name.into());
        self
    }

    /// Match a single identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(IdFilter::Eq(id.into()));
        self
    }

    /// Match any identifier in the set.
    #[must_use]
    pub fn ids_in(mut self, ids: &[String]) -> Self {
        self.id = Some(IdFilter::In(ids.to_vec()));
        self
    }

    /// Require a field to equal a value.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Read field values in the given language.
    #[must_use]
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Content type filter, if any.
    #[must_use]
    pub fn content_type_filter(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Identifier filter, if any.
    #[must_use]
    pub fn id_filter(&self) -> Option<&IdFilter> {
        self.id.as_ref()
    }

    /// Render as a URL query string (without the leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        let mut push = |key: &str, value: &str| {
            if !out.is_empty() {
                out.push('&');
            }
            write!(out, "{key}={value}").unwrap();
        };

        if let Some(content_type) = &self.content_type {
            push("contentType", &encode(content_type));
        }
        match &self.id {
            Some(IdFilter::Eq(id)) => push("id", &encode(id)),
            Some(IdFilter::In(ids)) => {
                let joined = ids
                    .iter()
                    .map(String::as_str)
                    .map(encode)
                    .collect::<Vec<_>>()
                    .join(",");
                push("id[in]", &joined);
            }
            None => {}
        }
        for (name, value) in &self.fields {
            push(&format!("fields.{}", encode(name)), &encode(value));
        }
        if let Some(language) = self.language {
            push("language", language.as_str());
        }

        out
    }

    /// Check whether a record satisfies every filter of this query.
    ///
    /// Field filters compare against the value in the query language
    /// (English when unset); non-string values never match.
    #[must_use]
    pub fn matches(&self, record: &ContentRecord) -> bool {
        if let Some(content_type) = &self.content_type
            && record.content_type.name != *content_type
        {
            return false;
        }
        match &self.id {
            Some(IdFilter::Eq(id)) if record.id != *id => return false,
            Some(IdFilter::In(ids)) if !ids.contains(&record.id) => return false,
            _ => {}
        }
        let language = self.language.unwrap_or_default().as_str();
        self.fields.iter().all(|(name, expected)| {
            matches!(
                record.field(name, language),
                Some(Value::String(actual)) if actual == expected
            )
        })
    }
}

impl std::fmt::Display for ContentQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}
