//! Content model types.
//!
//! Records are flattened from the service's field lists (see
//! [`ContentRecord::into_model`](crate::ContentRecord::into_model)) and
//! deserialized into these structs.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Content language. The site supports a single locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
}

impl Language {
    /// Language tag as used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            other => Err(ContentError::UnsupportedLanguage(other.to_owned())),
        }
    }
}

/// A content type the accessors know how to fetch.
pub trait Entity: DeserializeOwned + Send {
    /// Content type name in the service.
    const CONTENT_TYPE: &'static str;

    /// Record identifier.
    fn id(&self) -> &str;
}

/// Singleton listing the top-level navigation folders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Root {
    /// Record identifier.
    pub id: String,
    /// Content language.
    pub language: Language,
    /// Ordered folder identifiers.
    #[serde(default)]
    pub folders: Vec<String>,
}

/// Named grouping of items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Record identifier.
    pub id: String,
    /// Content language.
    pub language: Language,
    /// Display title.
    pub title: String,
    /// URL slug, unique among folders.
    pub slug: String,
    /// Ordered item identifiers. `None` means the folder has no items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

/// Leaf content record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Record identifier.
    pub id: String,
    /// Content language.
    pub language: Language,
    /// Display title.
    pub title: String,
    /// URL slug, unique among items.
    pub slug: String,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Markdown body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Entity for Root {
    const CONTENT_TYPE: &'static str = "Root";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Folder {
    const CONTENT_TYPE: &'static str = "Folder";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Item {
    const CONTENT_TYPE: &'static str = "Item";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Folder with its item identifiers resolved to records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationFolder {
    /// Folder identifier.
    pub id: String,
    /// Content language.
    pub language: Language,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Resolved items. Identifiers that did not resolve are dropped.
    pub items: Vec<Item>,
}

impl NavigationFolder {
    /// Combine a folder with its resolved items.
    #[must_use]
    pub fn new(folder: Folder, items: Vec<Item>) -> Self {
        Self {
            id: folder.id,
            language: folder.language,
            title: folder.title,
            slug: folder.slug,
            items,
        }
    }
}

/// Denormalized folder tree for site navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Navigation {
    /// Folders in navigation order.
    pub folders: Vec<NavigationFolder>,
}

impl Navigation {
    /// Navigation with no folders.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if there is nothing to navigate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}
