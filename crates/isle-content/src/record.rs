//! Wire records returned by the Content Island API.
//!
//! The service returns each content entry as a list of per-language fields.
//! [`ContentRecord::into_model`] flattens the fields of one language into an
//! object and deserializes it into a model type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ContentError;
use crate::types::Language;

/// Content entry as returned by the service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Record identifier.
    pub id: String,
    /// Content type reference.
    pub content_type: ContentTypeRef,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    /// Field values, one entry per (field, language).
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// Content type reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContentTypeRef {
    /// Content type identifier.
    pub id: String,
    /// Content type name (e.g., "Folder").
    pub name: String,
}

/// Single field value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field identifier.
    pub id: String,
    /// Field name as used by the model (e.g., "slug").
    pub name: String,
    /// Field value.
    #[serde(default)]
    pub value: Value,
    /// Field type in the service schema.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Whether the value is a list.
    #[serde(default)]
    pub is_array: bool,
    /// Language tag of this value.
    pub language: String,
}

impl ContentRecord {
    /// Create a record with no fields.
    #[must_use]
    pub fn new(id: impl Into<String>, content_type: &str) -> Self {
        Self {
            id: id.into(),
            content_type: ContentTypeRef {
                id: content_type.to_ascii_lowercase(),
                name: content_type.to_owned(),
            },
            last_update: None,
            fields: Vec::new(),
        }
    }

    /// Add an English field value.
    #[must_use]
    pub fn with_field(self, name: &str, value: impl Into<Value>) -> Self {
        self.with_localized_field(name, value, Language::En.as_str())
    }

    /// Add a field value for the given language tag.
    #[must_use]
    pub fn with_localized_field(
        mut self,
        name: &str,
        value: impl Into<Value>,
        language: &str,
    ) -> Self {
        let value = value.into();
        let is_array = value.is_array();
        self.fields.push(Field {
            id: format!("{}-{name}", self.id),
            name: name.to_owned(),
            field_type: if is_array { "reference" } else { "text" }.to_owned(),
            is_array,
            value,
            language: language.to_owned(),
        });
        self
    }

    /// Look up a field value by name and language tag.
    #[must_use]
    pub fn field(&self, name: &str, language: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name && f.language == language)
            .map(|f| &f.value)
    }

    /// Flatten the fields of `language` and deserialize them into `T`.
    ///
    /// The flattened object always carries `id` and `language`; each field of
    /// the requested language becomes a property named after the field.
    pub fn into_model<T: DeserializeOwned>(self, language: Language) -> Result<T, ContentError> {
        let tag = language.as_str();
        let mut object = Map::with_capacity(self.fields.len() + 2);
        object.insert("id".to_owned(), Value::String(self.id.clone()));
        object.insert("language".to_owned(), Value::String(tag.to_owned()));
        for field in self.fields {
            if field.language == tag {
                object.insert(field.name, field.value);
            }
        }

        serde_json::from_value(Value::Object(object)).map_err(|source| ContentError::Mapping {
            id: self.id,
            model: std::any::type_name::<T>()
                .rsplit("::")
                .next()
                .unwrap_or("model"),
            source,
        })
    }
}
