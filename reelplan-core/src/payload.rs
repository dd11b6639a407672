//! Decoding the producer's storyboard payload.
//!
//! The payload has no version field and comes from an upstream generator that
//! is not always well behaved. Decoding is therefore tolerant at the field
//! level: missing fields, `null`s and wrongly typed scalars become empty values
//! instead of errors, and list entries that cannot be decoded are dropped.
//! Only a payload that is not JSON, or whose top level is not an object, is
//! rejected.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::model::{Storyboard, VisualKind};

/// Reasons a payload cannot become a storyboard.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("payload does not describe a storyboard: {0}")]
    Shape(#[source] serde_json::Error),
    #[error("payload top level must be an object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("cannot read payload {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Storyboard {
    /// Decodes a storyboard from the producer's JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Syntax`] for malformed JSON and
    /// [`PayloadError::NotAnObject`] when the top level is not an object.
    pub fn from_json_str(json: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(json).map_err(PayloadError::Syntax)?;
        Self::from_json_value(value)
    }

    /// Decodes a storyboard from an already parsed JSON value.
    pub fn from_json_value(value: Value) -> Result<Self, PayloadError> {
        if !value.is_object() {
            return Err(PayloadError::NotAnObject {
                found: kind_name(&value),
            });
        }
        let mut storyboard: Storyboard =
            serde_json::from_value(value).map_err(PayloadError::Shape)?;
        storyboard.assign_ids();
        tracing::debug!(
            segments = storyboard.segments().len(),
            title = %storyboard.title,
            "decoded storyboard payload"
        );
        Ok(storyboard)
    }

    /// Reads and decodes a storyboard JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Io`] when the file cannot be read, otherwise the
    /// errors of [`Storyboard::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PayloadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| PayloadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

/// Accepts any JSON value for a string field: strings pass through, `null`
/// becomes empty, other scalars use their JSON text.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => String::new(),
        other => other.to_string(),
    })
}

/// Like [`lenient_string`] for optional fields: `null`, arrays and objects
/// become `None`.
pub(crate) fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
        other => Some(other.to_string()),
    })
}

/// A list whose entries are decoded one by one. Entries that fail to decode
/// are dropped; anything other than an array is an empty list.
pub(crate) fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            tracing::warn!(
                found = kind_name(&other),
                "expected a list in payload; treating as empty"
            );
            return Ok(Vec::new());
        }
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::warn!(error = %err, "dropping undecodable payload entry");
                None
            }
        })
        .collect())
}

/// A list of strings where non-string entries are dropped.
pub(crate) fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Maps the `type` field onto [`VisualKind`] without failing on odd values.
pub(crate) fn lenient_kind<'de, D>(deserializer: D) -> Result<VisualKind, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value.as_str() {
        Some("clip") => VisualKind::Clip,
        Some("concept") => VisualKind::Concept,
        _ => VisualKind::Other,
    })
}
