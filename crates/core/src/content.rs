//! Typed content-field model for contributions.
//!
//! A contribution's body is a map of known field keys to values. The field
//! set is a closed enum rather than an open string-keyed dictionary, so a
//! typo in a field key is rejected at the API boundary instead of being
//! silently stored as a new key.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The fixed set of editable content fields on a contribution.
///
/// Every field holds free text except [`ContentField::References`], which
/// holds a list of `http(s)` links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentField {
    Problem,
    Solution,
    Impact,
    Description,
    Resources,
    References,
}

impl ContentField {
    /// All known content fields, in display order.
    pub const ALL: &'static [ContentField] = &[
        ContentField::Problem,
        ContentField::Solution,
        ContentField::Impact,
        ContentField::Description,
        ContentField::Resources,
        ContentField::References,
    ];

    /// The database / API string form of the field key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentField::Problem => "problem",
            ContentField::Solution => "solution",
            ContentField::Impact => "impact",
            ContentField::Description => "description",
            ContentField::Resources => "resources",
            ContentField::References => "references",
        }
    }

    /// Parse a field key received at the API boundary.
    pub fn parse(key: &str) -> Result<Self, CoreError> {
        ContentField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown content field '{key}'. Must be one of: {}",
                    ContentField::ALL
                        .iter()
                        .map(|f| f.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }

    /// Whether the field holds a list of links rather than text.
    pub fn is_list(&self) -> bool {
        matches!(self, ContentField::References)
    }
}

/// A validated value for a content field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Links(Vec<String>),
}

impl FieldValue {
    /// Parse and validate a raw JSON value for the given field.
    ///
    /// Text fields require a non-empty string; the `references` field
    /// requires a non-empty array of `http://` or `https://` links.
    pub fn from_json(field: ContentField, value: &serde_json::Value) -> Result<Self, CoreError> {
        if field.is_list() {
            let items = value.as_array().ok_or_else(|| {
                CoreError::Validation(format!(
                    "Field '{}' must be an array of links",
                    field.as_str()
                ))
            })?;
            if items.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Field '{}' must not be empty",
                    field.as_str()
                )));
            }
            let mut links = Vec::with_capacity(items.len());
            for item in items {
                let link = item
                    .as_str()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| {
                        CoreError::Validation(format!(
                            "Field '{}' must contain only non-empty strings",
                            field.as_str()
                        ))
                    })?;
                if !is_valid_link(link) {
                    return Err(CoreError::Validation(format!(
                        "'{link}' is not a valid http(s) URL"
                    )));
                }
                links.push(link.to_string());
            }
            Ok(FieldValue::Links(links))
        } else {
            let text = value.as_str().ok_or_else(|| {
                CoreError::Validation(format!("Field '{}' must be a string", field.as_str()))
            })?;
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Field '{}' must not be empty",
                    field.as_str()
                )));
            }
            Ok(FieldValue::Text(trimmed.to_string()))
        }
    }

    /// Convert back to the JSON form stored in the contribution's content map.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Text(text) => serde_json::Value::String(text.clone()),
            FieldValue::Links(links) => serde_json::Value::Array(
                links
                    .iter()
                    .map(|l| serde_json::Value::String(l.clone()))
                    .collect(),
            ),
        }
    }

    /// Normalized form used for equality checks.
    ///
    /// Link lists are compared order-insensitively, so a reordering of the
    /// same references is not treated as a change.
    pub fn normalized(&self) -> FieldValue {
        match self {
            FieldValue::Text(text) => FieldValue::Text(text.trim().to_string()),
            FieldValue::Links(links) => {
                let mut sorted = links.clone();
                sorted.sort();
                FieldValue::Links(sorted)
            }
        }
    }
}

/// Whether two field values are equivalent after normalization.
pub fn values_equivalent(a: &FieldValue, b: &FieldValue) -> bool {
    a.normalized() == b.normalized()
}

/// Minimal link check: the original client only ever stored absolute
/// http(s) URLs, so anything else is rejected outright.
fn is_valid_link(link: &str) -> bool {
    let rest = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
}
