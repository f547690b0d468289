//! Wire-level attribute model
//!
//! Publications carry their payload as an unordered list of
//! `(traitType, value, displayType)` triples. The encoding of that list is
//! owned by the external store; this module only gives it a typed shape and
//! an index for key lookups.

use serde::{Deserialize, Serialize};

/// A single key/value attribute on a post or comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Attribute key, unique within one publication
    pub trait_type: String,
    /// Raw string value; typed interpretation happens at decode time
    pub value: String,
    /// Rendering hint, opaque to the codec
    #[serde(default)]
    pub display_type: DisplayType,
}

impl Attribute {
    /// Create a plain string attribute
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
            display_type: DisplayType::String,
        }
    }

    /// Override the display type
    pub fn with_display(mut self, display_type: DisplayType) -> Self {
        self.display_type = display_type;
        self
    }
}

/// Rendering hint attached to an attribute.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    #[default]
    String,
    Number,
    Date,
}

/// Borrowed key index over a publication's attribute list.
///
/// Keys are unique within one publication; if the store ever hands us a
/// duplicate, the first occurrence wins. Absence of a key is a valid
/// "empty string" default for optional fields, so lookups never fail.
#[derive(Debug, Clone, Copy)]
pub struct AttributeMap<'a> {
    entries: &'a [Attribute],
}

impl<'a> AttributeMap<'a> {
    pub fn new(entries: &'a [Attribute]) -> Self {
        Self { entries }
    }

    /// Look up an attribute value by key
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|attr| attr.trait_type == key)
            .map(|attr| attr.value.as_str())
    }

    /// Look up an optional field, defaulting to `""` when absent
    pub fn get_or_empty(&self, key: &str) -> &'a str {
        self.get(key).unwrap_or("")
    }
}
