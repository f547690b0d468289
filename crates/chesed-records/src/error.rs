//! Error types for record decoding

use thiserror::Error;

use crate::schema::RecordKind;
use crate::tag::RecordTag;

/// Result type for decode operations
pub type Result<T> = std::result::Result<T, InvalidMetadata>;

/// Structural decode failure.
///
/// Always recoverable: callers skip the offending publication and continue,
/// logging the publication id and the reason. Variants carry the offending
/// literal where one exists, for diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidMetadata {
    /// No `type` attribute on the publication
    #[error("missing type attribute")]
    MissingTag,

    /// No `version` attribute on the publication
    #[error("missing version attribute")]
    MissingVersion,

    /// `type` attribute outside the tag enumeration
    #[error("unknown tag: {0:?}")]
    UnknownTag(String),

    /// Tag is valid but not accepted by the expected variant
    #[error("tag {tag} does not decode as {kind}")]
    WrongKind { kind: RecordKind, tag: RecordTag },

    /// `version` attribute outside the variant's recognized set
    #[error("unsupported {kind} version: {version:?}")]
    UnsupportedVersion { kind: RecordKind, version: String },

    /// A boolean field whose literal is neither "true" nor "false"
    #[error("field {field:?} is not a boolean literal: {value:?}")]
    InvalidBool { field: &'static str, value: String },

    /// A required field absent or empty
    #[error("{kind} is missing required field {field:?}")]
    MissingField { kind: RecordKind, field: &'static str },
}
