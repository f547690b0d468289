//! Chesed Records - Typed volunteer records over generic publications
//!
//! The external publication store knows nothing about volunteering: every
//! post and comment carries an opaque, unordered attribute list of
//! `(traitType, value, displayType)` triples. This crate reconstructs the
//! typed domain from those lists.
//!
//! ## Core Concepts
//!
//! 1. **Attribute model** - the wire-level key/value triple and an index
//!    over a publication's attribute list
//! 2. **Tags** - the enumerated strings classifying a publication's
//!    semantic role, namespaced by direction (org-published,
//!    volunteer-submitted, org-response)
//! 3. **Schema registry** - a static table mapping each record variant to
//!    its accepted tags, recognized versions and required fields
//! 4. **Codec** - pure decode functions turning an attribute list into a
//!    validated record, or an [`InvalidMetadata`] rejection
//! 5. **Recency resolver** - "an edit is a new post with the same
//!    application-level id; the newest post wins"
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chesed_records::{decode_opportunity, most_recent, ProfileId};
//!
//! let record = decode_opportunity(&post.id, post.created_at, post.author_id, &post.attributes)?;
//!
//! // Collapse republished edits down to the authoritative version
//! let current = most_recent(records);
//! ```

pub mod attribute;
pub mod codec;
pub mod error;
pub mod recency;
pub mod record;
pub mod schema;
pub mod tag;

// Re-export the attribute model
pub use attribute::{Attribute, AttributeMap, DisplayType};

// Re-export decode entry points
pub use codec::{
    decode_application, decode_cause, decode_goal, decode_log_hours, decode_opportunity,
};

// Re-export record types
pub use record::{
    ApplicationRecord, CauseRecord, GoalRecord, LogHoursRecord, OpportunityRecord, ProfileId,
    RecordHeader, UpdateableRecord,
};

// Re-export registry types
pub use schema::{schema, RecordKind, Schema};

// Re-export tags
pub use tag::{Direction, RecordTag};

// Re-export resolver and errors
pub use error::{InvalidMetadata, Result};
pub use recency::most_recent;
