//! Attribute codec
//!
//! Pure decode functions from a publication's attribute list to a typed
//! record. Common checks run first (tag present and known, version present
//! and recognized for the expected variant, required fields non-empty),
//! then any variant-specific structural checks. Optional fields default to
//! `""` and never reject.

use chrono::{DateTime, Utc};

use crate::attribute::{Attribute, AttributeMap};
use crate::error::{InvalidMetadata, Result};
use crate::record::{
    ApplicationRecord, CauseRecord, GoalRecord, LogHoursRecord, OpportunityRecord, ProfileId,
    RecordHeader,
};
use crate::schema::{schema, RecordKind};
use crate::tag::RecordTag;

/// Decode the common header for an expected variant.
///
/// Runs the tag/version/required-field checks shared by every decoder.
fn decode_header(
    kind: RecordKind,
    publication_id: &str,
    created_at: DateTime<Utc>,
    author: ProfileId,
    attrs: &AttributeMap<'_>,
) -> Result<RecordHeader> {
    let tag_literal = attrs.get("type").ok_or(InvalidMetadata::MissingTag)?;
    let version = attrs.get("version").ok_or(InvalidMetadata::MissingVersion)?;

    let tag = RecordTag::parse(tag_literal)
        .ok_or_else(|| InvalidMetadata::UnknownTag(tag_literal.to_string()))?;

    let schema = schema(kind);
    if !schema.accepts_tag(tag) {
        return Err(InvalidMetadata::WrongKind { kind, tag });
    }
    if !schema.accepts_version(version) {
        return Err(InvalidMetadata::UnsupportedVersion {
            kind,
            version: version.to_string(),
        });
    }
    for field in schema.required {
        if attrs.get_or_empty(field).is_empty() {
            return Err(InvalidMetadata::MissingField { kind, field });
        }
    }

    Ok(RecordHeader {
        version: version.to_string(),
        tag,
        publication_id: publication_id.to_string(),
        created_at,
        author,
    })
}

/// Decode a strict boolean field: only the literals "true" and "false"
/// are accepted.
fn decode_bool(attrs: &AttributeMap<'_>, field: &'static str) -> Result<bool> {
    match attrs.get_or_empty(field) {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(InvalidMetadata::InvalidBool {
            field,
            value: other.to_string(),
        }),
    }
}

/// Decode an opportunity post into an [`OpportunityRecord`].
pub fn decode_opportunity(
    publication_id: &str,
    created_at: DateTime<Utc>,
    author: ProfileId,
    attributes: &[Attribute],
) -> Result<OpportunityRecord> {
    let attrs = AttributeMap::new(attributes);
    let header = decode_header(RecordKind::Opportunity, publication_id, created_at, author, &attrs)?;

    Ok(OpportunityRecord {
        header,
        opportunity_id: attrs.get_or_empty("id").to_string(),
        name: attrs.get_or_empty("name").to_string(),
        start_date: attrs.get_or_empty("startDate").to_string(),
        end_date: attrs.get_or_empty("endDate").to_string(),
        hours_per_week: attrs.get_or_empty("hoursPerWeek").to_string(),
        category: attrs.get_or_empty("category").to_string(),
        website: attrs.get_or_empty("website").to_string(),
        description: attrs.get_or_empty("description").to_string(),
        image_url: attrs.get_or_empty("imageUrl").to_string(),
        location: attrs.get_or_empty("location").to_string(),
    })
}

/// Decode a cause post into a [`CauseRecord`].
pub fn decode_cause(
    publication_id: &str,
    created_at: DateTime<Utc>,
    author: ProfileId,
    attributes: &[Attribute],
) -> Result<CauseRecord> {
    let attrs = AttributeMap::new(attributes);
    let header = decode_header(RecordKind::Cause, publication_id, created_at, author, &attrs)?;

    Ok(CauseRecord {
        header,
        cause_id: attrs.get_or_empty("id").to_string(),
        name: attrs.get_or_empty("name").to_string(),
        category: attrs.get_or_empty("category").to_string(),
        currency: attrs.get_or_empty("currency").to_string(),
        contribution: attrs.get_or_empty("contribution").to_string(),
        goal: attrs.get_or_empty("goal").to_string(),
        recipient: attrs.get_or_empty("recipient").to_string(),
        description: attrs.get_or_empty("description").to_string(),
        image_url: attrs.get_or_empty("imageUrl").to_string(),
        location: attrs.get_or_empty("location").to_string(),
    })
}

/// Decode an application comment into an [`ApplicationRecord`].
///
/// The `manual` review flag must be literally `"true"` or `"false"`; any
/// other literal rejects.
pub fn decode_application(
    publication_id: &str,
    created_at: DateTime<Utc>,
    author: ProfileId,
    attributes: &[Attribute],
) -> Result<ApplicationRecord> {
    let attrs = AttributeMap::new(attributes);
    let header = decode_header(RecordKind::Application, publication_id, created_at, author, &attrs)?;
    let manual = decode_bool(&attrs, "manual")?;

    Ok(ApplicationRecord {
        header,
        opportunity_id: attrs.get_or_empty("opportunityId").to_string(),
        description: attrs.get_or_empty("description").to_string(),
        resume: attrs.get_or_empty("resume").to_string(),
        manual,
    })
}

/// Decode an hour-log comment into a [`LogHoursRecord`].
pub fn decode_log_hours(
    publication_id: &str,
    created_at: DateTime<Utc>,
    author: ProfileId,
    attributes: &[Attribute],
) -> Result<LogHoursRecord> {
    let attrs = AttributeMap::new(attributes);
    let header = decode_header(RecordKind::LogHours, publication_id, created_at, author, &attrs)?;

    Ok(LogHoursRecord {
        header,
        opportunity_id: attrs.get_or_empty("opportunityId").to_string(),
        hours_to_verify: attrs.get_or_empty("hoursToVerify").to_string(),
        comments: attrs.get_or_empty("comments").to_string(),
    })
}

/// Decode a goal post into a [`GoalRecord`].
pub fn decode_goal(
    publication_id: &str,
    created_at: DateTime<Utc>,
    author: ProfileId,
    attributes: &[Attribute],
) -> Result<GoalRecord> {
    let attrs = AttributeMap::new(attributes);
    let header = decode_header(RecordKind::Goal, publication_id, created_at, author, &attrs)?;

    Ok(GoalRecord {
        header,
        goal: attrs.get_or_empty("goal").to_string(),
        goal_date: attrs.get_or_empty("goalDate").to_string(),
    })
}
