//! Record types
//!
//! Records are immutable value objects constructed once per decode. Every
//! variant shares a [`RecordHeader`]; dispatch happens on tag + version at
//! decode time, not through a subclass hierarchy.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tag::RecordTag;

/// Opaque reference to a profile in the external store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Fields shared by every record variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHeader {
    /// Schema version the publication was written against
    pub version: String,
    /// The publication's semantic tag
    pub tag: RecordTag,
    /// Publication id; changes on every republished edit
    pub publication_id: String,
    /// Publication creation time
    pub created_at: DateTime<Utc>,
    /// Authoring profile
    pub author: ProfileId,
}

/// A record whose logical identity persists across republished edits.
///
/// Only the newest edit is authoritative; see [`crate::most_recent`].
pub trait UpdateableRecord {
    /// The application-assigned identity key, stable across edits
    fn identity(&self) -> &str;

    /// Creation time of the backing publication
    fn created_at(&self) -> DateTime<Utc>;
}

/// A volunteering opportunity published by an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityRecord {
    pub header: RecordHeader,
    /// Application-assigned id, distinct from the publication id
    pub opportunity_id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub hours_per_week: String,
    pub category: String,
    pub website: String,
    pub description: String,
    pub image_url: String,
    pub location: String,
}

impl UpdateableRecord for OpportunityRecord {
    fn identity(&self) -> &str {
        &self.opportunity_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.header.created_at
    }
}

/// A fundraising cause published by an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseRecord {
    pub header: RecordHeader,
    /// Application-assigned id, distinct from the publication id
    pub cause_id: String,
    pub name: String,
    pub category: String,
    pub currency: String,
    pub contribution: String,
    pub goal: String,
    pub recipient: String,
    pub description: String,
    pub image_url: String,
    pub location: String,
}

impl UpdateableRecord for CauseRecord {
    fn identity(&self) -> &str {
        &self.cause_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.header.created_at
    }
}

/// A volunteer's application to an opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub header: RecordHeader,
    /// Parent opportunity reference
    pub opportunity_id: String,
    pub description: String,
    /// Reference to an uploaded resume, if any
    pub resume: String,
    /// Whether the organization reviews this application manually
    pub manual: bool,
}

/// A volunteer's request to have completed hours verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogHoursRecord {
    pub header: RecordHeader,
    /// Parent opportunity reference
    pub opportunity_id: String,
    pub hours_to_verify: String,
    pub comments: String,
}

/// An organization's published goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub header: RecordHeader,
    pub goal: String,
    pub goal_date: String,
}
