//! Record schema registry
//!
//! A static table mapping each record variant to the tags it may carry,
//! the schema versions it recognizes, and the fields that must be present
//! and non-empty. The codec dispatches through this registry only; adding
//! a variant or version is a new registry row, never a change to the join
//! logic downstream.

use std::fmt;

use crate::tag::RecordTag;

/// The record variants this domain knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Opportunity,
    Cause,
    Application,
    LogHours,
    Goal,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Opportunity => "opportunity",
            RecordKind::Cause => "cause",
            RecordKind::Application => "application",
            RecordKind::LogHours => "log-hours",
            RecordKind::Goal => "goal",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registry row: what a variant accepts and what it requires.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub kind: RecordKind,
    /// Tags that dispatch to this variant
    pub tags: &'static [RecordTag],
    /// Recognized schema versions
    pub versions: &'static [&'static str],
    /// Fields that must be present and non-empty after decode
    pub required: &'static [&'static str],
}

impl Schema {
    pub fn accepts_tag(&self, tag: RecordTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn accepts_version(&self, version: &str) -> bool {
        self.versions.contains(&version)
    }
}

/// Versions currently recognized across all variants.
pub const SUPPORTED_VERSIONS: &[&str] = &["1.0.0", "1.0.1"];

const OPPORTUNITY: Schema = Schema {
    kind: RecordKind::Opportunity,
    tags: &[RecordTag::OrgPublishOpportunity],
    versions: SUPPORTED_VERSIONS,
    // The application-assigned id is the identity key across edits
    required: &["id", "name"],
};

const CAUSE: Schema = Schema {
    kind: RecordKind::Cause,
    tags: &[RecordTag::OrgPublishCause],
    versions: SUPPORTED_VERSIONS,
    required: &["id", "name"],
};

const APPLICATION: Schema = Schema {
    kind: RecordKind::Application,
    tags: &[RecordTag::VolunteerApply],
    versions: SUPPORTED_VERSIONS,
    required: &[],
};

const LOG_HOURS: Schema = Schema {
    kind: RecordKind::LogHours,
    tags: &[RecordTag::VolunteerLogHours],
    versions: SUPPORTED_VERSIONS,
    required: &[],
};

const GOAL: Schema = Schema {
    kind: RecordKind::Goal,
    tags: &[RecordTag::OrgPublishGoal],
    versions: SUPPORTED_VERSIONS,
    required: &[],
};

/// Look up the registry row for a variant
pub fn schema(kind: RecordKind) -> &'static Schema {
    match kind {
        RecordKind::Opportunity => &OPPORTUNITY,
        RecordKind::Cause => &CAUSE,
        RecordKind::Application => &APPLICATION,
        RecordKind::LogHours => &LOG_HOURS,
        RecordKind::Goal => &GOAL,
    }
}
