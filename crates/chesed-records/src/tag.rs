//! Publication tags
//!
//! Every publication in the volunteering domain is classified by an
//! enumerated `type` attribute. Tags are namespaced by direction: who is
//! speaking (an organization publishing work, a volunteer submitting, or an
//! organization responding to a submission).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the conversation a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Organization publishes work (opportunities, causes, goals)
    OrgPublished,
    /// Volunteer submits (applications, hour logs)
    VolunteerSubmitted,
    /// Organization responds to a submission (accept/reject)
    OrgResponse,
}

/// Enumerated publication tag.
///
/// The string forms are wire-stable: they are what the external store
/// filters on and what lands in the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordTag {
    #[serde(rename = "ORG_PUBLISH_OPPORTUNITY")]
    OrgPublishOpportunity,
    #[serde(rename = "ORG_PUBLISH_CAUSE")]
    OrgPublishCause,
    #[serde(rename = "ORG_PUBLISH_GOAL")]
    OrgPublishGoal,
    #[serde(rename = "VOLUNTEER_APPLY")]
    VolunteerApply,
    #[serde(rename = "VOLUNTEER_LOG_HOURS")]
    VolunteerLogHours,
    #[serde(rename = "ORG_ACCEPT")]
    OrgAccept,
    #[serde(rename = "ORG_REJECT")]
    OrgReject,
}

impl RecordTag {
    /// The wire string for this tag
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordTag::OrgPublishOpportunity => "ORG_PUBLISH_OPPORTUNITY",
            RecordTag::OrgPublishCause => "ORG_PUBLISH_CAUSE",
            RecordTag::OrgPublishGoal => "ORG_PUBLISH_GOAL",
            RecordTag::VolunteerApply => "VOLUNTEER_APPLY",
            RecordTag::VolunteerLogHours => "VOLUNTEER_LOG_HOURS",
            RecordTag::OrgAccept => "ORG_ACCEPT",
            RecordTag::OrgReject => "ORG_REJECT",
        }
    }

    /// Parse a wire string into a tag, `None` for anything outside the
    /// enumeration
    pub fn parse(literal: &str) -> Option<Self> {
        match literal {
            "ORG_PUBLISH_OPPORTUNITY" => Some(RecordTag::OrgPublishOpportunity),
            "ORG_PUBLISH_CAUSE" => Some(RecordTag::OrgPublishCause),
            "ORG_PUBLISH_GOAL" => Some(RecordTag::OrgPublishGoal),
            "VOLUNTEER_APPLY" => Some(RecordTag::VolunteerApply),
            "VOLUNTEER_LOG_HOURS" => Some(RecordTag::VolunteerLogHours),
            "ORG_ACCEPT" => Some(RecordTag::OrgAccept),
            "ORG_REJECT" => Some(RecordTag::OrgReject),
            _ => None,
        }
    }

    /// The direction namespace this tag belongs to
    pub fn direction(&self) -> Direction {
        match self {
            RecordTag::OrgPublishOpportunity
            | RecordTag::OrgPublishCause
            | RecordTag::OrgPublishGoal => Direction::OrgPublished,
            RecordTag::VolunteerApply | RecordTag::VolunteerLogHours => {
                Direction::VolunteerSubmitted
            }
            RecordTag::OrgAccept | RecordTag::OrgReject => Direction::OrgResponse,
        }
    }
}

impl fmt::Display for RecordTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for tag in [
            RecordTag::OrgPublishOpportunity,
            RecordTag::OrgPublishCause,
            RecordTag::OrgPublishGoal,
            RecordTag::VolunteerApply,
            RecordTag::VolunteerLogHours,
            RecordTag::OrgAccept,
            RecordTag::OrgReject,
        ] {
            assert_eq!(RecordTag::parse(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(RecordTag::parse("ORG_PUBLISH_RAFFLE"), None);
        assert_eq!(RecordTag::parse(""), None);
    }

    #[test]
    fn test_directions() {
        assert_eq!(
            RecordTag::OrgPublishOpportunity.direction(),
            Direction::OrgPublished
        );
        assert_eq!(
            RecordTag::VolunteerApply.direction(),
            Direction::VolunteerSubmitted
        );
        assert_eq!(RecordTag::OrgAccept.direction(), Direction::OrgResponse);
        assert_eq!(RecordTag::OrgReject.direction(), Direction::OrgResponse);
    }

    #[test]
    fn test_serde_uses_wire_strings() {
        let json = serde_json::to_string(&RecordTag::VolunteerApply).unwrap();
        assert_eq!(json, "\"VOLUNTEER_APPLY\"");
    }
}
