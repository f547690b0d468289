//! Publication fragments
//!
//! Externally-defined shapes returned by the publication store. The store
//! owns their wire encoding; the core only relies on the fields below.

use chesed_records::{Attribute, AttributeMap, ProfileId, RecordTag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A top-level publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub hidden: bool,
    pub author_id: ProfileId,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Post {
    /// The publication's semantic tag, if its `type` attribute parses
    pub fn tag(&self) -> Option<RecordTag> {
        AttributeMap::new(&self.attributes)
            .get("type")
            .and_then(RecordTag::parse)
    }
}

/// A publication attached under a parent post or another comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub hidden: bool,
    pub author_id: ProfileId,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Immediate parent publication (a post, or another comment)
    pub parent_id: String,
    /// The top-level post this comment thread hangs off. For a comment
    /// directly under a post the two ids coincide.
    pub main_post_id: String,
}

impl Comment {
    /// The publication's semantic tag, if its `type` attribute parses
    pub fn tag(&self) -> Option<RecordTag> {
        AttributeMap::new(&self.attributes)
            .get("type")
            .and_then(RecordTag::parse)
    }
}

/// Either shape, for fetch-by-id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Publication {
    Comment(Comment),
    Post(Post),
}

impl Publication {
    pub fn into_comment(self) -> Option<Comment> {
        match self {
            Publication::Comment(comment) => Some(comment),
            Publication::Post(_) => None,
        }
    }
}

/// Opaque reference to a collected publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationRef {
    pub id: String,
}

impl PublicationRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Filter for tag-based publication fetches.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Restrict to publications by this profile
    pub author: Option<ProfileId>,
    /// Page size hint for the store
    pub limit: Option<u32>,
}

impl PostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to publications authored by `author`
    pub fn by_author(author: ProfileId) -> Self {
        Self {
            author: Some(author),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a publication by `author_id` passes the author restriction
    pub fn matches_author(&self, author_id: &ProfileId) -> bool {
        self.author.as_ref().map_or(true, |author| author == author_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_comment_tag_parses_type_attribute() {
        let comment = Comment {
            id: "c-1".into(),
            created_at: Utc.timestamp_opt(100, 0).unwrap(),
            hidden: false,
            author_id: ProfileId::new("vol"),
            attributes: vec![Attribute::new("type", "VOLUNTEER_APPLY")],
            parent_id: "p-1".into(),
            main_post_id: "p-1".into(),
        };

        assert_eq!(comment.tag(), Some(RecordTag::VolunteerApply));
    }

    #[test]
    fn test_tag_is_none_for_untyped_publication() {
        let post = Post {
            id: "p-1".into(),
            created_at: Utc.timestamp_opt(100, 0).unwrap(),
            hidden: false,
            author_id: ProfileId::new("org"),
            attributes: vec![],
        };

        assert_eq!(post.tag(), None);
    }

    #[test]
    fn test_filter_author_restriction() {
        let filter = PostFilter::by_author(ProfileId::new("org")).with_limit(10);

        assert!(filter.matches_author(&ProfileId::new("org")));
        assert!(!filter.matches_author(&ProfileId::new("vol")));
        assert!(PostFilter::new().matches_author(&ProfileId::new("anyone")));
    }
}
