//! In-memory publication store for integration tests
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chesed_records::{Attribute, ProfileId, RecordTag};
use chesed_reconcile::{
    Comment, Post, PostFilter, Publication, PublicationRef, PublicationStore, StoreError,
    StoreResult,
};
use chrono::{DateTime, TimeZone, Utc};

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// In-memory store: posts, comment adjacency, collect events, plus an
/// injectable failure for the next call.
#[derive(Default)]
pub struct MemoryStore {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    collects: Vec<(ProfileId, PublicationRef)>,
    failure: Mutex<Option<StoreError>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_post(&mut self, post: Post) {
        self.posts.push(post);
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub fn add_collect(&mut self, collector: &ProfileId, publication_id: &str) {
        self.collects
            .push((collector.clone(), PublicationRef::new(publication_id)));
    }

    /// Make the next store call fail with `error`
    pub fn fail_next(&self, error: StoreError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    fn take_failure(&self) -> StoreResult<()> {
        match self.failure.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PublicationStore for MemoryStore {
    async fn publications_by_tags(
        &self,
        tags: &[RecordTag],
        filter: &PostFilter,
    ) -> StoreResult<Vec<Publication>> {
        self.take_failure()?;

        let mut matches: Vec<Publication> = Vec::new();
        for post in &self.posts {
            if post.tag().is_some_and(|tag| tags.contains(&tag))
                && filter.matches_author(&post.author_id)
            {
                matches.push(Publication::Post(post.clone()));
            }
        }
        for comment in &self.comments {
            if comment.tag().is_some_and(|tag| tags.contains(&tag))
                && filter.matches_author(&comment.author_id)
            {
                matches.push(Publication::Comment(comment.clone()));
            }
        }
        if let Some(limit) = filter.limit {
            matches.truncate(limit as usize);
        }
        Ok(matches)
    }

    async fn comments_of(&self, parent_id: &str, tags: &[RecordTag]) -> StoreResult<Vec<Comment>> {
        self.take_failure()?;

        Ok(self
            .comments
            .iter()
            .filter(|comment| comment.parent_id == parent_id)
            .filter(|comment| comment.tag().is_some_and(|tag| tags.contains(&tag)))
            .cloned()
            .collect())
    }

    async fn collected_by(
        &self,
        collector: &ProfileId,
        tags: &[RecordTag],
    ) -> StoreResult<Vec<PublicationRef>> {
        self.take_failure()?;

        let mut refs = Vec::new();
        for (profile, reference) in &self.collects {
            if profile != collector {
                continue;
            }
            let tagged = self
                .comments
                .iter()
                .find(|comment| comment.id == reference.id)
                .and_then(|comment| comment.tag())
                .is_some_and(|tag| tags.contains(&tag));
            if tagged {
                refs.push(reference.clone());
            }
        }
        Ok(refs)
    }

    async fn publication(&self, id: &str) -> StoreResult<Option<Publication>> {
        self.take_failure()?;

        if let Some(post) = self.posts.iter().find(|post| post.id == id) {
            return Ok(Some(Publication::Post(post.clone())));
        }
        Ok(self
            .comments
            .iter()
            .find(|comment| comment.id == id)
            .cloned()
            .map(Publication::Comment))
    }
}

pub fn opportunity_post(
    id: &str,
    author: &ProfileId,
    secs: i64,
    opportunity_id: &str,
    name: &str,
) -> Post {
    Post {
        id: id.into(),
        created_at: at(secs),
        hidden: false,
        author_id: author.clone(),
        attributes: vec![
            Attribute::new("type", RecordTag::OrgPublishOpportunity.as_str()),
            Attribute::new("version", "1.0.1"),
            Attribute::new("id", opportunity_id),
            Attribute::new("name", name),
        ],
    }
}

/// A post carrying a non-opportunity tag, for stale-parent scenarios
pub fn cause_post(id: &str, author: &ProfileId, secs: i64, cause_id: &str, name: &str) -> Post {
    Post {
        id: id.into(),
        created_at: at(secs),
        hidden: false,
        author_id: author.clone(),
        attributes: vec![
            Attribute::new("type", RecordTag::OrgPublishCause.as_str()),
            Attribute::new("version", "1.0.0"),
            Attribute::new("id", cause_id),
            Attribute::new("name", name),
        ],
    }
}

pub fn application_comment(id: &str, author: &ProfileId, secs: i64, post_id: &str) -> Comment {
    Comment {
        id: id.into(),
        created_at: at(secs),
        hidden: false,
        author_id: author.clone(),
        attributes: vec![
            Attribute::new("type", RecordTag::VolunteerApply.as_str()),
            Attribute::new("version", "1.0.0"),
            Attribute::new("description", "happy to help"),
            Attribute::new("manual", "false"),
        ],
        parent_id: post_id.into(),
        main_post_id: post_id.into(),
    }
}

pub fn response_comment(
    id: &str,
    author: &ProfileId,
    secs: i64,
    application_id: &str,
    main_post_id: &str,
    tag: RecordTag,
) -> Comment {
    Comment {
        id: id.into(),
        created_at: at(secs),
        hidden: false,
        author_id: author.clone(),
        attributes: vec![
            Attribute::new("type", tag.as_str()),
            Attribute::new("version", "1.0.0"),
        ],
        parent_id: application_id.into(),
        main_post_id: main_post_id.into(),
    }
}

pub fn log_hours_comment(
    id: &str,
    author: &ProfileId,
    secs: i64,
    post_id: &str,
    hours: &str,
) -> Comment {
    Comment {
        id: id.into(),
        created_at: at(secs),
        hidden: false,
        author_id: author.clone(),
        attributes: vec![
            Attribute::new("type", RecordTag::VolunteerLogHours.as_str()),
            Attribute::new("version", "1.0.0"),
            Attribute::new("hoursToVerify", hours),
        ],
        parent_id: post_id.into(),
        main_post_id: post_id.into(),
    }
}
