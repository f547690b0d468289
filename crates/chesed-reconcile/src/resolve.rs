//! Cross-reference resolver
//!
//! Reconciles independently-fetched collections (opportunity posts,
//! application comments, accept/reject responses, collect events) into
//! consistent derived status, without a shared transaction. Independent
//! fetches within one pass fan out concurrently and are joined before the
//! dependent step runs; partial results are never streamed.
//!
//! One malformed publication never fails a batch: per-item decode failures
//! are logged with the publication id and reason, then dropped.

use std::collections::{BTreeMap, HashMap, HashSet};

use chesed_records::{
    decode_application, decode_log_hours, decode_opportunity, most_recent, ApplicationRecord,
    LogHoursRecord, OpportunityRecord, ProfileId, RecordTag,
};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StoreResult;
use crate::fragment::{Comment, Post, PostFilter, Publication};
use crate::store::{posts_by_tags, PublicationStore, ReconcileConfig};

/// An application awaiting review, paired with its parent opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApplication {
    pub opportunity: OpportunityRecord,
    pub application: ApplicationRecord,
}

/// An accepted application on a volunteer's current roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedApplication {
    pub opportunity: OpportunityRecord,
    pub application: ApplicationRecord,
}

/// A verified hour log, paired with its parent opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedHours {
    pub opportunity: OpportunityRecord,
    pub log: LogHoursRecord,
}

/// Aggregate view of one volunteer, rebuilt from scratch on every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerView {
    pub volunteer: ProfileId,
    /// Accepted, not-yet-verified opportunities
    pub current_opportunities: Vec<AcceptedApplication>,
    /// Collected (verified) hour logs
    pub completed_opportunities: Vec<VerifiedHours>,
}

impl VolunteerView {
    fn new(volunteer: ProfileId) -> Self {
        Self {
            volunteer,
            current_opportunities: Vec::new(),
            completed_opportunities: Vec::new(),
        }
    }
}

/// Review status derived from the responses under one application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseStatus {
    pub approved: bool,
    pub rejected: bool,
}

impl ResponseStatus {
    /// An application with at least one accept or reject response
    pub fn handled(&self) -> bool {
        self.approved || self.rejected
    }
}

/// Classify the responses under an application.
///
/// A response counts only if it is accept/reject-tagged, authored by the
/// opportunity owner, and not hidden. Approval and rejection are computed
/// independently: both may be set, and any accept present marks the
/// application approved.
pub fn response_status(responses: &[Comment], owner: &ProfileId) -> ResponseStatus {
    let mut status = ResponseStatus::default();
    for response in responses {
        if response.hidden || response.author_id != *owner {
            continue;
        }
        match response.tag() {
            Some(RecordTag::OrgAccept) => status.approved = true,
            Some(RecordTag::OrgReject) => status.rejected = true,
            _ => {}
        }
    }
    status
}

/// One reconciliation pass over the store.
///
/// Holds no state beyond the store handle; every call re-derives its
/// output from the store.
pub struct Resolver<'a, S: PublicationStore + ?Sized> {
    store: &'a S,
    config: &'a ReconcileConfig,
}

impl<'a, S: PublicationStore + ?Sized> Resolver<'a, S> {
    pub fn new(store: &'a S, config: &'a ReconcileConfig) -> Self {
        Self { store, config }
    }

    fn author_filter(&self, author: &ProfileId) -> PostFilter {
        PostFilter::by_author(author.clone()).with_limit(self.config.fetch_limit)
    }

    /// The organization's current opportunity records: decoded from its
    /// opportunity posts, with republished edits collapsed to the newest.
    pub async fn current_opportunities_of(
        &self,
        org: &ProfileId,
    ) -> StoreResult<Vec<OpportunityRecord>> {
        let posts = posts_by_tags(
            self.store,
            &[RecordTag::OrgPublishOpportunity],
            &self.author_filter(org),
        )
        .await?;

        let mut decoded = Vec::new();
        for post in &posts {
            if post.hidden {
                continue;
            }
            match decode_post_opportunity(post) {
                Ok(record) => decoded.push(record),
                Err(reason) => {
                    warn!(publication_id = %post.id, %reason, "dropping opportunity post with invalid metadata");
                }
            }
        }
        Ok(most_recent(decoded))
    }

    /// The responses under one application, classified against the
    /// opportunity owner.
    pub async fn response_status_of(
        &self,
        application_id: &str,
        owner: &ProfileId,
    ) -> StoreResult<ResponseStatus> {
        let responses = self
            .store
            .comments_of(application_id, &[RecordTag::OrgAccept, RecordTag::OrgReject])
            .await?;
        Ok(response_status(&responses, owner))
    }

    /// The organization's pending-review set: applications under its
    /// current opportunities with no accept/reject response yet.
    pub async fn pending_applications(
        &self,
        org: &ProfileId,
    ) -> StoreResult<Vec<PendingApplication>> {
        let opportunities = self.current_opportunities_of(org).await?;

        // Fan out: applications under each opportunity post
        let batches = try_join_all(opportunities.iter().map(|opportunity| {
            let post_id = opportunity.header.publication_id.clone();
            async move {
                self.store
                    .comments_of(&post_id, &[RecordTag::VolunteerApply])
                    .await
            }
        }))
        .await?;

        let mut candidates: Vec<(&OpportunityRecord, Comment)> = Vec::new();
        for (opportunity, comments) in opportunities.iter().zip(batches) {
            for comment in comments {
                if comment.hidden {
                    continue;
                }
                candidates.push((opportunity, comment));
            }
        }

        // Fan out again: responses per application
        let statuses = try_join_all(candidates.iter().map(|(_, application)| {
            let application_id = application.id.clone();
            async move { self.response_status_of(&application_id, org).await }
        }))
        .await?;

        let mut pending = Vec::new();
        for ((opportunity, application), status) in candidates.into_iter().zip(statuses) {
            if status.handled() {
                continue;
            }
            match decode_comment_application(&application) {
                Ok(record) => pending.push(PendingApplication {
                    opportunity: opportunity.clone(),
                    application: record,
                }),
                Err(reason) => {
                    warn!(publication_id = %application.id, %reason, "dropping application with invalid metadata");
                }
            }
        }
        Ok(pending)
    }

    /// The opportunities a volunteer has applied to, obtained by walking
    /// each application comment back to its main post.
    ///
    /// An application whose parent no longer decodes as a current
    /// opportunity is stale and dropped; it only remains visible while its
    /// opportunity is.
    pub async fn registered_opportunities(
        &self,
        volunteer: &ProfileId,
    ) -> StoreResult<Vec<OpportunityRecord>> {
        let publications = self
            .store
            .publications_by_tags(&[RecordTag::VolunteerApply], &self.author_filter(volunteer))
            .await?;
        let applications: Vec<Comment> = publications
            .into_iter()
            .filter_map(Publication::into_comment)
            .filter(|comment| !comment.hidden)
            .collect();

        let table = self.opportunity_table(applications.iter()).await?;

        let mut registered = Vec::new();
        let mut seen = HashSet::new();
        for application in &applications {
            let Some(opportunity) = table.get(&application.main_post_id) else {
                warn!(publication_id = %application.id, "dropping application whose opportunity is stale");
                continue;
            };
            if seen.insert(opportunity.header.publication_id.clone()) {
                registered.push(opportunity.clone());
            }
        }
        Ok(most_recent(registered))
    }

    /// Aggregate volunteer views for an organization.
    ///
    /// Accept responses and collect events are fetched concurrently, then
    /// both sides are mapped through one shared opportunity table so the
    /// same opportunity instance backs a volunteer's current and completed
    /// lists.
    pub async fn volunteer_roster(&self, org: &ProfileId) -> StoreResult<Vec<VolunteerView>> {
        let filter = self.author_filter(org);
        let (responses, collected) = tokio::try_join!(
            self.store
                .publications_by_tags(&[RecordTag::OrgAccept], &filter),
            self.store.collected_by(org, &[RecordTag::VolunteerLogHours]),
        )?;

        let accepts: Vec<Comment> = responses
            .into_iter()
            .filter_map(Publication::into_comment)
            .filter(|comment| !comment.hidden)
            .collect();

        // Fan out: each accept back to the volunteer's application comment,
        // each collect event to its hour-log comment
        let (applications, logs) = tokio::try_join!(
            self.resolve_comments(accepts.iter().map(|accept| accept.parent_id.clone())),
            self.resolve_comments(collected.iter().map(|reference| reference.id.clone())),
        )?;

        // One table, shared between both sides of the join
        let table = self
            .opportunity_table(applications.iter().chain(logs.iter()))
            .await?;

        let mut views: BTreeMap<ProfileId, VolunteerView> = BTreeMap::new();

        for application in &applications {
            let Some(opportunity) = table.get(&application.main_post_id) else {
                warn!(publication_id = %application.id, "dropping accepted application whose opportunity is stale");
                continue;
            };
            match decode_comment_application(application) {
                Ok(record) => views
                    .entry(application.author_id.clone())
                    .or_insert_with(|| VolunteerView::new(application.author_id.clone()))
                    .current_opportunities
                    .push(AcceptedApplication {
                        opportunity: opportunity.clone(),
                        application: record,
                    }),
                Err(reason) => {
                    warn!(publication_id = %application.id, %reason, "dropping accepted application with invalid metadata");
                }
            }
        }

        for log in &logs {
            let Some(opportunity) = table.get(&log.main_post_id) else {
                warn!(publication_id = %log.id, "dropping hour log whose opportunity is stale");
                continue;
            };
            match decode_log_hours(&log.id, log.created_at, log.author_id.clone(), &log.attributes)
            {
                Ok(record) => views
                    .entry(log.author_id.clone())
                    .or_insert_with(|| VolunteerView::new(log.author_id.clone()))
                    .completed_opportunities
                    .push(VerifiedHours {
                        opportunity: opportunity.clone(),
                        log: record,
                    }),
                Err(reason) => {
                    warn!(publication_id = %log.id, %reason, "dropping hour log with invalid metadata");
                }
            }
        }

        Ok(views.into_values().collect())
    }

    /// Resolve publication ids to unhidden comments, dropping anything
    /// missing or of the wrong shape. Ids are deduplicated first so that
    /// repeated references (an application accepted twice, say) resolve to
    /// one comment.
    async fn resolve_comments(
        &self,
        ids: impl Iterator<Item = String>,
    ) -> StoreResult<Vec<Comment>> {
        let mut seen = HashSet::new();
        let ids: Vec<String> = ids.filter(|id| seen.insert(id.clone())).collect();
        let publications = try_join_all(ids.iter().map(|id| {
            let id = id.clone();
            async move { self.store.publication(&id).await }
        }))
        .await?;

        let mut comments = Vec::new();
        for (id, publication) in ids.into_iter().zip(publications) {
            match publication.and_then(Publication::into_comment) {
                Some(comment) if !comment.hidden => comments.push(comment),
                Some(_) => {}
                None => warn!(publication_id = %id, "referenced publication is not a comment"),
            }
        }
        Ok(comments)
    }

    /// Build the `main post id → OpportunityRecord` table for a batch of
    /// comments. Built once per pass and read-only thereafter; posts that
    /// fail to decode as opportunities are logged and left out.
    async fn opportunity_table(
        &self,
        comments: impl Iterator<Item = &Comment>,
    ) -> StoreResult<HashMap<String, OpportunityRecord>> {
        let mut seen = HashSet::new();
        let main_ids: Vec<String> = comments
            .map(|comment| comment.main_post_id.clone())
            .filter(|id| seen.insert(id.clone()))
            .collect();

        let publications = try_join_all(main_ids.iter().map(|id| {
            let id = id.clone();
            async move { self.store.publication(&id).await }
        }))
        .await?;

        let mut table = HashMap::new();
        for (main_id, publication) in main_ids.into_iter().zip(publications) {
            let Some(Publication::Post(post)) = publication else {
                warn!(publication_id = %main_id, "main post missing from store");
                continue;
            };
            if post.hidden {
                continue;
            }
            match decode_post_opportunity(&post) {
                Ok(record) => {
                    table.insert(main_id, record);
                }
                Err(reason) => {
                    warn!(publication_id = %post.id, %reason, "main post does not decode as a current opportunity");
                }
            }
        }
        Ok(table)
    }
}

fn decode_post_opportunity(post: &Post) -> chesed_records::Result<OpportunityRecord> {
    decode_opportunity(&post.id, post.created_at, post.author_id.clone(), &post.attributes)
}

fn decode_comment_application(comment: &Comment) -> chesed_records::Result<ApplicationRecord> {
    decode_application(
        &comment.id,
        comment.created_at,
        comment.author_id.clone(),
        &comment.attributes,
    )
}
