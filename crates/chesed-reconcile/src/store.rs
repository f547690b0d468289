//! Publication store seam
//!
//! The store itself (fetch-by-filter, fetch-by-id, broadcast, wallet
//! signing, object storage) lives outside this core. The resolver consumes
//! it through this narrow read interface; the handle is constructed once at
//! process start and passed by reference, never held in process-wide state.

use async_trait::async_trait;
use chesed_records::{ProfileId, RecordTag};

use crate::error::StoreResult;
use crate::fragment::{Comment, Post, PostFilter, Publication, PublicationRef};

/// Read interface onto the external publication store.
#[async_trait]
pub trait PublicationStore: Send + Sync {
    /// Fetch publications carrying any of `tags`, subject to `filter`.
    ///
    /// Covers both posts and comments: applications and hour logs are
    /// comments but are fetched through the same tag/author filter path.
    async fn publications_by_tags(
        &self,
        tags: &[RecordTag],
        filter: &PostFilter,
    ) -> StoreResult<Vec<Publication>>;

    /// Fetch the comments under a publication carrying any of `tags`
    async fn comments_of(&self, parent_id: &str, tags: &[RecordTag]) -> StoreResult<Vec<Comment>>;

    /// Fetch references to publications collected by `collector`,
    /// restricted to publications carrying any of `tags`
    async fn collected_by(
        &self,
        collector: &ProfileId,
        tags: &[RecordTag],
    ) -> StoreResult<Vec<PublicationRef>>;

    /// Fetch a single publication by id, `None` when the store has no
    /// publication under that id
    async fn publication(&self, id: &str) -> StoreResult<Option<Publication>>;
}

/// Tuning knobs for a reconciliation pass.
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Page size for top-level tag fetches (default: 50)
    pub fetch_limit: u32,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self { fetch_limit: 50 }
    }
}

/// Convenience: fetch only the posts among the matching publications.
pub async fn posts_by_tags<S: PublicationStore + ?Sized>(
    store: &S,
    tags: &[RecordTag],
    filter: &PostFilter,
) -> StoreResult<Vec<Post>> {
    let publications = store.publications_by_tags(tags, filter).await?;
    Ok(publications
        .into_iter()
        .filter_map(|publication| match publication {
            Publication::Post(post) => Some(post),
            Publication::Comment(_) => None,
        })
        .collect())
}
