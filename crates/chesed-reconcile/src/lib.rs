//! Chesed Reconcile - Cross-reference reconciliation core
//!
//! Rebuilds consistent aggregate views (pending applications, registered
//! opportunities, volunteer rosters) from independently-fetched posts,
//! comments and collect events in the external publication store. There is
//! no shared transaction and no persisted aggregate state: every pass
//! re-derives everything from the store, last write wins by timestamp.
//!
//! ## Core Concepts
//!
//! 1. **PublicationStore** - the narrow async read seam onto the external
//!    store; the only I/O this crate performs
//! 2. **Resolver** - one reconciliation pass: concurrent fan-out fetches
//!    joined into derived status, malformed items logged and dropped
//! 3. **QueryState** - the Idle/Loading/Ready/Failed machine behind every
//!    use case's `{data, loading, error}` contract
//! 4. **Aggregator** - per-viewer orchestration with idempotent,
//!    last-issued-wins `refetch`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chesed_reconcile::Aggregator;
//! use chesed_records::ProfileId;
//!
//! let aggregator = Aggregator::new(Arc::new(store), Some(ProfileId::new("org")));
//!
//! let snapshot = aggregator.refetch_pending_applications().await;
//! if let Some(pending) = snapshot.data {
//!     for entry in pending {
//!         println!("{} -> {}", entry.application.header.author, entry.opportunity.name);
//!     }
//! }
//! ```

pub mod error;
pub mod fragment;
pub mod orchestrate;
pub mod query;
pub mod resolve;
pub mod store;

// Re-export fragments
pub use fragment::{Comment, Post, PostFilter, Publication, PublicationRef};

// Re-export the store seam
pub use store::{posts_by_tags, PublicationStore, ReconcileConfig};

// Re-export resolver types
pub use resolve::{
    response_status, AcceptedApplication, PendingApplication, Resolver, ResponseStatus,
    VerifiedHours, VolunteerView,
};

// Re-export the query contract
pub use query::{Phase, QueryEvent, QuerySnapshot, QueryState};

// Re-export orchestration and errors
pub use error::{ReconcileError, StoreError, StoreResult};
pub use orchestrate::Aggregator;
