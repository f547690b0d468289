//! Aggregation orchestrator
//!
//! Drives the fetch/decode/join pipeline per use case and exposes the
//! uniform `{data, loading, error, refetch}` contract. Holds no aggregate
//! state between passes: every refetch re-derives its result from the
//! store.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chesed_records::{OpportunityRecord, ProfileId};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::ReconcileError;
use crate::query::{QueryEvent, QuerySnapshot, QueryState};
use crate::resolve::{PendingApplication, Resolver, VolunteerView};
use crate::store::{PublicationStore, ReconcileConfig};

/// One use-case cell: current state plus a refetch generation counter.
///
/// `refetch` is idempotent and safe to call concurrently with itself.
/// Overlapping calls follow last-issued-wins: a call that settles after a
/// newer one was issued discards its result instead of clobbering state.
struct UseCase<T> {
    state: RwLock<QueryState<T>>,
    generation: AtomicU64,
}

impl<T: Clone> UseCase<T> {
    fn new() -> Self {
        Self {
            state: RwLock::new(QueryState::idle()),
            generation: AtomicU64::new(0),
        }
    }

    async fn snapshot(&self) -> QuerySnapshot<T> {
        self.state.read().await.snapshot()
    }

    /// Precondition failure: report the error without issuing any fetch.
    async fn fail_precondition(&self, error: ReconcileError) -> QuerySnapshot<T> {
        let mut state = self.state.write().await;
        state.apply(QueryEvent::Rejected(error));
        state.snapshot()
    }

    async fn run<F>(&self, fetch: F) -> QuerySnapshot<T>
    where
        F: Future<Output = Result<T, ReconcileError>>,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.apply(QueryEvent::Started);
        }

        let result = fetch.await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding superseded refetch result");
            return state.snapshot();
        }
        match result {
            Ok(data) => state.apply(QueryEvent::Resolved(data)),
            Err(error) => state.apply(QueryEvent::Rejected(error)),
        }
        state.snapshot()
    }
}

/// Orchestrates the reconciliation use cases for one viewer.
///
/// The store handle is passed in at construction and shared by reference;
/// there is no process-wide client state.
pub struct Aggregator<S> {
    store: Arc<S>,
    viewer: Option<ProfileId>,
    config: ReconcileConfig,
    pending: UseCase<Vec<PendingApplication>>,
    registered: UseCase<Vec<OpportunityRecord>>,
    roster: UseCase<Vec<VolunteerView>>,
}

impl<S: PublicationStore> Aggregator<S> {
    /// Create an orchestrator for `viewer`, which may be absent when no
    /// identity is authenticated yet.
    pub fn new(store: Arc<S>, viewer: Option<ProfileId>) -> Self {
        Self::with_config(store, viewer, ReconcileConfig::default())
    }

    pub fn with_config(store: Arc<S>, viewer: Option<ProfileId>, config: ReconcileConfig) -> Self {
        Self {
            store,
            viewer,
            config,
            pending: UseCase::new(),
            registered: UseCase::new(),
            roster: UseCase::new(),
        }
    }

    fn resolver(&self) -> Resolver<'_, S> {
        Resolver::new(self.store.as_ref(), &self.config)
    }

    fn require_viewer(&self) -> Result<ProfileId, ReconcileError> {
        self.viewer.clone().ok_or(ReconcileError::ProfileNull)
    }

    /// Current snapshot of the pending-applications use case
    pub async fn pending_applications(&self) -> QuerySnapshot<Vec<PendingApplication>> {
        self.pending.snapshot().await
    }

    /// Re-derive the viewer-org's pending-review set from the store
    pub async fn refetch_pending_applications(&self) -> QuerySnapshot<Vec<PendingApplication>> {
        let org = match self.require_viewer() {
            Ok(viewer) => viewer,
            Err(error) => return self.pending.fail_precondition(error).await,
        };
        self.pending
            .run(async move {
                let pending = self.resolver().pending_applications(&org).await?;
                Ok(pending)
            })
            .await
    }

    /// Current snapshot of the registered-opportunities use case
    pub async fn registered_opportunities(&self) -> QuerySnapshot<Vec<OpportunityRecord>> {
        self.registered.snapshot().await
    }

    /// Re-derive the opportunities the viewer-volunteer has applied to
    pub async fn refetch_registered_opportunities(&self) -> QuerySnapshot<Vec<OpportunityRecord>> {
        let volunteer = match self.require_viewer() {
            Ok(viewer) => viewer,
            Err(error) => return self.registered.fail_precondition(error).await,
        };
        self.registered
            .run(async move {
                let registered = self.resolver().registered_opportunities(&volunteer).await?;
                Ok(registered)
            })
            .await
    }

    /// Current snapshot of the volunteer-roster use case
    pub async fn volunteer_roster(&self) -> QuerySnapshot<Vec<VolunteerView>> {
        self.roster.snapshot().await
    }

    /// Re-derive the viewer-org's volunteer roster from the store
    pub async fn refetch_volunteer_roster(&self) -> QuerySnapshot<Vec<VolunteerView>> {
        let org = match self.require_viewer() {
            Ok(viewer) => viewer,
            Err(error) => return self.roster.fail_precondition(error).await,
        };
        self.roster
            .run(async move {
                let roster = self.resolver().volunteer_roster(&org).await?;
                Ok(roster)
            })
            .await
    }
}
