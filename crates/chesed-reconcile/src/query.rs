//! Query state machine
//!
//! Loading/error/data handling for a use case, reframed from ad hoc
//! per-field toggles into one explicit state machine with a single
//! transition function, testable independently of any UI binding.

use crate::error::ReconcileError;

/// Lifecycle phase of a use-case query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Events driving the state machine.
#[derive(Debug)]
pub enum QueryEvent<T> {
    /// A refetch was issued
    Started,
    /// The refetch settled with fresh data
    Resolved(T),
    /// The refetch settled with an aggregate-level failure
    Rejected(ReconcileError),
}

/// State of one use-case query.
///
/// `Failed` never clears `data`: a failure leaves the last good result in
/// place for the caller.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub phase: Phase,
    pub data: Option<T>,
    pub error: Option<ReconcileError>,
}

impl<T> QueryState<T> {
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            data: None,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// The single transition function.
    pub fn apply(&mut self, event: QueryEvent<T>) {
        match event {
            QueryEvent::Started => {
                self.phase = Phase::Loading;
                self.error = None;
            }
            QueryEvent::Resolved(data) => {
                self.phase = Phase::Ready;
                self.data = Some(data);
                self.error = None;
            }
            QueryEvent::Rejected(error) => {
                self.phase = Phase::Failed;
                self.error = Some(error);
            }
        }
    }
}

impl<T: Clone> QueryState<T> {
    pub fn snapshot(&self) -> QuerySnapshot<T> {
        QuerySnapshot {
            data: self.data.clone(),
            loading: self.is_loading(),
            error: self.error.clone(),
        }
    }
}

/// The caller-facing `{data, loading, error}` contract.
#[derive(Debug, Clone)]
pub struct QuerySnapshot<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ReconcileError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn test_idle_to_ready() {
        let mut state = QueryState::<u32>::idle();
        assert_eq!(state.phase, Phase::Idle);

        state.apply(QueryEvent::Started);
        assert!(state.is_loading());
        assert_eq!(state.data, None);

        state.apply(QueryEvent::Resolved(7));
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.data, Some(7));
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_failure_keeps_last_good_data() {
        let mut state = QueryState::idle();
        state.apply(QueryEvent::Started);
        state.apply(QueryEvent::Resolved(vec!["a", "b"]));

        state.apply(QueryEvent::Started);
        state.apply(QueryEvent::Rejected(ReconcileError::Fetch(
            StoreError::Network("timeout".into()),
        )));

        assert_eq!(state.phase, Phase::Failed);
        assert_eq!(state.data, Some(vec!["a", "b"]));
        assert!(state.error.is_some());
    }

    #[test]
    fn test_restart_clears_error_not_data() {
        let mut state = QueryState::<u32>::idle();
        state.apply(QueryEvent::Started);
        state.apply(QueryEvent::Resolved(1));
        state.apply(QueryEvent::Rejected(ReconcileError::ProfileNull));

        state.apply(QueryEvent::Started);
        assert!(state.is_loading());
        assert_eq!(state.error, None);
        assert_eq!(state.data, Some(1));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = QueryState::<u32>::idle();
        state.apply(QueryEvent::Started);

        let snapshot = state.snapshot();
        assert!(snapshot.loading);
        assert_eq!(snapshot.data, None);
        assert!(snapshot.error.is_none());
    }
}
