use std::sync::Arc;

use chrono::{DateTime, Utc};
use rc_core::retention::{
    AgeThreshold, ConfirmationState, DeletionOutcome, GateState, PreviewResult, Ticket,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};

/// Mutable workflow state at the UI boundary.
/// 工作流会话状态。
#[derive(Debug, Clone, Default)]
pub struct WorkflowSession {
    pub repository: Option<String>,
    pub threshold: AgeThreshold,
    /// The authoritative deletion set until consumed or invalidated.
    pub preview: Option<PreviewResult>,
    /// Generation of the preview currently awaiting the backend.
    pub preview_in_flight: Option<u64>,
    /// Bumped whenever a running preview must no longer be applied.
    pub preview_generation: u64,
    pub gate: GateState,
    pub next_ticket: Ticket,
    pub last_outcome: Option<DeletionOutcome>,
    pub last_error: Option<String>,
}

impl WorkflowSession {
    /// Forgets everything tied to the previous repository or threshold.
    pub fn reset(&mut self, repository: Option<String>) {
        self.repository = repository;
        self.threshold = AgeThreshold::default();
        self.preview = None;
        self.preview_in_flight = None;
        self.preview_generation += 1;
        self.last_outcome = None;
        self.last_error = None;
    }

    pub fn issue_ticket(&mut self) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket = ticket.next();
        ticket
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        let confirmation = self.gate.phase();
        let preview = self.preview.as_ref().map(|p| PreviewSummary {
            threshold_days: p.threshold().days(),
            candidates: p.len(),
            total_bytes: p.total_bytes(),
            computed_at: p.computed_at(),
        });
        let idle = confirmation == ConfirmationState::Closed && self.preview_in_flight.is_none();

        WorkflowSnapshot {
            repository: self.repository.clone(),
            threshold_days: self.threshold.days(),
            confirmation,
            can_preview: idle && self.repository.is_some(),
            can_request_confirmation: idle && preview.as_ref().is_some_and(|p| p.candidates > 0),
            preview_in_flight: self.preview_in_flight.is_some(),
            preview,
            last_outcome: self.last_outcome.clone(),
            last_error: self.last_error.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSummary {
    pub threshold_days: u32,
    pub candidates: usize,
    pub total_bytes: u64,
    pub computed_at: DateTime<Utc>,
}

/// Read-only view of the workflow for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    pub repository: Option<String>,
    pub threshold_days: u32,
    pub confirmation: ConfirmationState,
    pub preview: Option<PreviewSummary>,
    pub preview_in_flight: bool,
    pub can_preview: bool,
    pub can_request_confirmation: bool,
    pub last_outcome: Option<DeletionOutcome>,
    pub last_error: Option<String>,
}

/// Shared workflow context containing the session and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `session`.
/// - `dispatch_lock`: serializes gate transitions so state changes and their
///   `GateChanged` events are published in the same order.
/// - `session`: short critical sections only; never held across backend calls.
#[derive(Clone, Default)]
pub struct WorkflowContext {
    session: Arc<Mutex<WorkflowSession>>,
    dispatch_lock: Arc<Mutex<()>>,
}

impl WorkflowContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn session(&self) -> MutexGuard<'_, WorkflowSession> {
        self.session.lock().await
    }

    pub async fn snapshot(&self) -> WorkflowSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Returns a guard that releases the lock when dropped.
    pub async fn acquire_dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_cannot_preview_without_repository() {
        let snapshot = WorkflowSession::default().snapshot();

        assert_eq!(snapshot.threshold_days, 30);
        assert_eq!(snapshot.confirmation, ConfirmationState::Closed);
        assert!(!snapshot.can_preview);
        assert!(!snapshot.can_request_confirmation);
    }

    #[test]
    fn reset_bumps_generation_and_clears_preview_state() {
        let mut session = WorkflowSession {
            threshold: AgeThreshold::new(90).unwrap(),
            preview_in_flight: Some(3),
            preview_generation: 3,
            last_error: Some("boom".into()),
            ..Default::default()
        };

        session.reset(Some("api".into()));

        assert_eq!(session.preview_generation, 4);
        assert_eq!(session.preview_in_flight, None);
        assert_eq!(session.threshold, AgeThreshold::default());
        assert!(session.snapshot().can_preview);
    }

    #[test]
    fn tickets_are_unique() {
        let mut session = WorkflowSession::default();
        let first = session.issue_ticket();
        let second = session.issue_ticket();
        assert_ne!(first, second);
    }
}
