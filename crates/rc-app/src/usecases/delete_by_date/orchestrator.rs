//! Delete-by-date orchestrator.
//!
//! This module coordinates the confirmation gate state machine and its side effects:
//! preview fetches, guard and display timers, the commit, and outcome reporting.
//! Backend calls run outside every lock; overlapping requests are refused by
//! the session state instead. Session changes that feed a gate event happen in
//! the same dispatch critical section as the transition.

use std::sync::Arc;
use std::time::Duration;

use rc_core::events::ConsoleEvent;
use rc_core::ports::ConsoleEventPort;
use rc_core::retention::{
    AgeThreshold, ConfirmationGate, ConfirmationState, DeletionOutcome, DismissSignal,
    FrozenSelection, GateAction, GateEvent, GateState, PreviewResult, ValidationError,
};
use tracing::{debug, info, info_span, warn, Instrument};

use super::{
    CommitEngine, ConfirmationSummary, OutcomeReporter, PreviewEngine, WorkflowContext,
    WorkflowError, WorkflowSession, WorkflowSnapshot,
};
use crate::settings::RetentionTimings;

/// Orchestrator that drives the delete-by-date workflow.
/// 驱动按日期删除工作流的编排器。
#[derive(Clone)]
pub struct DeleteByDateOrchestrator {
    context: Arc<WorkflowContext>,
    preview_engine: Arc<PreviewEngine>,
    commit_engine: Arc<CommitEngine>,
    reporter: Arc<OutcomeReporter>,
    events: Arc<dyn ConsoleEventPort>,
    timings: RetentionTimings,
}

impl DeleteByDateOrchestrator {
    pub fn new(
        preview_engine: Arc<PreviewEngine>,
        commit_engine: Arc<CommitEngine>,
        reporter: Arc<OutcomeReporter>,
        events: Arc<dyn ConsoleEventPort>,
        timings: RetentionTimings,
    ) -> Self {
        Self {
            context: WorkflowContext::new().arc(),
            preview_engine,
            commit_engine,
            reporter,
            events,
            timings,
        }
    }

    /// Starts over on `repository`. Refused while a deletion is running.
    pub async fn open_workflow(&self, repository: String) -> Result<WorkflowSnapshot, WorkflowError> {
        let selected = repository.clone();
        self.dispatch_with(move |session| {
            if session.gate.phase() == ConfirmationState::Committing {
                return Err(WorkflowError::CommitInFlight);
            }
            session.reset(Some(selected));
            Ok((GateEvent::Invalidate, ()))
        })
        .await?;
        info!(repository = %repository, "Delete-by-date workflow opened");

        self.events
            .emit(ConsoleEvent::PreviewCleared {
                repository: Some(repository),
            })
            .await;
        Ok(self.snapshot().await)
    }

    /// Applies raw threshold input (coerced to a positive day count) and
    /// discards the current preview. A pending dialog closes.
    pub async fn set_threshold(&self, raw: &str) -> WorkflowSnapshot {
        let threshold = AgeThreshold::from_user_input(raw);
        let applied = self
            .dispatch_with(|session| {
                session.threshold = threshold;
                session.preview_generation += 1;
                session.last_error = None;
                let cleared = (session.repository.clone(), session.preview.take().is_some());
                Ok((GateEvent::Invalidate, cleared))
            })
            .await;
        let (repository, had_preview) = match applied {
            Ok((_, cleared)) => cleared,
            Err(err) => {
                warn!(error = %err, "Threshold update refused");
                return self.snapshot().await;
            }
        };
        debug!(raw = %raw, threshold_days = threshold.days(), "Threshold updated");

        if had_preview {
            self.events
                .emit(ConsoleEvent::PreviewCleared { repository })
                .await;
        }
        self.snapshot().await
    }

    /// Runs the preview engine for the current repository and threshold.
    ///
    /// Any previous candidate set is discarded before the fetch starts, so a
    /// failed preview leaves nothing to commit.
    pub async fn preview(&self) -> Result<PreviewResult, WorkflowError> {
        let (repository, threshold, generation, had_preview) = {
            let mut session = self.context.session().await;
            let repository = session
                .repository
                .clone()
                .ok_or(ValidationError::NoRepository)?;
            if session.gate.phase() != ConfirmationState::Closed {
                return Err(WorkflowError::DialogOpen);
            }
            if session.preview_in_flight.is_some() {
                return Err(WorkflowError::PreviewInFlight);
            }
            session.preview_generation += 1;
            let generation = session.preview_generation;
            session.preview_in_flight = Some(generation);
            session.last_error = None;
            let had_preview = session.preview.take().is_some();
            (repository, session.threshold, generation, had_preview)
        };

        if had_preview {
            self.events
                .emit(ConsoleEvent::PreviewCleared {
                    repository: Some(repository.clone()),
                })
                .await;
        }

        let result = self.preview_engine.preview(&repository, threshold).await;

        let mut session = self.context.session().await;
        if session.preview_in_flight == Some(generation) {
            session.preview_in_flight = None;
        }
        if session.preview_generation != generation {
            debug!(repository = %repository, "Dropping superseded preview");
            return Err(WorkflowError::Superseded);
        }

        match result {
            Ok(preview) => {
                session.preview = Some(preview.clone());
                drop(session);
                self.events
                    .emit(ConsoleEvent::PreviewReady {
                        repository,
                        threshold_days: preview.threshold().days(),
                        candidates: preview.len(),
                        total_bytes: preview.total_bytes(),
                    })
                    .await;
                Ok(preview)
            }
            Err(err) => {
                let message = err.to_string();
                session.last_error = Some(message.clone());
                drop(session);
                warn!(repository = %repository, error = %message, "Preview failed");
                self.events
                    .emit(ConsoleEvent::PreviewFailed {
                        repository,
                        message,
                    })
                    .await;
                Err(err.into())
            }
        }
    }

    /// Asks for the confirmation dialog. Needs a non-empty preview.
    pub async fn request_confirmation(&self) -> Result<WorkflowSnapshot, WorkflowError> {
        let (actions, ()) = self
            .dispatch_with(|session| {
                if session.repository.is_none() {
                    return Err(ValidationError::NoRepository.into());
                }
                let candidates = session.preview.as_ref().map(PreviewResult::len);
                let ticket = session.issue_ticket();
                Ok((GateEvent::RequestOpen { ticket, candidates }, ()))
            })
            .await?;

        for action in actions {
            match action {
                GateAction::Reject(err) => return Err(self.reject(err).await),
                GateAction::ScheduleSettle { ticket } => {
                    self.spawn_timer(
                        self.timings.opening_guard,
                        GateEvent::SettleElapsed { ticket },
                    );
                }
                other => debug!(action = ?other, "unexpected action on request"),
            }
        }
        Ok(self.snapshot().await)
    }

    /// Forwards a dismissal signal. Absorbed unless the dialog is fully open.
    pub async fn dismiss(&self, signal: DismissSignal) -> WorkflowSnapshot {
        let before = self.context.session().await.gate.phase();
        self.dispatch(GateEvent::Dismiss(signal)).await;
        if matches!(
            before,
            ConfirmationState::Opening | ConfirmationState::Committing
        ) {
            debug!(signal = ?signal, phase = %before, "Dismissal absorbed");
        }
        self.snapshot().await
    }

    /// Confirms the open dialog and deletes the frozen candidate set.
    ///
    /// Backend and transport failures come back as a `Failed` outcome rather
    /// than an error. The dialog stays in `Committing` for the display delay,
    /// then closes; a refresh follows when anything was deleted.
    pub async fn confirm(&self) -> Result<DeletionOutcome, WorkflowError> {
        let (actions, ()) = self
            .dispatch_with(|session| {
                let selection = session.preview.as_ref().map(FrozenSelection::capture);
                Ok((GateEvent::Confirm { selection }, ()))
            })
            .await?;

        let mut frozen = None;
        for action in actions {
            match action {
                GateAction::Reject(err) => return Err(self.reject(err).await),
                GateAction::StartCommit { selection } => frozen = Some(selection),
                other => debug!(action = ?other, "unexpected action on confirm"),
            }
        }
        let selection = frozen.ok_or(ValidationError::DialogNotOpen)?;

        let outcome = match self.commit_engine.commit(&selection).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "Deletion request failed");
                DeletionOutcome::from_fetch_error(
                    selection.repository(),
                    selection.len() as u64,
                    &err,
                )
            }
        };

        {
            let mut session = self.context.session().await;
            session.preview = None;
            session.last_outcome = Some(outcome.clone());
            session.last_error = outcome.error().map(|err| err.to_string());
        }
        self.events
            .emit(ConsoleEvent::PreviewCleared {
                repository: Some(selection.repository().to_string()),
            })
            .await;
        self.reporter.report(&outcome).await;

        for action in self
            .dispatch(GateEvent::CommitRecorded {
                outcome: outcome.clone(),
            })
            .await
        {
            match action {
                GateAction::ScheduleClose { ticket } => {
                    self.spawn_timer(
                        self.timings.outcome_display,
                        GateEvent::CloseElapsed { ticket },
                    );
                }
                other => debug!(action = ?other, "unexpected action after commit"),
            }
        }

        Ok(outcome)
    }

    pub async fn snapshot(&self) -> WorkflowSnapshot {
        self.context.snapshot().await
    }

    /// What the dialog shows: the frozen set while committing, otherwise the
    /// current preview.
    pub async fn confirmation_summary(&self) -> Option<ConfirmationSummary> {
        let session = self.context.session().await;
        match &session.gate {
            GateState::Committing { selection, .. } => {
                Some(ConfirmationSummary::from_selection(selection))
            }
            _ => session.preview.as_ref().map(ConfirmationSummary::from_preview),
        }
    }

    async fn reject(&self, err: ValidationError) -> WorkflowError {
        info!(error = %err, "Request rejected");
        self.context.session().await.last_error = Some(err.to_string());
        err.into()
    }

    async fn dispatch(&self, event: GateEvent) -> Vec<GateAction> {
        match self.dispatch_with(move |_| Ok((event, ()))).await {
            Ok((actions, ())) => actions,
            Err(err) => {
                debug!(error = %err, "dispatch refused");
                Vec::new()
            }
        }
    }

    /// Builds the event from the session and applies it to the gate without
    /// releasing the dispatch lock in between.
    async fn dispatch_with<T, F>(&self, prepare: F) -> Result<(Vec<GateAction>, T), WorkflowError>
    where
        F: FnOnce(&mut WorkflowSession) -> Result<(GateEvent, T), WorkflowError>,
    {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.delete_by_date.dispatch", event = tracing::field::Empty);
        async move {
            let (event_name, from, to, repository, actions, prepared) = {
                let mut session = self.context.session().await;
                let (event, prepared) = prepare(&mut *session)?;
                let event_name = event.name();
                tracing::Span::current().record("event", event_name);
                let current = std::mem::take(&mut session.gate);
                let from = current.phase();
                let (next, actions) = ConfirmationGate::transition(current, event);
                let to = next.phase();
                session.gate = next;
                (event_name, from, to, session.repository.clone(), actions, prepared)
            };

            if from != to {
                info!(from = %from, to = %to, event = %event_name, "confirmation gate transition");
                self.events
                    .emit(ConsoleEvent::GateChanged {
                        repository,
                        from,
                        to,
                    })
                    .await;
            }
            Ok::<_, WorkflowError>((actions, prepared))
        }
        .instrument(span)
        .await
    }

    fn spawn_timer(&self, delay: Duration, event: GateEvent) {
        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            this.on_timer(event).await;
        });
    }

    async fn on_timer(&self, event: GateEvent) {
        for action in self.dispatch(event).await {
            match action {
                GateAction::Settled { outcome } => self.schedule_refresh(outcome),
                other => debug!(action = ?other, "unexpected action from timer"),
            }
        }
    }

    fn schedule_refresh(&self, outcome: DeletionOutcome) {
        if !outcome.warrants_refresh() {
            debug!(status = ?outcome.status(), "Dialog closed without refresh");
            return;
        }
        let reporter = self.reporter.clone();
        let delay = self.timings.refresh_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            reporter.request_refresh(&outcome).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{fixed_now, image, FixedClock, MockRegistry, RecordingEvents};
    use rc_core::ports::DeleteByDateRequest;
    use rc_core::retention::{DeletionReply, DeletionStatus};
    use std::sync::Mutex;

    const GUARD: Duration = Duration::from_millis(1200);

    fn build(sent: Arc<Mutex<Vec<DeleteByDateRequest>>>) -> DeleteByDateOrchestrator {
        let mut registry = MockRegistry::new();
        registry
            .expect_list_images()
            .returning(|_| Ok(vec![image("sha256:a", 10, Some(60)), image("sha256:b", 20, Some(45))]));
        registry.expect_delete_by_date().returning(move |request| {
            sent.lock().unwrap().push(request.clone());
            Ok(DeletionReply::Completed {
                deleted: Some(request.digests.len() as u64),
                message: None,
            })
        });
        let registry: Arc<MockRegistry> = Arc::new(registry);
        let events = Arc::new(RecordingEvents::default());
        DeleteByDateOrchestrator::new(
            Arc::new(PreviewEngine::from_ports(
                registry.clone(),
                Arc::new(FixedClock(fixed_now())),
            )),
            Arc::new(CommitEngine::from_ports(registry)),
            Arc::new(OutcomeReporter::new(events.clone())),
            events,
            RetentionTimings {
                opening_guard: GUARD,
                outcome_display: Duration::from_millis(1500),
                refresh_delay: Duration::from_millis(500),
            },
        )
    }

    async fn open_dialog(orchestrator: &DeleteByDateOrchestrator) {
        orchestrator.open_workflow("api".into()).await.unwrap();
        assert_eq!(orchestrator.preview().await.unwrap().len(), 2);
        orchestrator.request_confirmation().await.unwrap();
        tokio::time::sleep(GUARD + Duration::from_millis(10)).await;
        assert_eq!(orchestrator.snapshot().await.confirmation, ConfirmationState::Open);
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn threshold_change_queued_behind_confirm_waits_for_the_commit_to_start() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let orchestrator = build(sent.clone());
        open_dialog(&orchestrator).await;

        let guard = orchestrator.context.acquire_dispatch_lock().await;
        let confirming = tokio::spawn({
            let orchestrator = orchestrator.clone();
            async move { orchestrator.confirm().await }
        });
        settle().await;
        let changing = tokio::spawn({
            let orchestrator = orchestrator.clone();
            async move { orchestrator.set_threshold("90").await }
        });
        settle().await;

        // Neither request may touch the session before its turn.
        let snapshot = orchestrator.snapshot().await;
        assert_eq!(snapshot.threshold_days, 30);
        assert!(snapshot.preview.is_some());

        drop(guard);
        let outcome = confirming.await.unwrap().unwrap();
        changing.await.unwrap();

        assert_eq!(outcome.status(), DeletionStatus::Full);
        let sent = sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].days_old, 30);
        assert_eq!(sent[0].digests, vec!["sha256:a", "sha256:b"]);
        assert_eq!(orchestrator.snapshot().await.threshold_days, 90);
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_queued_behind_threshold_change_commits_nothing() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let orchestrator = build(sent.clone());
        open_dialog(&orchestrator).await;

        let guard = orchestrator.context.acquire_dispatch_lock().await;
        let changing = tokio::spawn({
            let orchestrator = orchestrator.clone();
            async move { orchestrator.set_threshold("90").await }
        });
        settle().await;
        let confirming = tokio::spawn({
            let orchestrator = orchestrator.clone();
            async move { orchestrator.confirm().await }
        });
        settle().await;

        drop(guard);
        let snapshot = changing.await.unwrap();
        let err = confirming.await.unwrap().unwrap_err();

        assert_eq!(snapshot.threshold_days, 90);
        assert_eq!(snapshot.confirmation, ConfirmationState::Closed);
        assert_eq!(err, WorkflowError::Validation(ValidationError::DialogNotOpen));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn request_queued_behind_threshold_change_sees_no_preview() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let orchestrator = build(sent);
        orchestrator.open_workflow("api".into()).await.unwrap();
        orchestrator.preview().await.unwrap();

        let guard = orchestrator.context.acquire_dispatch_lock().await;
        let changing = tokio::spawn({
            let orchestrator = orchestrator.clone();
            async move { orchestrator.set_threshold("90").await }
        });
        settle().await;
        let requesting = tokio::spawn({
            let orchestrator = orchestrator.clone();
            async move { orchestrator.request_confirmation().await }
        });
        settle().await;

        drop(guard);
        changing.await.unwrap();
        let err = requesting.await.unwrap().unwrap_err();

        assert_eq!(err, WorkflowError::Validation(ValidationError::NoPreview));
        assert_eq!(orchestrator.snapshot().await.confirmation, ConfirmationState::Closed);
    }
}
