use std::sync::Arc;

use rc_core::events::{ConsoleEvent, NotificationVariant, OutcomeNotice};
use rc_core::ports::ConsoleEventPort;
use rc_core::retention::{DeletionOutcome, DeletionStatus};
use tracing::{debug, info};

const MAX_LISTED_FAILURES: usize = 3;

/// Publishes deletion outcomes and refresh signals.
/// 结果报告器：发布删除结果与刷新信号。
pub struct OutcomeReporter {
    events: Arc<dyn ConsoleEventPort>,
}

impl OutcomeReporter {
    pub fn new(events: Arc<dyn ConsoleEventPort>) -> Self {
        Self { events }
    }

    /// User-facing wording for an outcome.
    pub fn notice(outcome: &DeletionOutcome) -> OutcomeNotice {
        let repository = outcome.repository();
        match (outcome.status(), outcome.error()) {
            (DeletionStatus::Full, _) | (_, None) => OutcomeNotice {
                variant: NotificationVariant::Success,
                title: "Deletion complete".to_string(),
                description: format!(
                    "Successfully deleted {} images from {repository}",
                    outcome.deleted()
                ),
            },
            (DeletionStatus::Partial, Some(err)) => {
                let mut description = format!("Warning: {err}");
                let listed: Vec<String> = outcome
                    .failures()
                    .iter()
                    .take(MAX_LISTED_FAILURES)
                    .map(ToString::to_string)
                    .collect();
                if !listed.is_empty() {
                    description.push_str(". ");
                    description.push_str(&listed.join("; "));
                    if outcome.failures().len() > MAX_LISTED_FAILURES {
                        description.push_str(&format!(
                            " (and {} more)",
                            outcome.failures().len() - MAX_LISTED_FAILURES
                        ));
                    }
                }
                OutcomeNotice {
                    variant: NotificationVariant::Warning,
                    title: format!("Partially completed: {} images deleted", outcome.deleted()),
                    description,
                }
            }
            (DeletionStatus::Failed, Some(err)) => OutcomeNotice {
                variant: NotificationVariant::Error,
                title: "Deletion failed".to_string(),
                description: format!(
                    "{err} (0 of {} deleted from {repository})",
                    outcome.requested()
                ),
            },
        }
    }

    pub async fn report(&self, outcome: &DeletionOutcome) -> OutcomeNotice {
        let notice = Self::notice(outcome);
        info!(
            repository = %outcome.repository(),
            status = ?outcome.status(),
            requested = outcome.requested(),
            deleted = outcome.deleted(),
            "Reporting deletion outcome"
        );
        self.events
            .emit(ConsoleEvent::DeletionReported {
                outcome: outcome.clone(),
                notice: notice.clone(),
            })
            .await;
        notice
    }

    /// Emits a refresh for the outcome's repository when anything was deleted.
    /// Returns whether a refresh was emitted.
    pub async fn request_refresh(&self, outcome: &DeletionOutcome) -> bool {
        if !outcome.warrants_refresh() {
            debug!(status = ?outcome.status(), "No refresh for this outcome");
            return false;
        }
        self.events
            .emit(ConsoleEvent::RefreshRequested {
                repository: outcome.repository().to_string(),
            })
            .await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::RecordingEvents;
    use rc_core::retention::{DeletionFailure, DeletionReply};

    fn partial(deleted: u64, requested: u64, failed: usize) -> DeletionOutcome {
        DeletionOutcome::from_reply(
            "api",
            requested,
            DeletionReply::PartiallyCompleted {
                deleted,
                failures: (0..failed)
                    .map(|i| DeletionFailure::new(format!("sha256:{i}"), "locked"))
                    .collect(),
                message: None,
            },
        )
    }

    #[test]
    fn full_outcome_reads_as_success() {
        let outcome = DeletionOutcome::from_reply(
            "api",
            10,
            DeletionReply::Completed {
                deleted: Some(10),
                message: None,
            },
        );

        let notice = OutcomeReporter::notice(&outcome);

        assert_eq!(notice.variant, NotificationVariant::Success);
        assert_eq!(notice.description, "Successfully deleted 10 images from api");
    }

    #[test]
    fn partial_outcome_states_counts() {
        let notice = OutcomeReporter::notice(&partial(7, 10, 3));

        assert_eq!(notice.variant, NotificationVariant::Warning);
        assert!(notice.description.contains("7 out of 10"), "{}", notice.description);
        assert!(notice.description.contains("3 images failed"));
        assert!(notice.description.contains("sha256:0: locked"));
        assert_eq!(notice.title, "Partially completed: 7 images deleted");
    }

    #[test]
    fn long_failure_lists_are_truncated() {
        let notice = OutcomeReporter::notice(&partial(1, 10, 9));

        assert!(notice.description.contains("(and 6 more)"));
    }

    #[test]
    fn failed_outcome_carries_backend_message() {
        let outcome = DeletionOutcome::from_reply(
            "api",
            4,
            DeletionReply::Rejected {
                status: 403,
                error: "access denied".into(),
            },
        );

        let notice = OutcomeReporter::notice(&outcome);

        assert_eq!(notice.variant, NotificationVariant::Error);
        assert!(notice.description.contains("access denied"));
        assert!(notice.description.contains("0 of 4 deleted"));
    }

    #[tokio::test]
    async fn refresh_only_when_something_was_deleted() {
        let events = Arc::new(RecordingEvents::default());
        let reporter = OutcomeReporter::new(events.clone());

        assert!(reporter.request_refresh(&partial(2, 3, 1)).await);
        assert!(!reporter.request_refresh(&partial(0, 3, 3)).await);

        assert_eq!(
            events.snapshot(),
            vec![ConsoleEvent::RefreshRequested {
                repository: "api".into()
            }]
        );
    }
}
