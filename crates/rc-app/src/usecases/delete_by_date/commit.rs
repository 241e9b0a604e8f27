use std::sync::Arc;

use rc_core::ports::{DeleteByDateRequest, FetchError, RegistryPort};
use rc_core::retention::{DeletionOutcome, FrozenSelection};
use tracing::{info, warn};

/// Deletes exactly a frozen selection. Never retries.
/// 提交引擎：只删除冻结的候选集，从不重试。
pub struct CommitEngine {
    registry: Arc<dyn RegistryPort>,
}

impl CommitEngine {
    pub fn from_ports(registry: Arc<dyn RegistryPort>) -> Self {
        Self { registry }
    }

    /// Sends the selection's digests, not the threshold alone, so the backend
    /// deletes what the user reviewed even if its state moved since.
    #[tracing::instrument(
        name = "usecase.commit_deletion.execute",
        skip(self, selection),
        fields(repository = %selection.repository(), requested = selection.len())
    )]
    pub async fn commit(&self, selection: &FrozenSelection) -> Result<DeletionOutcome, FetchError> {
        let request = DeleteByDateRequest {
            repository: selection.repository().to_string(),
            days_old: selection.threshold().days(),
            digests: selection.digests(),
        };

        let reply = self.registry.delete_by_date(&request).await?;
        let outcome =
            DeletionOutcome::from_reply(selection.repository(), selection.len() as u64, reply);

        match outcome.error() {
            None => info!(deleted = outcome.deleted(), "Deletion completed"),
            Some(err) => warn!(
                status = ?outcome.status(),
                deleted = outcome.deleted(),
                failures = outcome.failures().len(),
                error = %err,
                "Deletion did not complete"
            ),
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{fixed_now, image, MockRegistry};
    use rc_core::retention::{
        AgeThreshold, DeletionFailure, DeletionReply, DeletionStatus, PreviewResult,
    };

    fn selection() -> FrozenSelection {
        let preview = PreviewResult::compute(
            "api",
            AgeThreshold::new(14).unwrap(),
            vec![
                image("sha256:a", 1, Some(20)),
                image("sha256:b", 1, Some(30)),
                image("sha256:c", 1, Some(40)),
            ],
            fixed_now(),
        );
        FrozenSelection::capture(&preview)
    }

    #[tokio::test]
    async fn sends_the_frozen_digests() {
        let mut registry = MockRegistry::new();
        registry
            .expect_delete_by_date()
            .withf(|request| {
                request.repository == "api"
                    && request.days_old == 14
                    && request.digests == vec!["sha256:a", "sha256:b", "sha256:c"]
            })
            .times(1)
            .returning(|_| {
                Ok(DeletionReply::Completed {
                    deleted: Some(3),
                    message: None,
                })
            });

        let outcome = CommitEngine::from_ports(Arc::new(registry))
            .commit(&selection())
            .await
            .unwrap();

        assert_eq!(outcome.status(), DeletionStatus::Full);
        assert_eq!(outcome.requested(), 3);
    }

    #[tokio::test]
    async fn partial_reply_is_partial() {
        let mut registry = MockRegistry::new();
        registry.expect_delete_by_date().returning(|_| {
            Ok(DeletionReply::PartiallyCompleted {
                deleted: 2,
                failures: vec![DeletionFailure::new("sha256:c", "blob in use")],
                message: None,
            })
        });

        let outcome = CommitEngine::from_ports(Arc::new(registry))
            .commit(&selection())
            .await
            .unwrap();

        assert_eq!(outcome.status(), DeletionStatus::Partial);
        assert_eq!(outcome.failures()[0].digest.as_deref(), Some("sha256:c"));
    }

    #[tokio::test]
    async fn transport_failure_is_returned_not_retried() {
        let mut registry = MockRegistry::new();
        registry.expect_delete_by_date().times(1).returning(|_| {
            Err(FetchError::Timeout {
                endpoint: "/api/images/delete-by-date".into(),
            })
        });

        let err = CommitEngine::from_ports(Arc::new(registry))
            .commit(&selection())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Timeout { .. }));
    }
}
