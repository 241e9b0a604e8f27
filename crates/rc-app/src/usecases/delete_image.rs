use std::sync::Arc;

use rc_core::ports::{DeleteImagesRequest, RegistryPort};
use rc_core::retention::{DeletionOutcome, ValidationError};
use tracing::{info, warn};

use crate::usecases::delete_by_date::{OutcomeReporter, WorkflowError};

/// Use case for deleting a single image by digest.
/// 按摘要删除单个镜像的用例。
pub struct DeleteImage {
    registry: Arc<dyn RegistryPort>,
    reporter: Arc<OutcomeReporter>,
}

impl DeleteImage {
    pub fn from_ports(registry: Arc<dyn RegistryPort>, reporter: Arc<OutcomeReporter>) -> Self {
        Self { registry, reporter }
    }

    /// Deletes one digest, reports the outcome and, when the image is gone,
    /// asks dependent views to refresh.
    ///
    /// Backend failures are returned as a `Failed` outcome.
    #[tracing::instrument(
        name = "usecase.delete_image.execute",
        skip(self),
        fields(repository = %repository, digest = %digest)
    )]
    pub async fn execute(
        &self,
        repository: &str,
        digest: &str,
    ) -> Result<DeletionOutcome, WorkflowError> {
        if repository.trim().is_empty() {
            return Err(ValidationError::NoRepository.into());
        }
        if digest.trim().is_empty() {
            return Err(ValidationError::EmptyCandidateSet.into());
        }

        let request = DeleteImagesRequest {
            repository: repository.to_string(),
            digests: vec![digest.to_string()],
        };
        let outcome = match self.registry.delete_images(&request).await {
            Ok(reply) => DeletionOutcome::from_reply(repository, 1, reply),
            Err(err) => {
                warn!(error = %err, "Delete request failed");
                DeletionOutcome::from_fetch_error(repository, 1, &err)
            }
        };

        info!(status = ?outcome.status(), "Single image deletion finished");
        self.reporter.report(&outcome).await;
        self.reporter.request_refresh(&outcome).await;
        Ok(outcome)
    }
}
