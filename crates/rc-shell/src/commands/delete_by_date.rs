//! Delete-by-date commands
//! 按日期删除相关命令
//!
//! Thin wrappers over the shared `DeleteByDateOrchestrator`.

use rc_app::usecases::{ConfirmationSummary, OutcomeReporter, WorkflowSnapshot};
use rc_core::retention::DismissSignal;
use tracing::{info_span, Instrument};

use super::dto::DeletionOutcomeDto;
use super::CommandError;
use crate::bootstrap::AppRuntime;

pub async fn open_delete_by_date(
    runtime: &AppRuntime,
    repository: &str,
) -> Result<WorkflowSnapshot, CommandError> {
    let span = info_span!("command.delete_by_date.open", repository = %repository);
    async {
        if repository.trim().is_empty() {
            return Err(CommandError::invalid_argument("repository is required"));
        }
        let snapshot = runtime
            .delete_by_date()
            .open_workflow(repository.to_string())
            .await?;
        Ok::<_, CommandError>(snapshot)
    }
    .instrument(span)
    .await
}

/// Raw input is coerced; anything that is not a positive day count becomes 30.
pub async fn set_threshold(runtime: &AppRuntime, raw: &str) -> WorkflowSnapshot {
    let span = info_span!("command.delete_by_date.set_threshold", raw = %raw);
    async { runtime.delete_by_date().set_threshold(raw).await }
        .instrument(span)
        .await
}

/// Runs a preview and returns what the confirmation dialog would list.
pub async fn preview_deletion(runtime: &AppRuntime) -> Result<ConfirmationSummary, CommandError> {
    let span = info_span!("command.delete_by_date.preview");
    async {
        let preview = runtime.delete_by_date().preview().await?;
        Ok::<_, CommandError>(ConfirmationSummary::from_preview(&preview))
    }
    .instrument(span)
    .await
}

pub async fn request_confirmation(runtime: &AppRuntime) -> Result<WorkflowSnapshot, CommandError> {
    let span = info_span!("command.delete_by_date.request_confirmation");
    async {
        let snapshot = runtime.delete_by_date().request_confirmation().await?;
        Ok::<_, CommandError>(snapshot)
    }
    .instrument(span)
    .await
}

pub async fn dismiss_confirmation(runtime: &AppRuntime, signal: DismissSignal) -> WorkflowSnapshot {
    let span = info_span!("command.delete_by_date.dismiss", signal = ?signal);
    async { runtime.delete_by_date().dismiss(signal).await }
        .instrument(span)
        .await
}

/// Commits the frozen candidate set. Backend failures are reported in the
/// returned outcome.
pub async fn confirm_deletion(runtime: &AppRuntime) -> Result<DeletionOutcomeDto, CommandError> {
    let span = info_span!("command.delete_by_date.confirm");
    async {
        let outcome = runtime.delete_by_date().confirm().await?;
        let notice = OutcomeReporter::notice(&outcome);
        Ok::<_, CommandError>(DeletionOutcomeDto::from_outcome(&outcome, notice))
    }
    .instrument(span)
    .await
}

pub async fn workflow_snapshot(runtime: &AppRuntime) -> WorkflowSnapshot {
    runtime.delete_by_date().snapshot().await
}

/// `None` when there is nothing to confirm.
pub async fn confirmation_summary(runtime: &AppRuntime) -> Option<ConfirmationSummary> {
    runtime.delete_by_date().confirmation_summary().await
}
