//! Delete-by-date workflow.
//! 按日期删除工作流。
//!
//! preview → request confirmation → (guard window) → confirm → commit → report → close → refresh

mod commit;
mod context;
mod orchestrator;
mod preview;
mod reporter;
mod summary;

pub use commit::CommitEngine;
pub use context::{PreviewSummary, WorkflowContext, WorkflowSession, WorkflowSnapshot};
pub use orchestrator::DeleteByDateOrchestrator;
pub use preview::PreviewEngine;
pub use reporter::OutcomeReporter;
pub use summary::{CandidateRow, ConfirmationSummary, IRREVERSIBLE_DELETION_NOTICE};

use rc_core::ports::FetchError;
use rc_core::retention::ValidationError;

/// Errors produced by the delete-by-date workflow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("a preview is already running")]
    PreviewInFlight,
    #[error("a deletion is in progress")]
    CommitInFlight,
    #[error("close the confirmation dialog before previewing again")]
    DialogOpen,
    #[error("the preview was superseded by a newer threshold or repository")]
    Superseded,
}
