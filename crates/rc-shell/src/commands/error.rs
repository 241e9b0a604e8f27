use rc_app::usecases::WorkflowError;
use rc_core::ports::FetchError;
use rc_core::retention::ValidationError;
use serde::Serialize;

/// Error returned by every command handler.
///
/// `code` is stable and machine-readable; `message` is meant for people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct CommandError {
    pub code: &'static str,
    pub message: String,
}

impl CommandError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("invalid_argument", message)
    }
}

impl From<FetchError> for CommandError {
    fn from(err: FetchError) -> Self {
        let code = match &err {
            FetchError::Transport { .. } => "backend_unreachable",
            FetchError::Timeout { .. } => "backend_timeout",
            FetchError::Status { .. } => "backend_error",
            FetchError::Decode { .. } => "backend_decode",
        };
        Self::new(code, err.to_string())
    }
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::NoPreview => "no_preview",
            ValidationError::EmptyCandidateSet => "empty_candidate_set",
            ValidationError::InvalidThreshold(_) => "invalid_threshold",
            ValidationError::DialogNotOpen => "dialog_not_open",
            ValidationError::NoRepository => "no_repository",
        };
        Self::new(code, err.to_string())
    }
}

impl From<WorkflowError> for CommandError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Validation(inner) => inner.into(),
            WorkflowError::Fetch(inner) => inner.into(),
            WorkflowError::PreviewInFlight => Self::new("preview_in_flight", err.to_string()),
            WorkflowError::CommitInFlight => Self::new("commit_in_flight", err.to_string()),
            WorkflowError::DialogOpen => Self::new("dialog_open", err.to_string()),
            WorkflowError::Superseded => Self::new("superseded", err.to_string()),
        }
    }
}
