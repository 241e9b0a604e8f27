use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ports::FetchError;

/// One digest the backend could not delete. `digest` is `None` when the
/// backend only gave a free-form message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionFailure {
    pub digest: Option<String>,
    pub reason: String,
}

impl DeletionFailure {
    pub fn new(digest: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            digest: Some(digest.into()),
            reason: reason.into(),
        }
    }

    pub fn unattributed(reason: impl Into<String>) -> Self {
        Self {
            digest: None,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for DeletionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.digest {
            Some(digest) => write!(f, "{digest}: {}", self.reason),
            None => f.write_str(&self.reason),
        }
    }
}

/// What the deletion endpoint answered, before any interpretation.
/// 删除接口的原始应答（尚未解释）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionReply {
    /// HTTP 200.
    Completed {
        deleted: Option<u64>,
        message: Option<String>,
    },
    /// HTTP 206.
    PartiallyCompleted {
        deleted: u64,
        failures: Vec<DeletionFailure>,
        message: Option<String>,
    },
    /// Any other status carrying an `{error}` body.
    Rejected { status: u16, error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionStatus {
    Full,
    Partial,
    Failed,
}

/// Result of one commit attempt. Built once, never mutated.
/// 一次提交的结果，构建后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionOutcome {
    repository: String,
    requested: u64,
    deleted: u64,
    failures: Vec<DeletionFailure>,
    status: DeletionStatus,
    backend_message: Option<String>,
}

impl DeletionOutcome {
    /// Decodes a backend reply for a request of `requested` digests.
    pub fn from_reply(repository: impl Into<String>, requested: u64, reply: DeletionReply) -> Self {
        let (deleted, failures, backend_message) = match reply {
            DeletionReply::Completed { deleted, message } => match deleted {
                Some(deleted) => (deleted, Vec::new(), message),
                None => (
                    0,
                    vec![DeletionFailure::unattributed(
                        "backend did not report how many images were deleted",
                    )],
                    message,
                ),
            },
            DeletionReply::PartiallyCompleted {
                deleted,
                failures,
                message,
            } => (deleted, failures, message),
            DeletionReply::Rejected { error, .. } => {
                (0, vec![DeletionFailure::unattributed(error.clone())], Some(error))
            }
        };

        Self::settle(repository.into(), requested, deleted, failures, backend_message)
    }

    /// A transport-level failure: nothing is known to be deleted.
    pub fn from_fetch_error(repository: impl Into<String>, requested: u64, error: &FetchError) -> Self {
        let message = error.to_string();
        Self::settle(
            repository.into(),
            requested,
            0,
            vec![DeletionFailure::unattributed(message.clone())],
            Some(message),
        )
    }

    fn settle(
        repository: String,
        requested: u64,
        deleted: u64,
        failures: Vec<DeletionFailure>,
        backend_message: Option<String>,
    ) -> Self {
        let status = Self::classify(requested, deleted, &failures);
        Self {
            repository,
            requested,
            deleted,
            failures,
            status,
            backend_message,
        }
    }

    fn classify(requested: u64, deleted: u64, failures: &[DeletionFailure]) -> DeletionStatus {
        if deleted == 0 {
            DeletionStatus::Failed
        } else if deleted >= requested && failures.is_empty() {
            DeletionStatus::Full
        } else {
            DeletionStatus::Partial
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn deleted(&self) -> u64 {
        self.deleted
    }

    pub fn failures(&self) -> &[DeletionFailure] {
        &self.failures
    }

    pub fn status(&self) -> DeletionStatus {
        self.status
    }

    pub fn backend_message(&self) -> Option<&str> {
        self.backend_message.as_deref()
    }

    /// Reported failures, or the unaccounted remainder when the backend gave none.
    pub fn failed_count(&self) -> u64 {
        if self.failures.is_empty() {
            self.requested.saturating_sub(self.deleted)
        } else {
            self.failures.len() as u64
        }
    }

    /// Dependent views only need refreshing when something was removed.
    pub fn warrants_refresh(&self) -> bool {
        self.status != DeletionStatus::Failed && self.deleted > 0
    }

    pub fn error(&self) -> Option<DeletionError> {
        match self.status {
            DeletionStatus::Full => None,
            DeletionStatus::Partial => Some(DeletionError::Partial {
                deleted: self.deleted,
                requested: self.requested,
                failed: self.failed_count(),
            }),
            DeletionStatus::Failed => Some(DeletionError::Fatal {
                requested: self.requested,
                message: self
                    .backend_message
                    .clone()
                    .or_else(|| self.failures.first().map(ToString::to_string))
                    .unwrap_or_else(|| "no images were deleted".to_string()),
            }),
        }
    }
}

/// Non-full outcomes as errors, for callers that propagate them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeletionError {
    #[error("Only {deleted} out of {requested} images were deleted. {failed} images failed")]
    Partial {
        deleted: u64,
        requested: u64,
        failed: u64,
    },
    #[error("Failed to delete {requested} images: {message}")]
    Fatal { requested: u64, message: String },
}
