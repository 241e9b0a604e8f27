use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejections raised at the workflow boundary before any engine runs.
/// 在任何引擎运行前于工作流边界抛出的校验错误。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ValidationError {
    #[error("Please preview images first to see what will be deleted")]
    NoPreview,
    #[error("No images match the current threshold; nothing to delete")]
    EmptyCandidateSet,
    #[error("threshold must be a positive number of days, got {0:?}")]
    InvalidThreshold(String),
    #[error("the confirmation dialog is not open")]
    DialogNotOpen,
    #[error("no repository selected")]
    NoRepository,
}
