//! Business logic use cases
//!
//! Whether something is its own use case depends on whether the user has to
//! decide again before it proceeds.
//!
//! [RegistryPort]
//         ↓
// ListRepositories / GetGlobalStats / GetRepositoryDashboard / ListImages → views
// ---------------------------------
//         ↓
// DeleteImage                 → single delete, reported immediately
// DeleteByDateOrchestrator    → preview → confirm → commit → report

pub mod delete_by_date;
pub mod delete_image;
pub mod get_global_stats;
pub mod get_repository_dashboard;
pub mod list_images;
pub mod list_repositories;
pub mod notifications;

#[cfg(test)]
pub(crate) mod test_support;

pub use delete_by_date::{
    CommitEngine, ConfirmationSummary, DeleteByDateOrchestrator, OutcomeReporter, PreviewEngine,
    WorkflowError, WorkflowSnapshot,
};
pub use delete_image::DeleteImage;
pub use get_global_stats::GetGlobalStats;
pub use get_repository_dashboard::{GetRepositoryDashboard, RepositoryDashboard};
pub use list_images::ListImages;
pub use list_repositories::{filter_repositories, ListRepositories};
pub use notifications::NotificationCenter;
