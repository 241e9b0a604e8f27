//! Repository-level commands
//! 仓库相关命令

use rc_app::usecases::filter_repositories;
use rc_core::RepositoryLimit;
use tracing::{info_span, warn, Instrument};

use super::dto::{DashboardDto, GlobalStatsDto};
use super::CommandError;
use crate::bootstrap::AppRuntime;

/// List repositories, optionally filtered by a case-insensitive substring.
///
/// A failed fetch also raises an error toast.
pub async fn list_repositories(
    runtime: &AppRuntime,
    filter: Option<&str>,
) -> Result<Vec<String>, CommandError> {
    let span = info_span!("command.repositories.list", filter = filter.unwrap_or(""));
    async {
        match runtime.usecases().list_repositories().execute().await {
            Ok(repositories) => Ok(filter_repositories(&repositories, filter.unwrap_or(""))),
            Err(err) => {
                warn!(error = %err, "Failed to fetch repositories");
                runtime
                    .notifications()
                    .error("Failed to fetch repositories", Some(err.to_string()))
                    .await;
                Err(err.into())
            }
        }
    }
    .instrument(span)
    .await
}

/// Registry-wide totals. `limit` is one of `20`, `30`, `all`; default 20.
pub async fn get_global_stats(
    runtime: &AppRuntime,
    limit: Option<&str>,
) -> Result<GlobalStatsDto, CommandError> {
    let span = info_span!("command.repositories.global_stats", limit = limit.unwrap_or(""));
    async {
        let limit = match limit {
            None => RepositoryLimit::default(),
            Some(raw) => RepositoryLimit::parse(raw).ok_or_else(|| {
                CommandError::invalid_argument(format!(
                    "unsupported repository limit {raw:?}, expected 20, 30 or all"
                ))
            })?,
        };
        let stats = runtime.usecases().get_global_stats().execute(limit).await?;
        Ok::<_, CommandError>(GlobalStatsDto::from(stats))
    }
    .instrument(span)
    .await
}

pub async fn get_repository_dashboard(
    runtime: &AppRuntime,
    repository: &str,
) -> Result<DashboardDto, CommandError> {
    let span = info_span!("command.repositories.dashboard", repository = %repository);
    async {
        if repository.trim().is_empty() {
            return Err(CommandError::invalid_argument("repository is required"));
        }
        let dashboard = runtime
            .usecases()
            .get_repository_dashboard()
            .execute(repository)
            .await?;
        Ok::<_, CommandError>(DashboardDto::from_dashboard(&dashboard, runtime.now()))
    }
    .instrument(span)
    .await
}
