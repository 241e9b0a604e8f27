use std::sync::Arc;

use rc_core::ports::{FetchError, RegistryPort};
use rc_core::stats::{GlobalStats, RepositoryLimit};
use tracing::info;

/// Use case for registry-wide statistics.
/// 全局统计用例。
pub struct GetGlobalStats {
    registry: Arc<dyn RegistryPort>,
}

impl GetGlobalStats {
    pub fn from_ports(registry: Arc<dyn RegistryPort>) -> Self {
        Self { registry }
    }

    /// Fetches the statistics and trims the size ranking to `limit`.
    /// Totals always describe the whole registry.
    #[tracing::instrument(name = "usecase.get_global_stats.execute", skip(self), fields(limit = ?limit))]
    pub async fn execute(&self, limit: RepositoryLimit) -> Result<GlobalStats, FetchError> {
        let stats = self.registry.global_stats().await?;
        info!(
            repositories = stats.total_repositories,
            images = stats.total_images,
            "Fetched global stats"
        );
        Ok(stats.limited(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::MockRegistry;
    use rc_core::stats::RepositorySize;

    #[tokio::test]
    async fn ranking_is_limited_but_totals_are_not() {
        let mut registry = MockRegistry::new();
        registry.expect_global_stats().times(1).returning(|| {
            Ok(GlobalStats {
                total_repositories: 40,
                total_images: 900,
                total_size_bytes: 1 << 40,
                top_repositories: (0..40)
                    .map(|i| RepositorySize {
                        name: format!("repo-{i}"),
                        size_bytes: 1000 - i,
                        image_count: 3,
                    })
                    .collect(),
            })
        });

        let stats = GetGlobalStats::from_ports(Arc::new(registry))
            .execute(RepositoryLimit::Top(30))
            .await
            .unwrap();

        assert_eq!(stats.top_repositories.len(), 30);
        assert_eq!(stats.total_repositories, 40);
        assert_eq!(stats.top_repositories[0].name, "repo-0");
    }
}
