use std::sync::Arc;

use rc_core::ports::{FetchError, RegistryPort};
use tracing::info;

/// Use case for listing repository names.
/// 列出仓库名称的用例。
pub struct ListRepositories {
    registry: Arc<dyn RegistryPort>,
}

impl ListRepositories {
    pub fn from_ports(registry: Arc<dyn RegistryPort>) -> Self {
        Self { registry }
    }

    #[tracing::instrument(name = "usecase.list_repositories.execute", skip(self))]
    pub async fn execute(&self) -> Result<Vec<String>, FetchError> {
        let repositories = self.registry.list_repositories().await?;
        info!(count = repositories.len(), "Listed repositories");
        Ok(repositories)
    }
}

/// Case-insensitive substring filter. Order is preserved; an empty query keeps everything.
pub fn filter_repositories(repositories: &[String], query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    repositories
        .iter()
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::MockRegistry;

    fn names() -> Vec<String> {
        ["payments-api", "Web-Frontend", "batch/etl", "api-gateway"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn filter_is_case_insensitive_and_keeps_order() {
        assert_eq!(
            filter_repositories(&names(), "API"),
            vec!["payments-api".to_string(), "api-gateway".to_string()]
        );
        assert_eq!(filter_repositories(&names(), "web"), vec!["Web-Frontend".to_string()]);
    }

    #[test]
    fn blank_query_keeps_everything() {
        assert_eq!(filter_repositories(&names(), "  "), names());
        assert!(filter_repositories(&names(), "nope").is_empty());
    }

    #[tokio::test]
    async fn execute_returns_backend_listing() {
        let mut registry = MockRegistry::new();
        registry
            .expect_list_repositories()
            .times(1)
            .returning(|| Ok(vec!["api".to_string(), "web".to_string()]));

        let uc = ListRepositories::from_ports(Arc::new(registry));

        assert_eq!(uc.execute().await.unwrap(), vec!["api", "web"]);
    }

    #[tokio::test]
    async fn execute_propagates_fetch_error() {
        let mut registry = MockRegistry::new();
        registry.expect_list_repositories().returning(|| {
            Err(FetchError::Status {
                endpoint: "/api/repositories".into(),
                status: 500,
                message: "registry unavailable".into(),
            })
        });

        let uc = ListRepositories::from_ports(Arc::new(registry));

        let err = uc.execute().await.unwrap_err();
        assert!(err.to_string().contains("registry unavailable"));
    }
}
