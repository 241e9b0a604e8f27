use std::sync::Arc;

use rc_core::image::{ImageRanking, ImageRecord};
use rc_core::ports::{FetchError, RegistryPort};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DASHBOARD_TOP_N: usize = 5;

/// Per-repository overview.
/// 单个仓库的概览。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDashboard {
    pub repository: String,
    pub image_count: usize,
    pub total_size_bytes: u64,
    pub most_downloaded: Vec<ImageRecord>,
    pub largest: Vec<ImageRecord>,
}

pub struct GetRepositoryDashboard {
    registry: Arc<dyn RegistryPort>,
}

impl GetRepositoryDashboard {
    pub fn from_ports(registry: Arc<dyn RegistryPort>) -> Self {
        Self { registry }
    }

    /// Fetches the listing and both top-5 rankings concurrently. Any failure
    /// fails the whole dashboard.
    #[tracing::instrument(
        name = "usecase.get_repository_dashboard.execute",
        skip(self),
        fields(repository = %repository)
    )]
    pub async fn execute(&self, repository: &str) -> Result<RepositoryDashboard, FetchError> {
        let (images, most_downloaded, largest) = futures::try_join!(
            self.registry.list_images(repository),
            self.registry
                .top_images(repository, ImageRanking::MostDownloaded, DASHBOARD_TOP_N),
            self.registry
                .top_images(repository, ImageRanking::Largest, DASHBOARD_TOP_N),
        )?;

        let dashboard = RepositoryDashboard {
            repository: repository.to_string(),
            image_count: images.len(),
            total_size_bytes: images.iter().map(|image| image.size_bytes).sum(),
            most_downloaded,
            largest,
        };
        info!(
            images = dashboard.image_count,
            total_size_bytes = dashboard.total_size_bytes,
            "Built repository dashboard"
        );
        Ok(dashboard)
    }
}
