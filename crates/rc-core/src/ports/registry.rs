use async_trait::async_trait;

use super::FetchError;
use crate::image::{ImageRanking, ImageRecord};
use crate::retention::DeletionReply;
use crate::stats::GlobalStats;

/// Delete exactly these digests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteImagesRequest {
    pub repository: String,
    pub digests: Vec<String>,
}

/// Delete-by-date request. The console always sends explicit digests so the
/// backend never re-derives the set from the age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteByDateRequest {
    pub repository: String,
    pub days_old: u32,
    pub digests: Vec<String>,
}

/// Registry backend.
/// 注册表后端端口。
#[async_trait]
pub trait RegistryPort: Send + Sync {
    async fn list_repositories(&self) -> Result<Vec<String>, FetchError>;

    async fn global_stats(&self) -> Result<GlobalStats, FetchError>;

    /// Full, unpaginated listing in backend order.
    async fn list_images(&self, repository: &str) -> Result<Vec<ImageRecord>, FetchError>;

    /// Top `limit` images, ordered by the backend.
    async fn top_images(
        &self,
        repository: &str,
        ranking: ImageRanking,
        limit: usize,
    ) -> Result<Vec<ImageRecord>, FetchError>;

    async fn delete_images(
        &self,
        request: &DeleteImagesRequest,
    ) -> Result<DeletionReply, FetchError>;

    async fn delete_by_date(
        &self,
        request: &DeleteByDateRequest,
    ) -> Result<DeletionReply, FetchError>;
}
