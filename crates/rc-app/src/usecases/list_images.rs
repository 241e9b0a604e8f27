use std::sync::Arc;

use rc_core::image::{ImageRanking, ImageRecord};
use rc_core::ports::{FetchError, RegistryPort};
use tracing::info;

/// Use case for the ranked image lists (most downloaded, largest).
/// 镜像排行列表用例。
pub struct ListImages {
    registry: Arc<dyn RegistryPort>,
}

impl ListImages {
    pub fn from_ports(registry: Arc<dyn RegistryPort>) -> Self {
        Self { registry }
    }

    /// `limit` of `None` or zero means the default of ten. Backend order is kept.
    #[tracing::instrument(
        name = "usecase.list_images.execute",
        skip(self),
        fields(repository = %repository, ranking = ranking.as_str())
    )]
    pub async fn execute(
        &self,
        repository: &str,
        ranking: ImageRanking,
        limit: Option<usize>,
    ) -> Result<Vec<ImageRecord>, FetchError> {
        let limit = match limit {
            Some(n) if n > 0 => n,
            _ => ImageRanking::DEFAULT_LIMIT,
        };
        let images = self.registry.top_images(repository, ranking, limit).await?;
        info!(count = images.len(), limit, "Listed ranked images");
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{image, MockRegistry};

    #[tokio::test]
    async fn default_limit_is_ten() {
        let mut registry = MockRegistry::new();
        registry
            .expect_top_images()
            .withf(|repo, ranking, limit| {
                repo == "api" && *ranking == ImageRanking::Largest && *limit == 10
            })
            .times(2)
            .returning(|_, _, _| Ok(vec![image("sha256:big", 9000, Some(1))]));

        let uc = ListImages::from_ports(Arc::new(registry));

        assert_eq!(uc.execute("api", ImageRanking::Largest, None).await.unwrap().len(), 1);
        assert_eq!(uc.execute("api", ImageRanking::Largest, Some(0)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn keeps_backend_order() {
        let mut registry = MockRegistry::new();
        registry
            .expect_top_images()
            .withf(|repo, ranking, limit| {
                repo == "web" && *ranking == ImageRanking::MostDownloaded && *limit == 3
            })
            .returning(|_, _, _| {
                Ok(vec![
                    image("sha256:b", 1, Some(1)),
                    image("sha256:a", 1, Some(2)),
                    image("sha256:c", 1, None),
                ])
            });

        let images = ListImages::from_ports(Arc::new(registry))
            .execute("web", ImageRanking::MostDownloaded, Some(3))
            .await
            .unwrap();

        let digests: Vec<_> = images.iter().map(|i| i.digest.as_str()).collect();
        assert_eq!(digests, vec!["sha256:b", "sha256:a", "sha256:c"]);
    }
}
