use std::sync::Arc;

use rc_core::ports::{ClockPort, FetchError, RegistryPort};
use rc_core::retention::{AgeThreshold, PreviewResult};
use tracing::info;

/// Computes which images a threshold would delete. Read-only.
/// 预览引擎：计算某个阈值会删除哪些镜像（只读）。
pub struct PreviewEngine {
    registry: Arc<dyn RegistryPort>,
    clock: Arc<dyn ClockPort>,
}

impl PreviewEngine {
    pub fn from_ports(registry: Arc<dyn RegistryPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { registry, clock }
    }

    /// Fetches the full listing and filters it by last pull time.
    ///
    /// A fetch failure yields no partial result.
    #[tracing::instrument(
        name = "usecase.preview_deletion.execute",
        skip(self),
        fields(repository = %repository, threshold_days = threshold.days())
    )]
    pub async fn preview(
        &self,
        repository: &str,
        threshold: AgeThreshold,
    ) -> Result<PreviewResult, FetchError> {
        let images = self.registry.list_images(repository).await?;
        let scanned = images.len();
        let never_pulled = images.iter().filter(|i| i.last_pull_at.is_none()).count();

        let preview = PreviewResult::compute(repository, threshold, images, self.clock.now());

        info!(
            scanned,
            never_pulled,
            candidates = preview.len(),
            total_bytes = preview.total_bytes(),
            "Computed deletion preview"
        );
        Ok(preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{fixed_now, image, FixedClock, MockRegistry};

    fn engine(registry: MockRegistry) -> PreviewEngine {
        PreviewEngine::from_ports(Arc::new(registry), Arc::new(FixedClock(fixed_now())))
    }

    #[tokio::test]
    async fn candidates_are_the_stale_pulled_images() {
        let mut registry = MockRegistry::new();
        registry
            .expect_list_images()
            .withf(|repo| repo == "api")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    image("sha256:fresh", 10, Some(2)),
                    image("sha256:stale", 20, Some(31)),
                    image("sha256:never", 40, None),
                    image("sha256:ancient", 80, Some(365)),
                ])
            });

        let preview = engine(registry)
            .preview("api", AgeThreshold::new(30).unwrap())
            .await
            .unwrap();

        let digests: Vec<_> = preview.candidates().iter().map(|i| i.digest.as_str()).collect();
        assert_eq!(digests, vec!["sha256:stale", "sha256:ancient"]);
        assert_eq!(preview.total_bytes(), 100);
        assert_eq!(preview.threshold().days(), 30);
    }

    #[tokio::test]
    async fn repeated_previews_agree() {
        let mut registry = MockRegistry::new();
        registry
            .expect_list_images()
            .times(2)
            .returning(|_| Ok(vec![image("sha256:stale", 20, Some(90))]));
        let engine = engine(registry);
        let threshold = AgeThreshold::new(60).unwrap();

        let first = engine.preview("api", threshold).await.unwrap();
        let second = engine.preview("api", threshold).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn fetch_failure_is_surfaced() {
        let mut registry = MockRegistry::new();
        registry.expect_list_images().returning(|_| {
            Err(FetchError::Transport {
                endpoint: "/api/images".into(),
                message: "connection refused".into(),
            })
        });

        let err = engine(registry)
            .preview("api", AgeThreshold::default())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("connection refused"));
    }
}
