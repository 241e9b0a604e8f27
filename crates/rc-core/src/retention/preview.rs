use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AgeThreshold;
use crate::image::ImageRecord;

/// Keeps images whose last pull is known and strictly older than the cutoff.
///
/// Never-pulled images are excluded; push time is not used as a fallback.
/// Backend order is preserved.
pub fn select_candidates(
    images: Vec<ImageRecord>,
    threshold: AgeThreshold,
    now: DateTime<Utc>,
) -> Vec<ImageRecord> {
    let cutoff = threshold.cutoff(now);
    images
        .into_iter()
        .filter(|image| matches!(image.last_pull_at, Some(pulled) if pulled < cutoff))
        .collect()
}

/// Candidates computed for one repository and threshold. Immutable once built.
/// 某个仓库与阈值下计算出的候选集，构建后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResult {
    repository: String,
    threshold: AgeThreshold,
    candidates: Vec<ImageRecord>,
    total_bytes: u64,
    computed_at: DateTime<Utc>,
}

impl PreviewResult {
    pub fn compute(
        repository: impl Into<String>,
        threshold: AgeThreshold,
        images: Vec<ImageRecord>,
        now: DateTime<Utc>,
    ) -> Self {
        let candidates = select_candidates(images, threshold, now);
        let total_bytes = candidates.iter().map(|image| image.size_bytes).sum();
        Self {
            repository: repository.into(),
            threshold,
            candidates,
            total_bytes,
            computed_at: now,
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn threshold(&self) -> AgeThreshold {
        self.threshold
    }

    pub fn candidates(&self) -> &[ImageRecord] {
        &self.candidates
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn computed_at(&self) -> DateTime<Utc> {
        self.computed_at
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// The deletion set handed to the commit. Captured once from a preview and
/// never re-derived afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrozenSelection {
    repository: String,
    threshold: AgeThreshold,
    candidates: Vec<ImageRecord>,
    total_bytes: u64,
}

impl FrozenSelection {
    pub fn capture(preview: &PreviewResult) -> Self {
        Self {
            repository: preview.repository.clone(),
            threshold: preview.threshold,
            candidates: preview.candidates.clone(),
            total_bytes: preview.total_bytes,
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn threshold(&self) -> AgeThreshold {
        self.threshold
    }

    pub fn candidates(&self) -> &[ImageRecord] {
        &self.candidates
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn digests(&self) -> Vec<String> {
        self.candidates.iter().map(|image| image.digest.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn image(digest: &str, size: u64, pulled_days_ago: Option<i64>, now: DateTime<Utc>) -> ImageRecord {
        ImageRecord {
            repository: "web".into(),
            digest: digest.into(),
            tag: None,
            size_bytes: size,
            pushed_at: Some(now - Duration::days(400)),
            last_pull_at: pulled_days_ago.map(|d| now - Duration::days(d)),
        }
    }

    #[test]
    fn only_images_pulled_before_cutoff_are_candidates() {
        let now = Utc::now();
        let images = vec![
            image("sha256:old", 10, Some(45), now),
            image("sha256:recent", 20, Some(3), now),
            image("sha256:never", 40, None, now),
            image("sha256:older", 5, Some(200), now),
        ];

        let preview = PreviewResult::compute("web", AgeThreshold::new(30).unwrap(), images, now);

        let digests: Vec<_> = preview.candidates().iter().map(|i| i.digest.as_str()).collect();
        assert_eq!(digests, vec!["sha256:old", "sha256:older"]);
        assert_eq!(preview.total_bytes(), 15);
        assert_eq!(preview.repository(), "web");
    }

    #[test]
    fn image_exactly_at_cutoff_is_kept() {
        let now = Utc::now();
        let images = vec![image("sha256:edge", 1, Some(30), now)];

        let preview = PreviewResult::compute("web", AgeThreshold::new(30).unwrap(), images, now);

        assert!(preview.is_empty());
        assert_eq!(preview.total_bytes(), 0);
    }

    #[test]
    fn never_pulled_images_are_excluded_even_when_pushed_long_ago() {
        let now = Utc::now();
        let images = vec![image("sha256:never", 99, None, now)];

        let candidates = select_candidates(images, AgeThreshold::new(1).unwrap(), now);

        assert!(candidates.is_empty());
    }

    #[test]
    fn frozen_selection_copies_the_preview() {
        let now = Utc::now();
        let preview = PreviewResult::compute(
            "web",
            AgeThreshold::new(7).unwrap(),
            vec![image("sha256:a", 1, Some(10), now), image("sha256:b", 2, Some(8), now)],
            now,
        );

        let frozen = FrozenSelection::capture(&preview);

        assert_eq!(frozen.digests(), vec!["sha256:a", "sha256:b"]);
        assert_eq!(frozen.total_bytes(), 3);
        assert_eq!(frozen.threshold().days(), 7);
        assert_eq!(frozen.len(), preview.len());
    }
}
