use rc_core::format::{abbreviate_digest, format_absolute, format_bytes, tag_label};
use rc_core::image::ImageRecord;
use rc_core::retention::{FrozenSelection, PreviewResult};
use serde::{Deserialize, Serialize};

/// Shown before the user confirms. Deletion also drops per-image metadata.
pub const IRREVERSIBLE_DELETION_NOTICE: &str = "This action cannot be undone. \
Deleting these images also permanently removes their associated SBOM \
(software bill of materials) records.";

const DIGEST_PREVIEW_CHARS: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRow {
    /// 1-based position in the deletion set.
    pub index: usize,
    pub tag: String,
    pub digest: String,
    pub digest_short: String,
    pub size: String,
    pub last_pull: String,
}

/// Everything the confirmation dialog shows.
/// 确认对话框展示的全部内容。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationSummary {
    pub repository: String,
    pub threshold_days: u32,
    pub count: usize,
    pub total_bytes: u64,
    pub total_size: String,
    pub rows: Vec<CandidateRow>,
    pub disclosure: String,
}

impl ConfirmationSummary {
    pub fn from_preview(preview: &PreviewResult) -> Self {
        Self::build(
            preview.repository(),
            preview.threshold().days(),
            preview.candidates(),
            preview.total_bytes(),
        )
    }

    pub fn from_selection(selection: &FrozenSelection) -> Self {
        Self::build(
            selection.repository(),
            selection.threshold().days(),
            selection.candidates(),
            selection.total_bytes(),
        )
    }

    fn build(
        repository: &str,
        threshold_days: u32,
        candidates: &[ImageRecord],
        total_bytes: u64,
    ) -> Self {
        let rows = candidates
            .iter()
            .enumerate()
            .map(|(i, image)| CandidateRow {
                index: i + 1,
                tag: tag_label(image.tag.as_deref()).to_string(),
                digest: image.digest.clone(),
                digest_short: abbreviate_digest(&image.digest, DIGEST_PREVIEW_CHARS),
                size: format_bytes(image.size_bytes),
                last_pull: format_absolute(image.last_pull_at),
            })
            .collect();

        Self {
            repository: repository.to_string(),
            threshold_days,
            count: candidates.len(),
            total_bytes,
            total_size: format_bytes(total_bytes),
            rows,
            disclosure: IRREVERSIBLE_DELETION_NOTICE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{fixed_now, image};
    use rc_core::retention::AgeThreshold;

    #[test]
    fn rows_are_numbered_and_formatted() {
        let mut untagged = image("sha256:0123456789abcdef0123456789abcdef", 1536, Some(90));
        untagged.tag = None;
        let preview = PreviewResult::compute(
            "api",
            AgeThreshold::new(30).unwrap(),
            vec![image("sha256:b", 2048, Some(45)), untagged],
            fixed_now(),
        );

        let summary = ConfirmationSummary::from_preview(&preview);

        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_size, "3.5 KB");
        assert_eq!(summary.rows[0].index, 1);
        assert_eq!(summary.rows[0].tag, "tag-sha256:b");
        assert_eq!(summary.rows[1].tag, "untagged");
        assert_eq!(summary.rows[1].digest_short, "sha256:0123456789abcdef0...");
        assert_eq!(summary.rows[1].size, "1.5 KB");
        assert!(summary.disclosure.contains("SBOM"));
    }

    #[test]
    fn selection_summary_matches_preview_summary() {
        let preview = PreviewResult::compute(
            "api",
            AgeThreshold::new(7).unwrap(),
            vec![image("sha256:x", 10, Some(8))],
            fixed_now(),
        );

        assert_eq!(
            ConfirmationSummary::from_selection(&FrozenSelection::capture(&preview)),
            ConfirmationSummary::from_preview(&preview)
        );
    }
}
