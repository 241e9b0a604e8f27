//! JSON shapes exchanged with the admin API and their domain conversions.

use chrono::{DateTime, Datelike, Utc};
use rc_core::retention::DeletionFailure;
use rc_core::{GlobalStats, ImageRecord, RepositorySize};
use serde::{Deserialize, Serialize};

const FAILURE_PREFIX: &str = "Failed to delete image ";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageDto {
    #[serde(default)]
    pub repository_name: String,
    #[serde(default)]
    pub image_tag: String,
    pub image_digest: String,
    #[serde(default)]
    pub image_size: i64,
    pub image_pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_pull_date: Option<DateTime<Utc>>,
}

/// The backend serialises unset timestamps as `0001-01-01T00:00:00Z`.
fn meaningful(ts: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    ts.filter(|ts| ts.year() > 1)
}

impl ImageDto {
    pub fn into_record(self, fallback_repository: &str) -> ImageRecord {
        let repository = if self.repository_name.is_empty() {
            fallback_repository.to_string()
        } else {
            self.repository_name
        };
        ImageRecord {
            repository,
            digest: self.image_digest,
            tag: Some(self.image_tag).filter(|tag| !tag.is_empty()),
            size_bytes: self.image_size.max(0) as u64,
            pushed_at: meaningful(self.image_pushed_at),
            last_pull_at: meaningful(self.last_pull_date),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepositoryStatsDto {
    pub name: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub image_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GlobalStatsDto {
    #[serde(default)]
    pub total_repositories: u64,
    #[serde(default)]
    pub total_images: u64,
    #[serde(default)]
    pub total_size: i64,
    #[serde(default)]
    pub top_repositories_by_size: Vec<RepositoryStatsDto>,
}

impl From<GlobalStatsDto> for GlobalStats {
    fn from(dto: GlobalStatsDto) -> Self {
        GlobalStats {
            total_repositories: dto.total_repositories,
            total_images: dto.total_images,
            total_size_bytes: dto.total_size.max(0) as u64,
            top_repositories: dto
                .top_repositories_by_size
                .into_iter()
                .map(|repo| RepositorySize {
                    name: repo.name,
                    size_bytes: repo.size.max(0) as u64,
                    image_count: repo.image_count,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteImagesBody<'a> {
    pub repository_name: &'a str,
    pub image_digests: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteByDateBody<'a> {
    pub repository_name: &'a str,
    pub days_old: u32,
    pub image_digests: &'a [String],
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum FailureEntry {
    Structured { digest: Option<String>, reason: String },
    Text(String),
}

impl From<FailureEntry> for DeletionFailure {
    fn from(entry: FailureEntry) -> Self {
        match entry {
            FailureEntry::Structured {
                digest: Some(digest),
                reason,
            } => DeletionFailure::new(digest, reason),
            FailureEntry::Structured {
                digest: None,
                reason,
            } => DeletionFailure::unattributed(reason),
            FailureEntry::Text(text) => parse_failure_text(&text),
        }
    }
}

/// Splits `Failed to delete image <digest>: <reason>`; anything else stays
/// an unattributed failure.
fn parse_failure_text(text: &str) -> DeletionFailure {
    text.strip_prefix(FAILURE_PREFIX)
        .and_then(|rest| rest.split_once(": "))
        .filter(|(digest, _)| !digest.is_empty())
        .map(|(digest, reason)| DeletionFailure::new(digest, reason))
        .unwrap_or_else(|| DeletionFailure::unattributed(text))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DeletionBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub deleted: Option<u64>,
    #[serde(default)]
    pub errors: Vec<FailureEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
