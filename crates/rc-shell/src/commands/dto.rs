use chrono::{DateTime, Utc};
use rc_app::usecases::RepositoryDashboard;
use rc_core::events::OutcomeNotice;
use rc_core::format::{abbreviate_digest, format_absolute, format_bytes, format_relative, tag_label};
use rc_core::retention::{DeletionFailure, DeletionStatus};
use rc_core::{DeletionOutcome, GlobalStats, ImageRecord};
use serde::Serialize;

const DIGEST_PREVIEW_CHARS: usize = 19;

/// Image row DTO for the presentation layer.
///
/// Raw values travel alongside their display strings so views never format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRowDto {
    pub digest: String,
    pub digest_short: String,
    pub tag: String,
    pub untagged: bool,
    pub size_bytes: u64,
    pub size: String,
    pub pushed_at: String,
    pub last_pull: String,
    pub last_pull_exact: String,
}

impl ImageRowDto {
    pub fn from_record(record: &ImageRecord, now: DateTime<Utc>) -> Self {
        Self {
            digest: record.digest.clone(),
            digest_short: abbreviate_digest(&record.digest, DIGEST_PREVIEW_CHARS),
            tag: tag_label(record.tag.as_deref()).to_string(),
            untagged: record.is_untagged(),
            size_bytes: record.size_bytes,
            size: format_bytes(record.size_bytes),
            pushed_at: format_absolute(record.pushed_at),
            last_pull: format_relative(record.last_pull_at, now),
            last_pull_exact: format_absolute(record.last_pull_at),
        }
    }

    pub fn from_records(records: &[ImageRecord], now: DateTime<Utc>) -> Vec<Self> {
        records
            .iter()
            .map(|record| Self::from_record(record, now))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRowDto {
    pub name: String,
    pub image_count: u64,
    pub size_bytes: u64,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalStatsDto {
    pub total_repositories: u64,
    pub total_images: u64,
    pub total_size_bytes: u64,
    pub total_size: String,
    pub repositories: Vec<RepositoryRowDto>,
}

impl From<GlobalStats> for GlobalStatsDto {
    fn from(stats: GlobalStats) -> Self {
        Self {
            total_repositories: stats.total_repositories,
            total_images: stats.total_images,
            total_size_bytes: stats.total_size_bytes,
            total_size: format_bytes(stats.total_size_bytes),
            repositories: stats
                .top_repositories
                .into_iter()
                .map(|repo| RepositoryRowDto {
                    size: format_bytes(repo.size_bytes),
                    name: repo.name,
                    image_count: repo.image_count,
                    size_bytes: repo.size_bytes,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardDto {
    pub repository: String,
    pub image_count: usize,
    pub total_size_bytes: u64,
    pub total_size: String,
    pub most_downloaded: Vec<ImageRowDto>,
    pub largest: Vec<ImageRowDto>,
}

impl DashboardDto {
    pub fn from_dashboard(dashboard: &RepositoryDashboard, now: DateTime<Utc>) -> Self {
        Self {
            repository: dashboard.repository.clone(),
            image_count: dashboard.image_count,
            total_size_bytes: dashboard.total_size_bytes,
            total_size: format_bytes(dashboard.total_size_bytes),
            most_downloaded: ImageRowDto::from_records(&dashboard.most_downloaded, now),
            largest: ImageRowDto::from_records(&dashboard.largest, now),
        }
    }
}

/// Interpreted deletion result plus the wording shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionOutcomeDto {
    pub repository: String,
    pub status: DeletionStatus,
    pub requested: u64,
    pub deleted: u64,
    pub failed: u64,
    pub failures: Vec<DeletionFailure>,
    pub error: Option<String>,
    pub notice: OutcomeNotice,
}

impl DeletionOutcomeDto {
    pub fn from_outcome(outcome: &DeletionOutcome, notice: OutcomeNotice) -> Self {
        Self {
            repository: outcome.repository().to_string(),
            status: outcome.status(),
            requested: outcome.requested(),
            deleted: outcome.deleted(),
            failed: outcome.failed_count(),
            failures: outcome.failures().to_vec(),
            error: outcome.error().map(|err| err.to_string()),
            notice,
        }
    }
}
