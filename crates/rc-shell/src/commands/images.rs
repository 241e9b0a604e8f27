//! Image commands
//! 镜像相关命令

use rc_app::usecases::OutcomeReporter;
use rc_core::ImageRanking;
use tracing::{info_span, Instrument};

use super::dto::{DeletionOutcomeDto, ImageRowDto};
use super::CommandError;
use crate::bootstrap::AppRuntime;

/// Accepts `downloads`/`most-downloaded` and `size`/`largest`.
pub fn parse_ranking(raw: &str) -> Result<ImageRanking, CommandError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "downloads" | "most-downloaded" | "most_downloaded" => Ok(ImageRanking::MostDownloaded),
        "size" | "largest" => Ok(ImageRanking::Largest),
        other => Err(CommandError::invalid_argument(format!(
            "unknown ranking {other:?}, expected downloads or size"
        ))),
    }
}

/// Ranked image list. A missing or zero limit means ten.
pub async fn list_images(
    runtime: &AppRuntime,
    repository: &str,
    ranking: ImageRanking,
    limit: Option<usize>,
) -> Result<Vec<ImageRowDto>, CommandError> {
    let span = info_span!(
        "command.images.list",
        repository = %repository,
        ranking = ranking.as_str()
    );
    async {
        let images = runtime
            .usecases()
            .list_images()
            .execute(repository, ranking, limit)
            .await?;
        Ok::<_, CommandError>(ImageRowDto::from_records(&images, runtime.now()))
    }
    .instrument(span)
    .await
}

/// Deletes one image by digest. Backend failures come back as a `failed`
/// outcome, not as an error.
pub async fn delete_image(
    runtime: &AppRuntime,
    repository: &str,
    digest: &str,
) -> Result<DeletionOutcomeDto, CommandError> {
    let span = info_span!("command.images.delete", repository = %repository, digest = %digest);
    async {
        let outcome = runtime
            .usecases()
            .delete_image()
            .execute(repository, digest)
            .await?;
        let notice = OutcomeReporter::notice(&outcome);
        Ok::<_, CommandError>(DeletionOutcomeDto::from_outcome(&outcome, notice))
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rankings_parse_both_spellings() {
        assert_eq!(parse_ranking("downloads").unwrap(), ImageRanking::MostDownloaded);
        assert_eq!(parse_ranking("Largest").unwrap(), ImageRanking::Largest);
        assert_eq!(parse_ranking("age").unwrap_err().code, "invalid_argument");
    }
}
