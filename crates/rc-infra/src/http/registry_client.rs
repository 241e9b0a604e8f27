use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rc_core::ports::{DeleteByDateRequest, DeleteImagesRequest, FetchError, RegistryPort};
use rc_core::retention::DeletionReply;
use rc_core::{GlobalStats, ImageRanking, ImageRecord};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::endpoint::ApiEndpoint;
use super::wire::{
    DeleteByDateBody, DeleteImagesBody, DeletionBody, ErrorBody, GlobalStatsDto, ImageDto,
};

const REPOSITORIES: &str = "/api/repositories";
const GLOBAL_STATS: &str = "/api/global-stats";
const IMAGES: &str = "/api/images";
const MOST_DOWNLOADED: &str = "/api/images/most-downloaded";
const LARGEST: &str = "/api/images/largest";
const DELETE: &str = "/api/images/delete";
const DELETE_BY_DATE: &str = "/api/images/delete-by-date";

/// Registry admin API client over HTTP.
/// 基于 HTTP 的注册表管理 API 客户端。
pub struct HttpRegistryClient {
    client: reqwest::Client,
    endpoint: ApiEndpoint,
}

impl HttpRegistryClient {
    /// `base_url` must be absolute (`http://host:port`, optional path prefix).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let endpoint = ApiEndpoint::new(base_url);
        reqwest::Url::parse(endpoint.base())
            .with_context(|| format!("Invalid API base URL: {base_url:?}"))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = self.endpoint.join(path);
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| request_error(path, e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| request_error(path, e))?;
        if !status.is_success() {
            return Err(status_error(path, status, &body));
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }

    async fn post_deletion<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<DeletionReply, FetchError> {
        let url = self.endpoint.join(path);
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| request_error(path, e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| request_error(path, e))?;
        decode_deletion_reply(path, status, &text)
    }

    async fn images(
        &self,
        path: &str,
        repository: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ImageRecord>, FetchError> {
        let mut query = vec![("repository", repository.to_string())];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        let images: Option<Vec<ImageDto>> = self.get_json(path, &query).await?;
        Ok(images
            .unwrap_or_default()
            .into_iter()
            .map(|dto| dto.into_record(repository))
            .collect())
    }
}

fn request_error(endpoint: &str, err: reqwest::Error) -> FetchError {
    let endpoint = endpoint.to_string();
    if err.is_timeout() {
        FetchError::Timeout { endpoint }
    } else if err.is_decode() {
        FetchError::Decode {
            endpoint,
            message: err.to_string(),
        }
    } else {
        FetchError::Transport {
            endpoint,
            message: err.to_string(),
        }
    }
}

fn status_error(endpoint: &str, status: StatusCode, body: &str) -> FetchError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => body.trim().to_string(),
    };
    FetchError::Status {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        message,
    }
}

/// 200 and other successes are complete, 206 is partial, anything else
/// must carry an `{error}` body to count as a backend rejection.
fn decode_deletion_reply(
    endpoint: &str,
    status: StatusCode,
    text: &str,
) -> Result<DeletionReply, FetchError> {
    if !status.is_success() {
        return match serde_json::from_str::<ErrorBody>(text) {
            Ok(body) => {
                warn!(endpoint, status = status.as_u16(), error = %body.error, "Deletion rejected");
                Ok(DeletionReply::Rejected {
                    status: status.as_u16(),
                    error: body.error,
                })
            }
            Err(_) => Err(status_error(endpoint, status, text)),
        };
    }

    let body: DeletionBody = if text.trim().is_empty() {
        DeletionBody::default()
    } else {
        serde_json::from_str(text).map_err(|e| FetchError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?
    };

    if status == StatusCode::PARTIAL_CONTENT {
        Ok(DeletionReply::PartiallyCompleted {
            deleted: body.deleted.unwrap_or(0),
            failures: body.errors.into_iter().map(Into::into).collect(),
            message: body.message,
        })
    } else {
        Ok(DeletionReply::Completed {
            deleted: body.deleted,
            message: body.message,
        })
    }
}

#[async_trait]
impl RegistryPort for HttpRegistryClient {
    #[tracing::instrument(name = "infra.registry.list_repositories", skip(self))]
    async fn list_repositories(&self) -> Result<Vec<String>, FetchError> {
        let repositories: Option<Vec<String>> = self.get_json(REPOSITORIES, &[]).await?;
        Ok(repositories.unwrap_or_default())
    }

    #[tracing::instrument(name = "infra.registry.global_stats", skip(self))]
    async fn global_stats(&self) -> Result<GlobalStats, FetchError> {
        let dto: GlobalStatsDto = self.get_json(GLOBAL_STATS, &[]).await?;
        Ok(dto.into())
    }

    #[tracing::instrument(name = "infra.registry.list_images", skip(self))]
    async fn list_images(&self, repository: &str) -> Result<Vec<ImageRecord>, FetchError> {
        self.images(IMAGES, repository, None).await
    }

    #[tracing::instrument(name = "infra.registry.top_images", skip(self))]
    async fn top_images(
        &self,
        repository: &str,
        ranking: ImageRanking,
        limit: usize,
    ) -> Result<Vec<ImageRecord>, FetchError> {
        let path = match ranking {
            ImageRanking::MostDownloaded => MOST_DOWNLOADED,
            ImageRanking::Largest => LARGEST,
        };
        self.images(path, repository, Some(limit)).await
    }

    #[tracing::instrument(
        name = "infra.registry.delete_images",
        skip(self, request),
        fields(repository = %request.repository, digests = request.digests.len())
    )]
    async fn delete_images(
        &self,
        request: &DeleteImagesRequest,
    ) -> Result<DeletionReply, FetchError> {
        let body = DeleteImagesBody {
            repository_name: &request.repository,
            image_digests: &request.digests,
        };
        self.post_deletion(DELETE, &body).await
    }

    #[tracing::instrument(
        name = "infra.registry.delete_by_date",
        skip(self, request),
        fields(
            repository = %request.repository,
            days_old = request.days_old,
            digests = request.digests.len()
        )
    )]
    async fn delete_by_date(
        &self,
        request: &DeleteByDateRequest,
    ) -> Result<DeletionReply, FetchError> {
        let body = DeleteByDateBody {
            repository_name: &request.repository,
            days_old: request.days_old,
            image_digests: &request.digests,
        };
        self.post_deletion(DELETE_BY_DATE, &body).await
    }
}
