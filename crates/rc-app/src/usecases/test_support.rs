use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use rc_core::events::ConsoleEvent;
use rc_core::image::{ImageRanking, ImageRecord};
use rc_core::ports::{
    ClockPort, ConsoleEventPort, DeleteByDateRequest, DeleteImagesRequest, FetchError,
    RegistryPort,
};
use rc_core::retention::DeletionReply;
use rc_core::stats::GlobalStats;

mockall::mock! {
    pub Registry {}

    #[async_trait]
    impl RegistryPort for Registry {
        async fn list_repositories(&self) -> Result<Vec<String>, FetchError>;
        async fn global_stats(&self) -> Result<GlobalStats, FetchError>;
        async fn list_images(&self, repository: &str) -> Result<Vec<ImageRecord>, FetchError>;
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
}

pub struct FixedClock(pub DateTime<Utc>);

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    pub events: Mutex<Vec<ConsoleEvent>>,
}

impl RecordingEvents {
    pub fn snapshot(&self) -> Vec<ConsoleEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConsoleEventPort for RecordingEvents {
    async fn emit(&self, event: ConsoleEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn fixed_now() -> DateTime<Utc> {
    "2024-06-01T12:00:00Z".parse().unwrap()
}

pub fn image(digest: &str, size_bytes: u64, pulled_days_ago: Option<i64>) -> ImageRecord {
    ImageRecord {
        repository: "api".into(),
        digest: digest.into(),
        tag: Some(format!("tag-{digest}")),
        size_bytes,
        pushed_at: Some(fixed_now() - Duration::days(500)),
        last_pull_at: pulled_days_ago.map(|d| fixed_now() - Duration::days(d)),
    }
}
