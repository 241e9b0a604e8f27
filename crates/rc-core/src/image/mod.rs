//! Image records as the console sees them.
//! 控制台视角下的镜像记录。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One image within a repository.
/// 仓库中的一个镜像。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub repository: String,
    /// Unique within the repository; the key of every deletion request.
    pub digest: String,
    /// `None` means untagged. Tags are not unique.
    pub tag: Option<String>,
    pub size_bytes: u64,
    pub pushed_at: Option<DateTime<Utc>>,
    /// `None` means the image was never pulled.
    pub last_pull_at: Option<DateTime<Utc>>,
}

impl ImageRecord {
    pub fn is_untagged(&self) -> bool {
        self.tag.as_deref().map_or(true, str::is_empty)
    }
}

/// Backend-side orderings offered by the image list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRanking {
    /// Most recent pull first.
    MostDownloaded,
    /// Largest size first.
    Largest,
}

impl ImageRanking {
    pub const DEFAULT_LIMIT: usize = 10;

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageRanking::MostDownloaded => "most_downloaded",
            ImageRanking::Largest => "largest",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tag_counts_as_untagged() {
        let mut image = ImageRecord {
            repository: "api".into(),
            digest: "sha256:aa".into(),
            tag: Some(String::new()),
            size_bytes: 1,
            pushed_at: None,
            last_pull_at: None,
        };
        assert!(image.is_untagged());

        image.tag = Some("v1".into());
        assert!(!image.is_untagged());

        image.tag = None;
        assert!(image.is_untagged());
    }
}
