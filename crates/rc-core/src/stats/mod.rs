//! Aggregate statistics across the registry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySize {
    pub name: String,
    pub size_bytes: u64,
    pub image_count: u64,
}

/// Registry-wide totals plus repositories ordered by size, largest first.
/// 全局统计：总量以及按大小排序的仓库。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_repositories: u64,
    pub total_images: u64,
    pub total_size_bytes: u64,
    pub top_repositories: Vec<RepositorySize>,
}

impl GlobalStats {
    /// Keeps the totals and truncates the repository ranking.
    pub fn limited(mut self, limit: RepositoryLimit) -> Self {
        if let RepositoryLimit::Top(n) = limit {
            self.top_repositories.truncate(n);
        }
        self
    }
}

/// How many repositories the size ranking shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepositoryLimit {
    Top(usize),
    All,
}

impl RepositoryLimit {
    pub const PRESETS: [RepositoryLimit; 3] = [
        RepositoryLimit::Top(20),
        RepositoryLimit::Top(30),
        RepositoryLimit::All,
    ];

    /// Parses "20", "30", "all". Anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("all") {
            return Some(RepositoryLimit::All);
        }
        match raw.parse::<usize>() {
            Ok(n) if n > 0 => Some(RepositoryLimit::Top(n)),
            _ => None,
        }
    }
}

impl Default for RepositoryLimit {
    fn default() -> Self {
        RepositoryLimit::Top(20)
    }
}
