//! Console settings: configuration facts plus defaults.
//!
//! `AppConfig` carries whatever the file said; this is where zero and empty
//! values become usable settings.

use std::path::PathBuf;
use std::time::Duration;

use rc_core::AppConfig;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Timings of the confirmation dialog lifecycle.
/// 确认对话框生命周期的时间参数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionTimings {
    /// How long dismissal signals are absorbed after the dialog is requested.
    pub opening_guard: Duration,
    /// How long the outcome stays visible before the dialog closes itself.
    pub outcome_display: Duration,
    /// Delay between the dialog closing and the refresh signal.
    pub refresh_delay: Duration,
}

impl Default for RetentionTimings {
    fn default() -> Self {
        Self {
            opening_guard: Duration::from_millis(1200),
            outcome_display: Duration::from_millis(1500),
            refresh_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSettings {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub timings: RetentionTimings,
    /// `None` when the config left it empty; the shell picks a platform directory.
    pub log_directory: Option<PathBuf>,
    pub file_logging: bool,
}

impl ConsoleSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let defaults = RetentionTimings::default();
        let millis_or = |value: u64, fallback: Duration| {
            if value == 0 {
                fallback
            } else {
                Duration::from_millis(value)
            }
        };

        let api_base_url = if config.api_base_url.trim().is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            config.api_base_url.trim().to_string()
        };

        Self {
            api_base_url,
            request_timeout: if config.request_timeout_secs == 0 {
                DEFAULT_REQUEST_TIMEOUT
            } else {
                Duration::from_secs(config.request_timeout_secs)
            },
            timings: RetentionTimings {
                opening_guard: millis_or(config.opening_guard_ms, defaults.opening_guard),
                outcome_display: millis_or(config.outcome_display_ms, defaults.outcome_display),
                refresh_delay: millis_or(config.refresh_delay_ms, defaults.refresh_delay),
            },
            log_directory: if config.log_directory.as_os_str().is_empty() {
                None
            } else {
                Some(config.log_directory.clone())
            },
            file_logging: config.file_logging,
        }
    }
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_gets_defaults() {
        let settings = ConsoleSettings::from_config(&AppConfig::empty());

        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(settings.timings, RetentionTimings::default());
        assert_eq!(settings.log_directory, None);
    }

    #[test]
    fn explicit_values_win() {
        let mut config = AppConfig::empty();
        config.api_base_url = " https://registry.example.com ".into();
        config.request_timeout_secs = 5;
        config.opening_guard_ms = 300;
        config.log_directory = PathBuf::from("/tmp/logs");

        let settings = ConsoleSettings::from_config(&config);

        assert_eq!(settings.api_base_url, "https://registry.example.com");
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(settings.timings.opening_guard, Duration::from_millis(300));
        assert_eq!(settings.timings.outcome_display, Duration::from_millis(1500));
        assert_eq!(settings.log_directory, Some(PathBuf::from("/tmp/logs")));
    }
}
