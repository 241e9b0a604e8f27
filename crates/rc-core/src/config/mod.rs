//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No default value calculation / 禁止默认值计算**
//!
//! Defaults live in `rc_app::ConsoleSettings`.

use std::path::PathBuf;

/// Console configuration DTO (pure data, no logic)
/// 控制台配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Registry API base URL (may be empty - resolved later)
    /// 注册表 API 基础地址（可能为空）
    pub api_base_url: String,

    /// HTTP request timeout in seconds, 0 when unset
    pub request_timeout_secs: u64,

    /// Dismissal guard window of the confirmation dialog, 0 when unset
    pub opening_guard_ms: u64,

    /// How long the outcome stays readable before the dialog closes, 0 when unset
    pub outcome_display_ms: u64,

    /// Delay between the dialog closing and the refresh signal, 0 when unset
    pub refresh_delay_ms: u64,

    /// Log directory (path info only, no existence check)
    /// 日志目录（仅路径信息，不检查目录是否存在）
    pub log_directory: PathBuf,

    /// Whether logs are also written to files
    pub file_logging: bool,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// **Prohibited / 禁止**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    /// 此方法必须不包含任何验证或默认值逻辑。空字符串是合法的"事实"。
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let section_int = |section: &str, key: &str| -> u64 {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(0)
        };

        Ok(Self {
            api_base_url: toml_value
                .get("api")
                .and_then(|a| a.get("base_url"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            request_timeout_secs: section_int("api", "timeout_secs"),
            opening_guard_ms: section_int("retention", "opening_guard_ms"),
            outcome_display_ms: section_int("retention", "outcome_display_ms"),
            refresh_delay_ms: section_int("retention", "refresh_delay_ms"),
            log_directory: PathBuf::from(
                toml_value
                    .get("logging")
                    .and_then(|l| l.get("directory"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            file_logging: toml_value
                .get("logging")
                .and_then(|l| l.get("file_logging"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        })
    }

    /// Create empty AppConfig (all empty/zero values)
    /// 创建空的 AppConfig（所有字段为空/零值）
    pub fn empty() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout_secs: 0,
            opening_guard_ms: 0,
            outcome_display_ms: 0,
            refresh_delay_ms: 0,
            log_directory: PathBuf::new(),
            file_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_returns_empty_base_url_when_missing() {
        let toml_value: Value = toml::from_str("[api]\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        // Empty string is a fact, not an error
        assert_eq!(config.api_base_url, "");
        assert_eq!(config.request_timeout_secs, 0);
    }

    #[test]
    fn test_from_toml_parses_all_sections() {
        let toml_str = r#"
            [api]
            base_url = "http://registry.internal:8081/"
            timeout_secs = 12

            [retention]
            opening_guard_ms = 900
            outcome_display_ms = 2000
            refresh_delay_ms = 250

            [logging]
            directory = "/var/log/registry-console"
            file_logging = true
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.api_base_url, "http://registry.internal:8081/");
        assert_eq!(config.request_timeout_secs, 12);
        assert_eq!(config.opening_guard_ms, 900);
        assert_eq!(config.outcome_display_ms, 2000);
        assert_eq!(config.refresh_delay_ms, 250);
        assert_eq!(config.log_directory, PathBuf::from("/var/log/registry-console"));
        assert!(config.file_logging);
    }

    #[test]
    fn test_from_toml_clamps_negative_durations_to_zero() {
        let toml_value: Value = toml::from_str("[retention]\nopening_guard_ms = -5\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.opening_guard_ms, 0);
    }

    #[test]
    fn test_empty_creates_valid_dto() {
        let config = AppConfig::empty();

        assert_eq!(config.api_base_url, "");
        assert!(!config.file_logging);
        assert_eq!(config, AppConfig::from_toml(&Value::Table(Default::default())).unwrap());
    }
}
