//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Apply environment overrides / 应用环境变量覆盖
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No default value logic / 禁止默认值逻辑** (see `rc_app::ConsoleSettings`)

use anyhow::Context;
use rc_core::config::AppConfig;
use std::path::{Path, PathBuf};

/// Replaces `[api] base_url` when set and non-empty.
pub const API_URL_ENV: &str = "REGISTRY_CONSOLE_API_URL";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// Values are taken as-is; empty or missing keys stay empty.
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Picks the config source.
///
/// An explicit path must exist. Without one, the platform config file is used
/// when present and an empty config otherwise.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path.to_path_buf());
    }

    match rc_infra::fs::default_config_path() {
        Ok(path) if path.exists() => load_config(path),
        Ok(_) => Ok(AppConfig::empty()),
        Err(err) => {
            tracing::debug!(error = %err, "No platform config directory");
            Ok(AppConfig::empty())
        }
    }
}

/// Applies process environment overrides to `config`.
/// 应用环境变量覆盖。
pub fn apply_env_overrides(config: &mut AppConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

fn apply_overrides_from(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
        config.api_base_url = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let file = write_config(
            r#"
            [api]
            base_url = "https://registry.internal:8443"
            timeout_secs = 10

            [retention]
            opening_guard_ms = 400
            outcome_display_ms = 2000

            [logging]
            directory = "/var/log/registry-console"
            file_logging = true
        "#,
        );

        let config = load_config(file.path().to_path_buf()).unwrap();

        assert_eq!(config.api_base_url, "https://registry.internal:8443");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.opening_guard_ms, 400);
        assert_eq!(config.outcome_display_ms, 2000);
        assert_eq!(config.refresh_delay_ms, 0);
        assert_eq!(
            config.log_directory,
            PathBuf::from("/var/log/registry-console")
        );
        assert!(config.file_logging);
    }

    #[test]
    fn test_load_config_returns_empty_values_when_missing() {
        let file = write_config("[api]\n");

        let config = load_config(file.path().to_path_buf()).unwrap();

        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let err = load_config(PathBuf::from("/this/path/does/not/exist/config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_returns_parse_error_on_invalid_toml() {
        let file = write_config("[api\nbase_url = ");

        let err = load_config(file.path().to_path_buf()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        assert!(resolve_config(Some(Path::new("/no/such/config.toml"))).is_err());
    }

    #[test]
    fn env_override_replaces_base_url() {
        let mut config = AppConfig::empty();
        config.api_base_url = "http://from-file:8081".into();

        apply_overrides_from(&mut config, |key| {
            (key == API_URL_ENV).then(|| "https://from-env".to_string())
        });

        assert_eq!(config.api_base_url, "https://from-env");
    }

    #[test]
    fn blank_env_value_is_ignored() {
        let mut config = AppConfig::empty();
        config.api_base_url = "http://from-file:8081".into();

        apply_overrides_from(&mut config, |_| Some("  ".to_string()));

        assert_eq!(config.api_base_url, "http://from-file:8081");
    }
}
