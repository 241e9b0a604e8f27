use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "registry-console";

/// Get the registry console configuration directory.
///
/// 获取控制台配置目录。
///
/// # Platform-specific Paths / 平台特定路径
/// - macOS: ~/Library/Application Support/registry-console
/// - Windows: %APPDATA%\registry-console
/// - Linux: $XDG_CONFIG_HOME/registry-console or ~/.config/registry-console
///
/// Directories are not created here; the caller decides when to create them.
/// 此函数不自动创建目录。
pub fn app_config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Failed to get platform-specific config directory")?;
    Ok(base.join(APP_DIR_NAME))
}

/// `config.toml` inside [`app_config_dir`].
pub fn default_config_path() -> Result<PathBuf> {
    Ok(app_config_dir()?.join("config.toml"))
}

/// 获取日志目录
pub fn app_log_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .context("Failed to get platform-specific data directory")?;
    Ok(base.join(APP_DIR_NAME).join("logs"))
}
