//! # Dependency Injection / 依赖注入模块
//!
//! The only place that depends on rc-infra and rc-app at once. Assembly only,
//! no decisions.
//! 唯一同时依赖 rc-infra 与 rc-app 的地方，仅用于组装。

use std::sync::Arc;

use anyhow::Context;
use rc_app::{AppDeps, ConsoleSettings};
use rc_core::ports::{ClockPort, ConsoleEventPort, RegistryPort};
use rc_infra::{HttpRegistryClient, SystemClock};
use tracing::info;

/// Builds the port implementations for `settings`.
///
/// # Errors / 错误
///
/// Fails when the API base URL is not absolute or the HTTP client cannot be built.
pub fn wire_dependencies(
    settings: &ConsoleSettings,
    events: Arc<dyn ConsoleEventPort>,
) -> anyhow::Result<AppDeps> {
    let registry: Arc<dyn RegistryPort> = Arc::new(
        HttpRegistryClient::new(&settings.api_base_url, settings.request_timeout)
            .context("Failed to create registry client")?,
    );
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    info!(
        api_base_url = %settings.api_base_url,
        timeout_secs = settings.request_timeout.as_secs(),
        "Dependencies wired"
    );

    Ok(AppDeps {
        registry,
        clock,
        events,
    })
}
