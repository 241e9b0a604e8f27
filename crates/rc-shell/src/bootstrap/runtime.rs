//! # Use Cases Accessor
//!
//! `AppRuntime` owns the long-lived pieces (event bus, notification center,
//! delete-by-date orchestrator). Stateless use cases are built on demand from
//! `AppDeps` through [`AppRuntime::usecases`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! # async fn demo(runtime: &rc_shell::AppRuntime) -> anyhow::Result<()> {
//! let repositories = runtime.usecases().list_repositories().execute().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rc_app::usecases::{
    CommitEngine, DeleteByDateOrchestrator, DeleteImage, GetGlobalStats, GetRepositoryDashboard,
    ListImages, ListRepositories, NotificationCenter, OutcomeReporter, PreviewEngine,
};
use rc_app::{AppDeps, ConsoleSettings};
use rc_core::ports::{ClockPort, ConsoleEventPort};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::wiring::wire_dependencies;
use crate::events::EventBus;

/// Application runtime with dependencies.
/// 包含所有应用依赖的运行时。
pub struct AppRuntime {
    pub deps: AppDeps,
    settings: ConsoleSettings,
    bus: EventBus,
    reporter: Arc<OutcomeReporter>,
    notifications: Arc<NotificationCenter>,
    /// Shared so every command sees the same gate and preview.
    /// 所有命令共享同一个工作流状态。
    delete_by_date: DeleteByDateOrchestrator,
}

impl AppRuntime {
    /// `deps.events` is expected to publish into `bus`.
    pub fn new(deps: AppDeps, bus: EventBus, settings: ConsoleSettings) -> Self {
        let reporter = Arc::new(OutcomeReporter::new(deps.events.clone()));
        let notifications = Arc::new(NotificationCenter::new(deps.events.clone()));
        let delete_by_date = DeleteByDateOrchestrator::new(
            Arc::new(PreviewEngine::from_ports(
                deps.registry.clone(),
                deps.clock.clone(),
            )),
            Arc::new(CommitEngine::from_ports(deps.registry.clone())),
            reporter.clone(),
            deps.events.clone(),
            settings.timings,
        );

        Self {
            deps,
            settings,
            bus,
            reporter,
            notifications,
            delete_by_date,
        }
    }

    pub fn usecases(&self) -> UseCases<'_> {
        UseCases { runtime: self }
    }

    pub fn settings(&self) -> &ConsoleSettings {
        &self.settings
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn delete_by_date(&self) -> &DeleteByDateOrchestrator {
        &self.delete_by_date
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.deps.clock.now()
    }

    /// Feeds bus events into the notification center until the bus closes.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_notification_observer(&self) -> JoinHandle<()> {
        let mut rx = self.bus.subscribe();
        let notifications = self.notifications.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => notifications.observe(&event.payload).await,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Notification observer lagged behind the event bus");
                    }
                    Err(RecvError::Closed) => {
                        debug!("Event bus closed, notification observer stopping");
                        break;
                    }
                }
            }
        })
    }
}

/// Builds the production runtime: HTTP registry client, system clock and a
/// fresh event bus.
pub fn create_runtime(settings: ConsoleSettings) -> anyhow::Result<AppRuntime> {
    let bus = EventBus::default();
    let events: Arc<dyn ConsoleEventPort> = Arc::new(bus.clone());
    let deps = wire_dependencies(&settings, events)?;
    Ok(AppRuntime::new(deps, bus, settings))
}

/// Use cases accessor with dependencies pre-wired.
/// 预先注入依赖的用例访问器。
pub struct UseCases<'a> {
    runtime: &'a AppRuntime,
}

impl UseCases<'_> {
    pub fn list_repositories(&self) -> ListRepositories {
        ListRepositories::from_ports(self.runtime.deps.registry.clone())
    }

    pub fn get_global_stats(&self) -> GetGlobalStats {
        GetGlobalStats::from_ports(self.runtime.deps.registry.clone())
    }

    pub fn get_repository_dashboard(&self) -> GetRepositoryDashboard {
        GetRepositoryDashboard::from_ports(self.runtime.deps.registry.clone())
    }

    pub fn list_images(&self) -> ListImages {
        ListImages::from_ports(self.runtime.deps.registry.clone())
    }

    pub fn delete_image(&self) -> DeleteImage {
        DeleteImage::from_ports(
            self.runtime.deps.registry.clone(),
            self.runtime.reporter.clone(),
        )
    }
}
