//! Notification center (toasts).
//!
//! Subscribes to console events and keeps its own auto-dismiss timers; it never
//! talks to the confirmation gate.

use std::sync::Arc;

use rc_core::events::{ConsoleEvent, Notification, NotificationVariant};
use rc_core::ports::ConsoleEventPort;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Default)]
struct NotificationState {
    next_id: u64,
    active: Vec<Notification>,
}

/// Active toasts with variant-dependent lifetimes.
/// 带自动消失的提示中心。
#[derive(Clone)]
pub struct NotificationCenter {
    state: Arc<Mutex<NotificationState>>,
    events: Arc<dyn ConsoleEventPort>,
}

impl NotificationCenter {
    pub fn new(events: Arc<dyn ConsoleEventPort>) -> Self {
        Self {
            state: Arc::new(Mutex::new(NotificationState::default())),
            events,
        }
    }

    /// Shows a toast and schedules its removal. Returns its id.
    pub async fn show(
        &self,
        title: impl Into<String>,
        description: Option<String>,
        variant: NotificationVariant,
    ) -> u64 {
        let notification = {
            let mut state = self.state.lock().await;
            state.next_id += 1;
            let notification = Notification {
                id: state.next_id,
                title: title.into(),
                description,
                variant,
            };
            state.active.push(notification.clone());
            notification
        };
        let id = notification.id;

        self.events
            .emit(ConsoleEvent::NotificationShown { notification })
            .await;

        let center = self.clone();
        let lifetime = variant.display_duration();
        tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            center.dismiss(id).await;
        });

        id
    }

    pub async fn success(&self, title: impl Into<String>, description: Option<String>) -> u64 {
        self.show(title, description, NotificationVariant::Success).await
    }

    pub async fn error(&self, title: impl Into<String>, description: Option<String>) -> u64 {
        self.show(title, description, NotificationVariant::Error).await
    }

    pub async fn warning(&self, title: impl Into<String>, description: Option<String>) -> u64 {
        self.show(title, description, NotificationVariant::Warning).await
    }

    pub async fn info(&self, title: impl Into<String>, description: Option<String>) -> u64 {
        self.show(title, description, NotificationVariant::Info).await
    }

    /// Removes a toast. `false` if it was already gone.
    pub async fn dismiss(&self, id: u64) -> bool {
        let removed = {
            let mut state = self.state.lock().await;
            let before = state.active.len();
            state.active.retain(|n| n.id != id);
            state.active.len() != before
        };
        if removed {
            self.events
                .emit(ConsoleEvent::NotificationDismissed { id })
                .await;
        }
        removed
    }

    pub async fn active(&self) -> Vec<Notification> {
        self.state.lock().await.active.clone()
    }

    /// Turns reported deletions into toasts. Other events are ignored.
    pub async fn observe(&self, event: &ConsoleEvent) {
        match event {
            ConsoleEvent::DeletionReported { notice, .. } => {
                self.show(
                    notice.title.clone(),
                    Some(notice.description.clone()),
                    notice.variant,
                )
                .await;
            }
            other => debug!(event = ?other, "notification center ignoring event"),
        }
    }
}
