use rc_core::Notification;
use tracing::{info_span, Instrument};

use crate::bootstrap::AppRuntime;

/// Toasts currently on screen, oldest first.
pub async fn list_notifications(runtime: &AppRuntime) -> Vec<Notification> {
    runtime.notifications().active().await
}

/// Returns `false` when the toast had already expired.
pub async fn dismiss_notification(runtime: &AppRuntime, id: u64) -> bool {
    let span = info_span!("command.notifications.dismiss", id);
    async { runtime.notifications().dismiss(id).await }
        .instrument(span)
        .await
}
