//! Console events - facts published towards the presentation layer
//! 控制台事件 - 发布给展示层的事实

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::retention::{ConfirmationState, DeletionOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationVariant {
    /// Errors stay on screen longer than everything else.
    pub fn display_duration(&self) -> Duration {
        match self {
            NotificationVariant::Error => Duration::from_millis(5000),
            _ => Duration::from_millis(3000),
        }
    }
}

/// A toast as rendered by the notification area.
/// 通知区域显示的一条提示。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub variant: NotificationVariant,
}

/// User-facing wording for a deletion outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeNotice {
    pub variant: NotificationVariant,
    pub title: String,
    pub description: String,
}

/// Events emitted to the presentation layer
/// 发送到展示层的事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConsoleEvent {
    /// Confirmation dialog changed phase
    GateChanged {
        repository: Option<String>,
        from: ConfirmationState,
        to: ConfirmationState,
    },
    /// A preview finished and is the current deletion set
    PreviewReady {
        repository: String,
        threshold_days: u32,
        candidates: usize,
        total_bytes: u64,
    },
    /// The current preview was discarded
    PreviewCleared { repository: Option<String> },
    /// A preview failed; no deletion set is available
    PreviewFailed { repository: String, message: String },
    /// A deletion finished and has been interpreted
    DeletionReported {
        outcome: DeletionOutcome,
        notice: OutcomeNotice,
    },
    /// Views showing this repository should reload
    RefreshRequested { repository: String },
    NotificationShown { notification: Notification },
    NotificationDismissed { id: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_notifications_last_longer() {
        assert_eq!(
            NotificationVariant::Error.display_duration(),
            Duration::from_secs(5)
        );
        for variant in [
            NotificationVariant::Success,
            NotificationVariant::Warning,
            NotificationVariant::Info,
        ] {
            assert_eq!(variant.display_duration(), Duration::from_secs(3));
        }
    }

    #[test]
    fn console_event_serializes_with_type_tag() {
        let refresh = serde_json::to_value(ConsoleEvent::RefreshRequested {
            repository: "api".into(),
        })
        .unwrap();
        assert_eq!(
            refresh,
            serde_json::json!({ "type": "RefreshRequested", "repository": "api" })
        );

        let gate = serde_json::to_value(ConsoleEvent::GateChanged {
            repository: None,
            from: ConfirmationState::Closed,
            to: ConfirmationState::Opening,
        })
        .unwrap();
        assert_eq!(
            gate,
            serde_json::json!({
                "type": "GateChanged",
                "repository": null,
                "from": "closed",
                "to": "opening"
            })
        );
    }
}
