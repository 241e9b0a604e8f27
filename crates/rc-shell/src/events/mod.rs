//! Event Forwarding - publish console events to the presentation layer
//! 事件转发 - 将控制台事件发布到展示层

use async_trait::async_trait;
use rc_core::events::ConsoleEvent;
use rc_core::ports::ConsoleEventPort;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

pub const DEFAULT_CAPACITY: usize = 256;

/// Topic a given event is published under.
/// 事件对应的主题名。
pub fn topic(event: &ConsoleEvent) -> &'static str {
    match event {
        ConsoleEvent::GateChanged { .. } => "retention://gate",
        ConsoleEvent::PreviewReady { .. }
        | ConsoleEvent::PreviewCleared { .. }
        | ConsoleEvent::PreviewFailed { .. } => "retention://preview",
        ConsoleEvent::DeletionReported { .. } => "retention://outcome",
        ConsoleEvent::RefreshRequested { .. } => "registry://refresh",
        ConsoleEvent::NotificationShown { .. } | ConsoleEvent::NotificationDismissed { .. } => {
            "notifications://changed"
        }
    }
}

/// An event together with its topic, as delivered to listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicEvent {
    pub topic: &'static str,
    pub payload: ConsoleEvent,
}

impl From<ConsoleEvent> for TopicEvent {
    fn from(payload: ConsoleEvent) -> Self {
        Self {
            topic: topic(&payload),
            payload,
        }
    }
}

/// Broadcast bus implementing [`ConsoleEventPort`].
///
/// Publishing never blocks. Slow subscribers lose the oldest events and see
/// `RecvError::Lagged`.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<TopicEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TopicEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ConsoleEvent) {
        let event = TopicEvent::from(event);
        let topic = event.topic;
        if self.sender.send(event).is_err() {
            trace!(topic, "No subscribers for console event");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl ConsoleEventPort for EventBus {
    async fn emit(&self, event: ConsoleEvent) {
        self.publish(event);
    }
}
