use crate::events::ConsoleEvent;

/// Outbound channel towards the presentation layer.
///
/// Emission is fire-and-forget: a missing listener is not an error.
#[async_trait::async_trait]
pub trait ConsoleEventPort: Send + Sync {
    async fn emit(&self, event: ConsoleEvent);
}
