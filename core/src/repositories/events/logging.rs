//! Event publisher that writes events to the structured log.

use async_trait::async_trait;
use tracing::info;

use crate::domain::events::Event;
use crate::errors::DomainError;

use super::r#trait::EventPublisher;

/// Publishes events as structured log lines. Useful in development and
/// as a default when no message broker is wired up.
#[derive(Debug, Default, Clone)]
pub struct LoggingEventPublisher;

impl LoggingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: &Event) -> Result<(), DomainError> {
        info!(
            event_id = %event.id,
            kind = %event.kind,
            user_id = %event.user_id,
            data = %serde_json::Value::Object(event.data.clone()),
            "domain event"
        );
        Ok(())
    }
}
