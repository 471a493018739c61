//! Event publisher that discards everything.

use async_trait::async_trait;

use crate::domain::events::Event;
use crate::errors::DomainError;

use super::r#trait::EventPublisher;

/// Drops every event. For deployments that do not consume events.
#[derive(Debug, Default, Clone)]
pub struct NoopEventPublisher;

impl NoopEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for NoopEventPublisher {
    async fn publish(&self, _event: &Event) -> Result<(), DomainError> {
        Ok(())
    }
}
