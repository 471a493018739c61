//! Event publisher trait.

use async_trait::async_trait;

use crate::domain::events::Event;
use crate::errors::DomainError;

/// Publishes domain events to whatever transport backs the deployment.
///
/// Services publish best-effort: a failed publish is logged and the
/// triggering operation still succeeds.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &Event) -> Result<(), DomainError>;
}
