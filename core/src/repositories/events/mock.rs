//! Mock event publisher recording everything it receives.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::events::Event;
use crate::errors::DomainError;

use super::r#trait::EventPublisher;

/// Records published events for test assertions. Can be switched into a
/// failing mode to verify operations survive a broken transport.
#[derive(Default)]
pub struct MockEventPublisher {
    events: Arc<RwLock<Vec<Event>>>,
    fail: Arc<RwLock<bool>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_failing(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    pub async fn events(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }

    pub async fn kinds(&self) -> Vec<String> {
        self.events
            .read()
            .await
            .iter()
            .map(|e| e.kind.clone())
            .collect()
    }

    pub async fn count(&self) -> usize {
        self.events.read().await.len()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: &Event) -> Result<(), DomainError> {
        if *self.fail.read().await {
            return Err(DomainError::internal("event transport unavailable"));
        }
        self.events.write().await.push(event.clone());
        Ok(())
    }
}
