pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub mod logging;
pub mod noop;

pub use logging::LoggingEventPublisher;
pub use noop::NoopEventPublisher;
pub use r#trait::EventPublisher;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockEventPublisher;
