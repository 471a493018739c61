//! Common type definitions
//!
//! - `pagination` - Pagination for list operations
//! - `response` - Error response structure returned to API clients

pub mod pagination;
pub mod response;

pub use pagination::{Page, Pagination};
pub use response::ErrorResponse;
