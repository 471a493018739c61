//! Role and permission administration, plus storage-backed access checks.

mod service;

#[cfg(test)]
mod tests;

pub use service::RbacService;
