//! Pagination types for list operations

use serde::{Deserialize, Serialize};

const MAX_LIMIT: u32 = 100;
const DEFAULT_LIMIT: u32 = 20;

/// Offset/limit pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of items to skip
    #[serde(default)]
    pub offset: u32,

    /// Maximum number of items to return
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: default_limit(),
        }
    }
}

impl Pagination {
    /// Create pagination parameters, clamping the limit to the allowed range
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// One page of results together with the total matching count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// Total number of matching items across all pages
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_clamped() {
        let p = Pagination::new(0, 1000);
        assert_eq!(p.limit, MAX_LIMIT);

        let p = Pagination::new(10, 0);
        assert_eq!(p.limit, 1);
        assert_eq!(p.offset, 10);
    }

    #[test]
    fn test_default_pagination() {
        let p = Pagination::default();
        assert_eq!(p.offset, 0);
        assert_eq!(p.limit, DEFAULT_LIMIT);
    }
}
