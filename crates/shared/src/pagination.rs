//! Offset/limit pagination.
//!
//! Offsets are not stable under concurrent inserts; callers that need a
//! consistent view must order by a unique key and accept drift.

use serde::Deserialize;

/// Page size used when the client does not ask for one.
pub const DEFAULT_LIMIT: i64 = 100;

/// Upper bound on any single page.
pub const MAX_LIMIT: i64 = 1000;

/// Raw `?skip=&limit=` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// A normalized page window: `skip >= 0`, `0 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    skip: i64,
    limit: i64,
}

impl Page {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip: skip.max(0),
            limit: limit.clamp(0, MAX_LIMIT),
        }
    }

    pub fn skip(&self) -> i64 {
        self.skip
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIMIT)
    }
}

impl From<PageQuery> for Page {
    fn from(query: PageQuery) -> Self {
        Self::new(
            query.skip.unwrap_or(0),
            query.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}
