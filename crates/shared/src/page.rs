use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Pagination arguments as received in query strings
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageArgs {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageArgs {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// One page of results
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, args: PageArgs, total: i64) -> Self {
        let total = total.max(0) as u64;
        let limit = args.limit();

        Self {
            items,
            pagination: Pagination {
                page: args.page(),
                limit,
                total,
                total_pages: total.div_ceil(limit),
            },
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
