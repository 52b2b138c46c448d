//! Paging and filter inputs shared by the list queries.

use serde::{Deserialize, Serialize};

/// Page selection for the list queries. Absent values are not sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl Pagination {
    pub const fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self { page, page_size }
    }

    /// Both values set.
    pub const fn page(page: u32, page_size: u32) -> Self {
        Self { page: Some(page), page_size: Some(page_size) }
    }

    /// Let the server pick its defaults.
    pub const fn unpaged() -> Self {
        Self { page: None, page_size: None }
    }
}
