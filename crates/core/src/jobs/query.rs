//! Query-string builder for the REST transport.
//!
//! The first parameter is introduced with `?`, every later one with `&`.
//! Values are percent-encoded; absent values are skipped entirely.

use std::fmt::Display;

use jobwire_domain::constants::{PAGE_PARAM, PAGE_SIZE_PARAM};
use jobwire_domain::Pagination;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    buf: String,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value`.
    pub fn push(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.buf.push(if self.buf.is_empty() { '?' } else { '&' });
        self.buf.push_str(key);
        self.buf.push('=');
        self.buf.push_str(&urlencoding::encode(&value.to_string()));
        self
    }

    /// Append `key=value` only when a value is present.
    pub fn push_opt<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Append one `key=value` pair per value, in order.
    pub fn push_all<V: Display>(&mut self, key: &str, values: &[V]) -> &mut Self {
        for value in values {
            self.push(key, value);
        }
        self
    }

    /// Append `page` and `pageSize` for whichever are set.
    pub fn paging(&mut self, pagination: Pagination) -> &mut Self {
        self.push_opt(PAGE_PARAM, pagination.page);
        self.push_opt(PAGE_SIZE_PARAM, pagination.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}
