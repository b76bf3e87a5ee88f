//! Pagination types
//!
//! Loop state shared by the drivers and the partial-result error they
//! return when a page fetch fails or the loop is cancelled.

use crate::error::Error;
use std::fmt;

/// Pages fetched when the caller passes no ceiling
pub const DEFAULT_MAX_PAGES: usize = 100;

/// Outcome of a multi-page fetch
pub type Collected<T> = std::result::Result<Vec<T>, Partial<T>>;

/// State of one pagination loop. Created per call and discarded with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Pages fetched so far
    pub page: usize,
    /// Offset for the next offset-style fetch
    pub offset: usize,
    /// Cursor for the next cursor-style fetch; empty means first page
    pub cursor: String,
    /// Items accumulated so far
    pub total_fetched: usize,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page of `count` items
    pub fn record_page(&mut self, count: usize) {
        self.page += 1;
        self.total_fetched += count;
    }

    /// Advance the offset by the number of items actually returned
    pub fn add_offset(&mut self, count: usize) {
        self.offset += count;
    }

    pub fn set_cursor(&mut self, cursor: String) {
        self.cursor = cursor;
    }
}

/// Items collected before a fetch loop stopped with an error.
///
/// The items are never discarded: callers decide whether a partial result
/// is usable.
#[derive(Debug)]
pub struct Partial<T> {
    /// Everything accumulated before the failure, in page order
    pub items: Vec<T>,
    /// The injected fetch error or [`Error::Cancelled`]
    pub error: Error,
}

impl<T> Partial<T> {
    pub fn new(items: Vec<T>, error: Error) -> Self {
        Self { items, error }
    }

    pub fn into_parts(self) -> (Vec<T>, Error) {
        (self.items, self.error)
    }

    pub fn is_cancelled(&self) -> bool {
        self.error.is_cancelled()
    }
}

impl<T> fmt::Display for Partial<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (after {} items)", self.error, self.items.len())
    }
}

impl<T: fmt::Debug> std::error::Error for Partial<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<T> From<Partial<T>> for Error {
    fn from(partial: Partial<T>) -> Self {
        partial.error
    }
}
