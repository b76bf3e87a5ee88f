//! Pagination module
//!
//! Supports: Offset, Cursor
//!
//! # Overview
//!
//! The Attio API mixes two pagination styles. Both drivers repeatedly call a
//! caller-supplied single-page fetch, accumulate the items in order and stop
//! on exhaustion, the page ceiling, the first error, or cancellation.
//! Cancellation is checked before every fetch, never after one.

mod drivers;
mod types;

pub use drivers::{fetch_all_cursor, fetch_all_offset};
pub use types::{Collected, PaginationState, Partial, DEFAULT_MAX_PAGES};
