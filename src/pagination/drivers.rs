//! Offset and cursor fetch-all drivers

use super::types::{Collected, PaginationState, Partial, DEFAULT_MAX_PAGES};
use crate::error::{Error, Result};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

fn page_ceiling(max_pages: usize) -> usize {
    if max_pages == 0 {
        DEFAULT_MAX_PAGES
    } else {
        max_pages
    }
}

/// Collect every page from an offset-paginated endpoint.
///
/// `fetch` receives the offset of the page to load. The offset advances by
/// the number of items actually returned, and a page shorter than
/// `page_size` ends the loop. A zero `page_size` is treated as 1 and a zero
/// `max_pages` as [`DEFAULT_MAX_PAGES`].
///
/// On error the items gathered so far come back inside [`Partial`].
pub async fn fetch_all_offset<T, F, Fut>(
    cancel: &CancellationToken,
    page_size: usize,
    max_pages: usize,
    mut fetch: F,
) -> Collected<T>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let page_size = page_size.max(1);
    let max_pages = page_ceiling(max_pages);

    let mut all = Vec::new();
    let mut state = PaginationState::new();

    while state.page < max_pages {
        if cancel.is_cancelled() {
            return Err(Partial::new(all, Error::Cancelled));
        }

        let items = match fetch(state.offset).await {
            Ok(items) => items,
            Err(e) => return Err(Partial::new(all, e)),
        };

        let count = items.len();
        all.extend(items);
        state.record_page(count);
        debug!(page = state.page, offset = state.offset, count, "fetched offset page");

        if count < page_size {
            break;
        }
        state.add_offset(count);
    }

    Ok(all)
}

/// Collect every page from a cursor-paginated endpoint.
///
/// `fetch` receives the cursor to load (empty for the first page) and
/// returns the page's items with the next cursor. An empty next cursor ends
/// the loop. A zero `max_pages` is treated as [`DEFAULT_MAX_PAGES`].
///
/// On error the items gathered so far come back inside [`Partial`].
pub async fn fetch_all_cursor<T, F, Fut>(
    cancel: &CancellationToken,
    max_pages: usize,
    mut fetch: F,
) -> Collected<T>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, String)>>,
{
    let max_pages = page_ceiling(max_pages);

    let mut all = Vec::new();
    let mut state = PaginationState::new();

    while state.page < max_pages {
        if cancel.is_cancelled() {
            return Err(Partial::new(all, Error::Cancelled));
        }

        let (items, next_cursor) = match fetch(state.cursor.clone()).await {
            Ok(page) => page,
            Err(e) => return Err(Partial::new(all, e)),
        };

        let count = items.len();
        all.extend(items);
        state.record_page(count);
        debug!(page = state.page, count, has_more = !next_cursor.is_empty(), "fetched cursor page");

        if next_cursor.is_empty() {
            break;
        }
        state.set_cursor(next_cursor);
    }

    Ok(all)
}
