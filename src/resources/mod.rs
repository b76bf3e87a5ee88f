//! Resource methods
//!
//! One method per endpoint: a path, a verb and an envelope. List methods
//! take the page position (`limit`/`offset` or `cursor`) explicitly so they
//! can be wrapped in a fetch closure for the pagination drivers.

mod attributes;
mod comments;
mod entries;
mod lists;
mod meetings;
mod members;
mod notes;
mod objects;
mod records;
mod tasks;
mod threads;
mod webhooks;

pub use attributes::AttributeTarget;
pub use meetings::MeetingFilter;
pub use records::RecordQuery;
pub use tasks::TaskFilter;
pub use threads::ThreadFilter;

use crate::types::{JsonObject, JsonValue};
use serde_json::json;

/// Wrap a payload as `{"data": ...}`
fn data_body(data: &JsonObject) -> JsonValue {
    json!({ "data": data })
}

#[cfg(test)]
mod tests;
