//! Attio API client
//!
//! Turns a method, path segments, query and optional JSON body into one
//! logical request, sends it through the retrying transport under a single
//! whole-request timeout and decodes the answer.

mod api;
mod config;

pub use api::{AttioClient, Query};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
