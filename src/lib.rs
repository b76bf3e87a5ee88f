// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Attio CLI
//!
//! A client for the Attio CRM REST API with a command-line front end.
//!
//! ## Features
//!
//! - **Retrying transport**: 429 and 5xx responses and transport failures are
//!   retried with capped exponential back-off, honouring `Retry-After`
//! - **Pagination drivers**: offset and cursor fetch-all loops with a page
//!   ceiling, cancellation and partial results on failure
//! - **Resource methods**: objects, records, lists, entries, notes, tasks,
//!   comments, threads, webhooks, meetings and workspace members
//! - **Profiles**: API keys and base URLs stored per named profile
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use attio_cli::{fetch_all_offset, AttioClient, ClientConfig, RecordQuery, Result};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = AttioClient::new(ClientConfig::builder().api_key("sk_...").build())?;
//!
//!     let query = RecordQuery::default();
//!     let people = fetch_all_offset(&CancellationToken::new(), 500, 100, |offset| {
//!         client.query_records("people", &query, 500, offset)
//!     })
//!     .await?;
//!
//!     println!("{} people", people.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  cli: clap commands → Runner → Printer (json / plain)    │
//! └──────────────────────────────────────────────────────────┘
//!                │                          │
//! ┌──────────────┴───────────┐   ┌──────────┴──────────────┐
//! │ resources: one method    │   │ pagination: offset and  │
//! │ per endpoint             │   │ cursor fetch-all        │
//! └──────────────┬───────────┘   └─────────────────────────┘
//!                │
//! ┌──────────────┴───────────────────────────────────────────┐
//! │ client: URL building, auth headers, timeout, decoding    │
//! ├──────────────────────────────────────────────────────────┤
//! │ http: RetryTransport → RateLimiter → ReqwestTransport    │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Offset and cursor pagination drivers
pub mod pagination;

/// Attio API client
pub mod client;

/// Resource methods on the client
pub mod resources;

/// Profile configuration file
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{ApiError, Error, Result};
pub use types::*;

// Re-export commonly used types
pub use client::{AttioClient, ClientConfig};
pub use pagination::{fetch_all_cursor, fetch_all_offset, Collected, Partial};
pub use resources::{AttributeTarget, MeetingFilter, RecordQuery, TaskFilter, ThreadFilter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
