//! CLI module
//!
//! Command-line interface over the Attio API.
//!
//! # Commands
//!
//! - `self` - Show the token's workspace
//! - `objects`, `attributes`, `records`, `lists`, `entries` - Data model and data
//! - `notes`, `tasks`, `comments`, `threads` - Collaboration
//! - `webhooks`, `meetings`, `members` - Workspace resources
//! - `config` - Local profiles and API keys
//!
//! List commands take `--all` to walk every page; Ctrl-C stops after the
//! request in flight and prints what was collected.

mod commands;
mod exit;
mod output;
mod runner;

pub use commands::{Cli, Commands};
pub use exit::{exit_code, AUTH, GENERIC, NO_RESULTS, SUCCESS, USAGE};
pub use output::{resource_id, OutputMode, Printer};
pub use runner::{read_json_object, read_json_value, Runner};

#[cfg(test)]
mod tests;
