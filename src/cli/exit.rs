//! Process exit codes

use crate::error::Error;

pub const SUCCESS: i32 = 0;
pub const GENERIC: i32 = 1;
pub const USAGE: i32 = 2;
pub const NO_RESULTS: i32 = 3;
pub const AUTH: i32 = 4;

/// Map a failed command to a stable exit code.
///
/// `AUTH` means no API key could be resolved. A key the API rejects is an
/// ordinary API error.
pub fn exit_code(err: &Error) -> i32 {
    match err {
        Error::Usage { .. } => USAGE,
        Error::NoResults => NO_RESULTS,
        Error::AuthRequired { .. } => AUTH,
        _ => GENERIC,
    }
}
