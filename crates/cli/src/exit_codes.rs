//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                                |
//! |------|--------------------------------------------------------|
//! | 0    | Success                                                |
//! | 1    | General error (unspecified)                            |
//! | 2    | CLI usage error (emitted by clap)                      |
//! | 4    | File could not be read or parsed                       |
//! | 10   | Empty query — blocked before any network call          |
//! | 20   | Backend unreachable (network failure or bad response)  |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Input file missing, unreadable, or not parseable as a spreadsheet.
pub const EXIT_FILE_PARSE: u8 = 4;

/// Query was empty after trimming; nothing was sent anywhere.
pub const EXIT_QUERY_EMPTY: u8 = 10;

/// The insight backend could not be reached, returned a bad status, or
/// answered with a body that was not JSON.
pub const EXIT_BACKEND: u8 = 20;
