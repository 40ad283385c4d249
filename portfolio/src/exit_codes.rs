//! Stable exit codes for portfolio CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to I/O, parse, or config errors.
pub const INVALID: i32 = 1;
/// `portfolio check` found content problems.
pub const CONTENT_PROBLEMS: i32 = 2;
