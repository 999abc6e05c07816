//! Stable exit codes for launcher CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// The workflow file failed schema validation.
pub const INVALID_WORKFLOW: i32 = 1;
/// Any other failure (unresolvable package, missing scenario, bad config).
pub const ERROR: i32 = 2;
