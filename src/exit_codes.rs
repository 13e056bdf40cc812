//! Exit code constants for the stubcheck CLI.
//!
//! - 0: Success (also returned when stubs fail unless `fail_on_errors` is set)
//! - 1: User error (bad args, invalid config, unusable corpus)
//! - 2: Validation failure (at least one language recorded errors)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or an unusable corpus.
pub const USER_ERROR: i32 = 1;

/// Validation failure: some generated stub was rejected and `fail_on_errors` is on.
pub const VALIDATION_FAILURE: i32 = 2;
