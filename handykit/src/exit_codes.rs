//! Stable exit codes for `handykit` CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to an invalid config file, arguments or other errors.
pub const INVALID: i32 = 1;
/// The requested launch profile does not exist.
pub const PROFILE_NOT_FOUND: i32 = 2;
/// `handykit add` found a profile with the same name.
pub const PROFILE_EXISTS: i32 = 3;
