//! Stable exit codes for responsefile CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid config or arguments, unreadable or malformed response files, or other errors.
pub const INVALID: i32 = 1;
/// `responsefile exec` killed the child because its timeout elapsed.
pub const TIMEOUT: i32 = 124;
/// `responsefile exec` child ended without an exit code (e.g. killed by a signal).
pub const NO_EXIT_CODE: i32 = 125;
