//! Stable exit codes for scorebook CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Input failed validation, or no record was selected.
pub const INVALID: i32 = 1;
/// The referenced record id does not exist.
pub const NOT_FOUND: i32 = 2;
/// Storage or configuration failure.
pub const STORAGE: i32 = 3;
