//! Student score book with a derived faculty recommendation.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (classification, validation, types).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (SQLite storage, config files).
//!
//! [`form`] is the narrow interface a presentation layer calls: it validates raw
//! input, classifies it and drives the store.

pub mod core;
pub mod exit_codes;
pub mod form;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
