//! I/O helpers for scorebook commands.

pub mod config;
pub mod store;
