//! Subcommand implementations.

pub mod browse;
pub mod list;
pub mod reasons;
