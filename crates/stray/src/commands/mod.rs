//! CLI subcommand implementations.

pub mod audit;
pub mod list;
pub mod refs;
