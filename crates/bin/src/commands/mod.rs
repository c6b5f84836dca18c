//! Subcommand implementations.

pub mod address;
pub mod migrate;
