//! CLI subcommand implementations.

pub mod seed;
pub mod validate;
