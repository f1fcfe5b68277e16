//! Subcommand implementations

pub mod hello;
pub mod serve;
pub mod tables;
