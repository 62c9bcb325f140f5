//! # ats-cli
//!
//! Command definitions, output formatting and the terminal clipboard used
//! by the `ats-links` binary.

pub mod clipboard;
pub mod commands;
pub mod output;

pub use commands::Cli;
