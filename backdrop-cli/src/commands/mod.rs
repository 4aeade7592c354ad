//! Command implementations for the CLI.

/// Module containing the background extraction run.
pub mod extract;
