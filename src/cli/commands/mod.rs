//! Subcommand implementations.

/// Configure command handler.
pub mod configure;

/// Directory translation handler.
pub mod translate;
