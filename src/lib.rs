//! # cmtl - Chinese comment translator
//!
//! `cmtl` walks a directory of source files, finds Chinese text in line
//! comments and replaces it with a machine translation from the Baidu
//! translation API. Rewritten files land in a mirrored output directory.
//!
//! ## Quick Start
//!
//! ```bash
//! export CMTL_APP_ID=20230714000000000
//! export CMTL_SECRET_KEY=...
//!
//! # Translate every file in ./translate into ./translated
//! cmtl ./translate ./translated
//!
//! # See what would be translated, without calling the API
//! cmtl --dry-run ./translate ./translated
//!
//! # Replace previous output instead of appending to it
//! cmtl --overwrite --to jp ./translate ./translated
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/cmtl/config.toml`:
//!
//! ```toml
//! [cmtl]
//! from = "zh"
//! to = "en"
//! marker = "//"
//!
//! [baidu]
//! app_id = "20230714000000000"
//! secret_key_env = "BAIDU_SECRET_KEY"
//! ```

/// Translation cache management using `SQLite`.
pub mod cache;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and setting resolution.
pub mod config;

/// Typed errors and exit codes.
pub mod error;

/// Chinese span extraction.
pub mod extract;

/// File system utilities.
pub mod fs;

/// Global output configuration (quiet mode, colors, logging macros).
pub mod output;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// Per-line translation and substitution.
pub mod rewrite;

/// Chunked line reading and comment isolation.
pub mod scan;

/// Translation adapter for the Baidu API.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
