//! XDG-style path utilities for configuration and cache directories.
//!
//! XDG Base Directory conventions are preferred over OS-specific locations
//! so the config file sits in the same place on every platform.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "cmtl";

/// Returns the configuration directory for cmtl.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/cmtl` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/cmtl` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(".config").join(APP_DIR)),
    }
}

/// Returns the cache directory for cmtl.
///
/// Resolution order:
/// 1. `$XDG_CACHE_HOME/cmtl` if `XDG_CACHE_HOME` is set
/// 2. `~/.cache/cmtl` otherwise
pub fn cache_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CACHE_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(".cache").join(APP_DIR)),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}
