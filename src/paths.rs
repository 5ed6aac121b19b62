//! XDG-style path utilities for configuration.
//!
//! Prefers XDG Base Directory Specification conventions over OS-specific
//! locations, so the config lives in the same place on Linux and macOS.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Returns the configuration directory for gtr.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/gtr` if `XDG_CONFIG_HOME` is set and non-empty
/// 2. `~/.config/gtr` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join("gtr")),
        _ => Ok(home_dir()?.join(".config").join("gtr")),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}
