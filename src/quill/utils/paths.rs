//! Where Quill keeps its own files (currently only the log).

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::quill::APP_NAME;

/// Base directory for per-user data
#[cfg(target_os = "windows")]
fn user_base() -> Result<PathBuf> {
    std::env::var("APPDATA")
        .map(PathBuf::from)
        .context("APPDATA is not set")
}

#[cfg(not(target_os = "windows"))]
fn user_base() -> Result<PathBuf> {
    std::env::var("HOME")
        .map(PathBuf::from)
        .context("HOME is not set")
}

/// Name of Quill's folder inside the base directory
fn dir_name() -> String {
    if cfg!(target_os = "windows") {
        APP_NAME.to_string()
    } else {
        format!(".{}", APP_NAME.to_lowercase())
    }
}

/// Resolve Quill's data directory, creating it on first use.
///
/// `%APPDATA%\Quill` on Windows, `~/.quill` elsewhere.
pub fn config_dir() -> Result<PathBuf> {
    let path = user_base()?.join(dir_name());
    fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create '{}'", path.display()))?;
    Ok(path)
}
