use anyhow::{Context, anyhow};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Build a hidden sibling path for the temporary copy of `path`
///
/// ### Arguments
/// - `path`: The destination path
///
/// ### Returns
/// - `Ok((PathBuf, PathBuf))`: The parent directory and the temporary file path
/// - `Err(anyhow::Error)`: If `path` has no parent directory or no file name
fn temp_path_for(path: &Path) -> anyhow::Result<(PathBuf, PathBuf)> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow!("Cannot save '{}': no parent directory", path.display()))?;
    let filename = path
        .file_name()
        .ok_or_else(|| anyhow!("Cannot save '{}': no file name", path.display()))?;
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos())
        .unwrap_or(0);
    let tmp_name = format!(
        ".{}.{}.{}.tmp",
        filename.to_string_lossy(),
        std::process::id(),
        nonce
    );
    Ok((parent.to_path_buf(), parent.join(tmp_name)))
}

fn write_synced(tmp_path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    let mut tmp_file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(tmp_path)
        .with_context(|| format!("Failed to create temp file '{}'", tmp_path.display()))?;
    tmp_file
        .write_all(contents)
        .with_context(|| format!("Failed to write temp file '{}'", tmp_path.display()))?;
    tmp_file
        .sync_all()
        .with_context(|| format!("Failed to sync temp file '{}'", tmp_path.display()))
}

/// Write file contents atomically: write a sibling temporary file, sync it, then
/// rename it over the destination.
///
/// ### Arguments
/// - `path`: The file to write
/// - `contents`: The bytes to write
///
/// ### Returns
/// - `Ok(())`: The destination now holds `contents`
/// - `Err(anyhow::Error)`: The destination was left untouched
pub fn atomic_write_file(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    let (parent, tmp_path) = temp_path_for(path)?;
    let result = write_synced(&tmp_path, contents).and_then(|()| {
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to move '{}' over '{}'",
                tmp_path.display(),
                path.display()
            )
        })
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
        return result;
    }
    sync_directory(&parent);
    Ok(())
}

/// Persist a rename inside `dir`. Failures are logged, not returned
#[cfg(unix)]
fn sync_directory(dir: &Path) {
    if let Err(e) = fs::File::open(dir).and_then(|handle| handle.sync_all()) {
        log::warn!("Failed to sync directory '{}': {}", dir.display(), e);
    }
}

#[cfg(not(unix))]
fn sync_directory(_dir: &Path) {}
