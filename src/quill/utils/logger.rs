use flexi_logger::{FileSpec, Logger, LoggerHandle, WriteMode};
use std::path::PathBuf;

use crate::quill::utils::paths;

/// Environment variable overriding the log specification, e.g. `QUILL_LOG=quill=trace`
pub const LOG_ENV_VAR: &str = "QUILL_LOG";

/// Get the directory the log file is written to
///
/// ### Returns
/// - `Ok(PathBuf)`: The log directory
/// - `Err(anyhow::Error)`: If the configuration directory could not be determined or created
fn log_directory() -> anyhow::Result<PathBuf> {
    paths::config_dir()
}

/// Pick the default log level
///
/// ### Arguments
/// - `verbose`: Whether the user asked for more output
///
/// ### Returns
/// - `&'static str`: A log specification understood by `flexi_logger`
pub fn default_level(verbose: bool) -> &'static str {
    match (cfg!(debug_assertions), verbose) {
        (true, true) => "trace",
        (true, false) | (false, true) => "debug",
        (false, false) => "info",
    }
}

/// Initialize the file logger
///
/// The returned handle must be kept alive for as long as logging is needed.
///
/// ### Arguments
/// - `verbose`: Whether to raise the default log level
///
/// ### Returns
/// - `Ok(LoggerHandle)`: If the logger was initialized successfully
/// - `Err(anyhow::Error)`: If the logger could not be initialized
pub fn init(verbose: bool) -> anyhow::Result<LoggerHandle> {
    let directory = log_directory()?;
    let spec =
        std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| default_level(verbose).to_string());
    let handle = Logger::try_with_str(&spec)?
        .log_to_file(
            FileSpec::default()
                .directory(&directory)
                .basename("quill")
                .suppress_timestamp(),
        )
        .format(flexi_logger::detailed_format)
        .write_mode(WriteMode::Direct)
        .start()?;
    log::info!("Logger initialized in: {:?} ({})", directory, spec);
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::default_level;

    #[test]
    fn test_verbose_is_never_quieter() {
        assert_ne!(default_level(true), "info");
    }

    #[test]
    fn test_default_level_matches_build() {
        if cfg!(debug_assertions) {
            assert_eq!(default_level(false), "debug");
        } else {
            assert_eq!(default_level(false), "info");
        }
    }
}
