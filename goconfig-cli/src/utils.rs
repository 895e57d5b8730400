//! Utility functions for CLI operations.
//!
//! Settings resolution, package loading with the snapshot overlay, and
//! argument helpers shared by the commands.

use crate::error::CliError;
use goconfig::{snapshot, Loader, PackageConfig, Settings, SettingsBuilder};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Snapshot path that reads from standard input.
const STDIN_PATH: &str = "-";

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Snapshot file overlaid instead of the package's stored one.
    pub config: Option<PathBuf>,
}

/// Resolve runtime settings from the environment and defaults.
pub fn load_settings() -> Result<Settings, CliError> {
    Ok(SettingsBuilder::new().build()?)
}

/// Load a package and overlay its snapshot.
///
/// The `--config` snapshot, when given, replaces the stored one. The
/// returned configuration still stores to the package's own snapshot file.
pub fn open_package(
    global: &GlobalOptions,
    settings: &Settings,
    package: &str,
) -> Result<PackageConfig, CliError> {
    let mut config = Loader::new(settings).load(package)?;
    match &global.config {
        Some(path) => {
            let text = read_snapshot(path)?;
            snapshot::overlay(config.registry_mut(), &text)?;
            log::debug!("overlaid {}", path.display());
        }
        None => {
            if config.overlay_stored()? {
                log::debug!("overlaid {}", config.snapshot_path().display());
            }
        }
    }
    Ok(config)
}

/// Read snapshot text from a file, or from stdin for `-`.
pub fn read_snapshot(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == STDIN_PATH {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(fs::read_to_string(path)?)
}

/// Split a `NAME=VALUE` assignment at its first `=`.
pub fn parse_assignment(arg: &str) -> Result<(&str, &str), CliError> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(CliError::InvalidArguments(format!(
            "expected NAME=VALUE, got {arg:?}"
        ))),
    }
}
