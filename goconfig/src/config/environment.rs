//! Environment variable handling for settings overrides.

use crate::config::settings::Settings;
use crate::error::Result;
use std::env;

/// Handles environment variable overrides for settings.
///
/// # Examples
///
/// ```no_run
/// use goconfig::config::{EnvironmentSettings, Settings};
///
/// let mut settings = Settings::default();
/// EnvironmentSettings::apply_overrides(&mut settings).unwrap();
/// ```
pub struct EnvironmentSettings;

impl EnvironmentSettings {
    /// Apply environment variable overrides to settings.
    ///
    /// Empty variables are treated as unset.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` leaves room for validated
    /// variables.
    pub fn apply_overrides(settings: &mut Settings) -> Result<()> {
        if let Some(goos) = Self::non_empty("GOOS") {
            settings.goos = goos;
        }

        if let Some(goarch) = Self::non_empty("GOARCH") {
            settings.goarch = goarch;
        }

        if let Some(gopath) = env::var_os("GOPATH").filter(|v| !v.is_empty()) {
            settings.search_path = env::split_paths(&gopath)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }

        if let Some(tool) = Self::non_empty("GOCONFIG_TOOL") {
            settings.tool = tool;
        }

        Ok(())
    }

    fn non_empty(key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.is_empty())
    }
}
