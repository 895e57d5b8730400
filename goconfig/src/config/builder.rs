//! Builder for runtime settings.

use crate::config::environment::EnvironmentSettings;
use crate::config::settings::Settings;
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Builds [`Settings`] from defaults, the environment and overrides.
///
/// # Examples
///
/// ```
/// use goconfig::config::SettingsBuilder;
/// use std::path::PathBuf;
///
/// let settings = SettingsBuilder::new()
///     .skip_env()
///     .with_search_path(vec![PathBuf::from("/work")])
///     .with_tool("go")
///     .build()
///     .unwrap();
/// assert_eq!(settings.search_path, [PathBuf::from("/work")]);
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    goos: Option<String>,
    goarch: Option<String>,
    search_path: Option<Vec<PathBuf>>,
    tool: Option<String>,
    skip_env: bool,
}

impl SettingsBuilder {
    /// Start from built-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Override the target operating system.
    #[must_use]
    pub fn with_goos(mut self, goos: impl Into<String>) -> Self {
        self.goos = Some(goos.into());
        self
    }

    /// Override the target architecture.
    #[must_use]
    pub fn with_goarch(mut self, goarch: impl Into<String>) -> Self {
        self.goarch = Some(goarch.into());
        self
    }

    /// Override the workspace search path.
    #[must_use]
    pub fn with_search_path(mut self, search_path: Vec<PathBuf>) -> Self {
        self.search_path = Some(search_path);
        self
    }

    /// Override the build tool program.
    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Merge all sources and validate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] if the target names are empty or
    /// contain a path separator, or the tool name is empty.
    pub fn build(self) -> Result<Settings> {
        let mut settings = Settings::default();

        if !self.skip_env {
            EnvironmentSettings::apply_overrides(&mut settings)?;
        }

        if let Some(goos) = self.goos {
            settings.goos = goos;
        }
        if let Some(goarch) = self.goarch {
            settings.goarch = goarch;
        }
        if let Some(search_path) = self.search_path {
            settings.search_path = search_path;
        }
        if let Some(tool) = self.tool {
            settings.tool = tool;
        }

        Self::validate(&settings)?;
        Ok(settings)
    }

    fn validate(settings: &Settings) -> Result<()> {
        for (field, value) in [("goos", &settings.goos), ("goarch", &settings.goarch)] {
            if value.is_empty() || value.contains(['/', '\\']) {
                return Err(Error::InvalidSetting {
                    field: field.to_string(),
                    message: format!("{value:?} is not a valid target name"),
                });
            }
        }
        if settings.tool.trim().is_empty() {
            return Err(Error::InvalidSetting {
                field: "tool".to_string(),
                message: "must be non-empty".to_string(),
            });
        }
        Ok(())
    }
}
