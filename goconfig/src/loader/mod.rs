//! Declaration loading.
//!
//! A package's declarations come from up to four files in one directory,
//! read most specific first:
//!
//! ```text
//! goconfig_{os}_{arch}.yaml
//! goconfig_{arch}.yaml
//! goconfig_{os}.yaml
//! goconfig.yaml
//! ```
//!
//! The directory is found by trying each name under `{package}/` relative
//! to the working directory, then under `{root}/src/{package}/` for every
//! search-path root. Imports named by a file are loaded recursively and
//! merged after that file.
//!
//! # Examples
//!
//! ```no_run
//! use goconfig::config::SettingsBuilder;
//! use goconfig::Loader;
//!
//! let settings = SettingsBuilder::new().build().unwrap();
//! let mut config = Loader::new(&settings).load("github.com/me/hello").unwrap();
//! config.overlay_stored().unwrap();
//! for entry in config.registry().entries() {
//!     println!("{}: {}", entry.name(), entry.value());
//! }
//! ```

pub mod document;
mod imports;
mod listing;

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::package::{PackageConfig, ALL};
use crate::path::clean;
use crate::registry::Registry;
use crate::shell;

/// Loads package declarations according to a set of [`Settings`].
#[derive(Debug, Clone, Copy)]
pub struct Loader<'a> {
    settings: &'a Settings,
}

impl<'a> Loader<'a> {
    /// Creates a loader for the given settings.
    #[must_use]
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Settings this loader was created with.
    #[must_use]
    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    /// Loads a package's declarations and imports.
    ///
    /// `""` and `"."` name the package in the working directory, as reported
    /// by the build tool. [`ALL`] yields the package listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the package or an import cannot be found, a
    /// declaration file cannot be read or parsed, or package discovery fails.
    pub fn load(&self, package: &str) -> Result<PackageConfig> {
        let package = if package.is_empty() || package == "." {
            self.discover()?
        } else {
            package.to_string()
        };

        if package == ALL {
            return Ok(listing::list_all(self.settings));
        }

        let mut stack = Vec::new();
        self.load_nested(&package, &mut stack)?
            .ok_or_else(|| Error::Malformed {
                source_name: package.clone(),
                message: "imports itself".to_string(),
            })
    }

    /// Asks the build tool for the package in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PackageDiscovery`] if the tool fails or reports
    /// nothing.
    pub fn discover(&self) -> Result<String> {
        let tool = &self.settings.tool;
        let captured = shell::run_captured(tool, &["list".to_string()]).map_err(|e| {
            Error::PackageDiscovery {
                message: format!("{tool} list: {e}"),
            }
        })?;
        let package = captured.output.trim();
        if !captured.success {
            return Err(Error::PackageDiscovery {
                message: format!("{tool} list: {}: {package}", captured.status),
            });
        }
        if package.is_empty() {
            return Err(Error::PackageDiscovery {
                message: format!("{tool} list reported no package"),
            });
        }
        Ok(package.to_string())
    }

    /// Finds the first existing declaration file for `package`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PackageNotFound`] if no candidate exists.
    pub fn locate(&self, package: &str) -> Result<PathBuf> {
        for candidate in self.settings.candidates() {
            let rel = Path::new(package).join(&candidate);
            if rel.is_file() {
                return Ok(rel);
            }
            for root in &self.settings.search_path {
                let path = root.join("src").join(&rel);
                if path.is_file() {
                    return Ok(path);
                }
            }
        }
        Err(Error::PackageNotFound {
            package: package.to_string(),
            searched: Path::new(package).join(Settings::declaration_file()),
        })
    }

    /// Loads `package` unless its directory is already being loaded.
    ///
    /// `stack` holds the directories of the packages whose imports are
    /// being resolved.
    fn load_nested(&self, package: &str, stack: &mut Vec<PathBuf>) -> Result<Option<PackageConfig>> {
        let found = self.locate(package)?;
        let dir = absolute_dir(&found)?;
        if stack.contains(&dir) {
            return Ok(None);
        }

        log::debug!("loading {package} from {}", dir.display());
        stack.push(dir.clone());
        let registry = self.read_declarations(package, &dir, stack);
        stack.pop();

        let mut registry = registry?;
        registry.materialize();
        let snapshot_path = dir.join(self.settings.snapshot_file());
        Ok(Some(PackageConfig::new(package, dir, snapshot_path, registry)))
    }

    fn read_declarations(&self, package: &str, dir: &Path, stack: &mut Vec<PathBuf>) -> Result<Registry> {
        let mut registry = Registry::new();
        for candidate in self.settings.candidates() {
            let path = dir.join(&candidate);
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => return Err(Error::ReadFailed { path, source }),
            };
            log::debug!("{package}: reading {candidate}");
            let source_name = path.display().to_string();
            let targets = document::apply(&mut registry, &source_name, &text)?;
            for target in targets {
                imports::import(self, &mut registry, package, dir, &target, stack)?;
            }
        }
        Ok(registry)
    }
}

fn absolute_dir(found: &Path) -> Result<PathBuf> {
    let dir = found.parent().unwrap_or_else(|| Path::new("."));
    if dir.is_absolute() {
        Ok(clean(dir))
    } else {
        Ok(clean(&env::current_dir()?.join(dir)))
    }
}
