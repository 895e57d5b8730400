//! A loaded package: its identity, location and entry registry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::snapshot;

/// Pseudo-package naming the listing of every configurable package.
pub const ALL: &str = "all";

/// The configuration of one package.
///
/// Created by [`crate::Loader::load`]; front ends then overlay the stored
/// snapshot, apply changes through [`PackageConfig::registry_mut`] and
/// persist with [`PackageConfig::store`].
#[derive(Debug, Clone)]
pub struct PackageConfig {
    package: String,
    dir: PathBuf,
    snapshot_path: PathBuf,
    registry: Registry,
    listing: bool,
}

impl PackageConfig {
    pub(crate) fn new(package: &str, dir: PathBuf, snapshot_path: PathBuf, registry: Registry) -> Self {
        Self {
            package: package.to_string(),
            dir,
            snapshot_path,
            registry,
            listing: false,
        }
    }

    pub(crate) fn listing(registry: Registry) -> Self {
        Self {
            package: ALL.to_string(),
            dir: PathBuf::new(),
            snapshot_path: PathBuf::new(),
            registry,
            listing: true,
        }
    }

    /// Package identifier as requested or discovered.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Absolute directory holding the declaration files.
    ///
    /// Empty for the package listing.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the snapshot for the current target is stored.
    #[must_use]
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Returns true for the [`ALL`] package listing.
    #[must_use]
    pub fn is_listing(&self) -> bool {
        self.listing
    }

    /// The entries of this package.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the entries of this package.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Consumes the package, yielding its registry.
    #[must_use]
    pub fn into_registry(self) -> Registry {
        self.registry
    }

    /// Overlays the stored snapshot, if one exists.
    ///
    /// Returns false when there is no stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read or parsed.
    pub fn overlay_stored(&mut self) -> Result<bool> {
        if self.listing {
            return Ok(false);
        }
        let text = match fs::read_to_string(&self.snapshot_path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(source) => {
                return Err(Error::ReadFailed {
                    path: self.snapshot_path.clone(),
                    source,
                })
            }
        };
        snapshot::overlay(&mut self.registry, &text)?;
        Ok(true)
    }

    /// Rewrites the stored snapshot from the current values.
    ///
    /// The package listing has no snapshot; storing it does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot file cannot be written.
    pub fn store(&self) -> Result<()> {
        if self.listing {
            log::debug!("{ALL} has no snapshot");
            return Ok(());
        }
        fs::write(&self.snapshot_path, snapshot::serialize_snapshot(&self.registry))?;
        log::debug!("stored {}", self.snapshot_path.display());
        Ok(())
    }

    /// Discards every entry.
    pub fn clear(&mut self) {
        self.registry.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use crate::value::TriState;
    use tempfile::TempDir;

    fn package_in(dir: &Path) -> PackageConfig {
        let mut registry = Registry::new();
        registry.declare("t", Entry::new(TriState::False));
        registry.declare("main.s", Entry::new(TriState::from("")));
        registry.materialize();
        PackageConfig::new(
            "demo",
            dir.to_path_buf(),
            dir.join("goconfiguration_linux_amd64.yaml"),
            registry,
        )
    }

    #[test]
    fn test_overlay_stored_missing_snapshot() {
        let tmp = TempDir::new().unwrap();
        let mut config = package_in(tmp.path());
        assert!(!config.overlay_stored().unwrap());
    }

    #[test]
    fn test_store_then_overlay() {
        let tmp = TempDir::new().unwrap();
        let mut config = package_in(tmp.path());
        config.registry_mut().set_value("t", TriState::True);
        config.registry_mut().set_value("main.s", TriState::from("hi"));
        config.store().unwrap();

        let written = fs::read_to_string(config.snapshot_path()).unwrap();
        assert_eq!(written, "t: true\nmain.s: hi\n");

        let mut fresh = package_in(tmp.path());
        assert!(fresh.overlay_stored().unwrap());
        assert_eq!(fresh.registry().get("t").unwrap().value(), &TriState::True);
        assert_eq!(
            fresh.registry().get("main.s").unwrap().value(),
            &TriState::from("hi")
        );
    }

    #[test]
    fn test_listing_has_no_snapshot() {
        let mut config = PackageConfig::listing(Registry::new());
        assert!(config.is_listing());
        assert_eq!(config.package(), ALL);
        assert!(config.store().is_ok());
        assert!(!config.overlay_stored().unwrap());
    }

    #[test]
    fn test_clear() {
        let tmp = TempDir::new().unwrap();
        let mut config = package_in(tmp.path());
        config.clear();
        assert!(config.registry().is_empty());
    }
}
