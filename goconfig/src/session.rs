//! Shared, versioned package configurations for concurrent front ends.
//!
//! Each package gets its own lock so edits to one package never wait on
//! another. Every accepted change bumps the package's version; a change
//! submitted against an older version is rejected with
//! [`Error::StaleVersion`] so the caller can show the current state.
//!
//! # Examples
//!
//! ```no_run
//! use goconfig::config::SettingsBuilder;
//! use goconfig::SessionStore;
//!
//! let store = SessionStore::new(SettingsBuilder::new().build().unwrap());
//! let session = store.open("example.com/hello").unwrap();
//! let mut session = session.lock().unwrap();
//! let version = session.version();
//! session.apply(version, "t1", "true").unwrap();
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::loader::Loader;
use crate::package::PackageConfig;

/// Outcome of an accepted change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    /// True if a set or reset cascade ran.
    pub cascaded: bool,
    /// The package's version after the change.
    pub version: u64,
}

/// One package configuration with its edit version.
#[derive(Debug)]
pub struct Session {
    config: PackageConfig,
    version: u64,
}

impl Session {
    /// Wraps a loaded configuration at version zero.
    #[must_use]
    pub fn new(config: PackageConfig) -> Self {
        Self { config, version: 0 }
    }

    /// Current edit version.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The guarded configuration.
    #[must_use]
    pub fn config(&self) -> &PackageConfig {
        &self.config
    }

    /// Sets an entry from operator text and stores the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StaleVersion`] if `submitted` is not the current
    /// version, [`Error::UnknownEntry`] if the entry does not exist, or an
    /// error if the snapshot cannot be written.
    pub fn apply(&mut self, submitted: u64, name: &str, raw: &str) -> Result<Change> {
        self.check(submitted)?;
        if !self.config.registry().contains(name) {
            return Err(Error::UnknownEntry {
                name: name.to_string(),
            });
        }
        let cascaded = self.config.registry_mut().set(name, raw);
        self.commit()?;
        Ok(Change {
            cascaded,
            version: self.version,
        })
    }

    /// Restores one entry, or all of them, from their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StaleVersion`] if `submitted` is not the current
    /// version, [`Error::UnknownEntry`] if a named entry does not exist, or
    /// an error if the snapshot cannot be written.
    pub fn reinitialize(&mut self, submitted: u64, name: Option<&str>) -> Result<Change> {
        self.check(submitted)?;
        match name {
            Some(name) => {
                if !self.config.registry_mut().reinitialize_one(name) {
                    return Err(Error::UnknownEntry {
                        name: name.to_string(),
                    });
                }
            }
            None => self.config.registry_mut().reinitialize_all(),
        }
        self.commit()?;
        Ok(Change {
            cascaded: false,
            version: self.version,
        })
    }

    fn check(&self, submitted: u64) -> Result<()> {
        if submitted == self.version {
            Ok(())
        } else {
            Err(Error::StaleVersion {
                package: self.config.package().to_string(),
                submitted,
                current: self.version,
            })
        }
    }

    fn commit(&mut self) -> Result<()> {
        self.version += 1;
        self.config.store()
    }
}

/// Package sessions keyed by package identifier.
#[derive(Debug)]
pub struct SessionStore {
    settings: Settings,
    sessions: Mutex<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Settings used to load packages.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the session for `package`, loading it on first use.
    ///
    /// A new session starts from the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the package cannot be loaded.
    pub fn open(&self, package: &str) -> Result<Arc<Mutex<Session>>> {
        if let Some(session) = self.lock_sessions().get(package) {
            return Ok(Arc::clone(session));
        }

        let mut config = Loader::new(&self.settings).load(package)?;
        config.overlay_stored()?;
        let loaded = Arc::new(Mutex::new(Session::new(config)));

        let mut sessions = self.lock_sessions();
        let session = sessions.entry(package.to_string()).or_insert(loaded);
        Ok(Arc::clone(session))
    }

    /// Drops the session for `package` so the next open reloads it.
    pub fn close(&self, package: &str) -> bool {
        self.lock_sessions().remove(package).is_some()
    }

    /// Identifiers of the open sessions, sorted.
    #[must_use]
    pub fn packages(&self) -> Vec<String> {
        let mut packages: Vec<String> = self.lock_sessions().keys().cloned().collect();
        packages.sort();
        packages
    }

    fn lock_sessions(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Mutex<Session>>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
