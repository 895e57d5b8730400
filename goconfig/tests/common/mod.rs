//! Common test utilities for integration tests.
//!
//! This module provides a temporary Go workspace with the example packages
//! used across the integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use goconfig::config::{Settings, SettingsBuilder};
use tempfile::TempDir;

/// Declarations of a package with two tags and two strings.
pub const SIMPLE: &str = "\
t1: false
t2: false
main.s1: The quick brown fox
main.s2: \"\"
";

/// Declarations of three mutually exclusive tags.
pub const EXCLUSIVE: &str = "\
t1:
    init: true
    help: First of three exclusive tags.
    set:
        t2: false
        t3: false
t2:
    init: false
    set:
        t1: false
        t3: false
t3:
    init: false
    set:
        t1: false
        t2: false
";

/// Declarations that configure build tool flags.
pub const BUILDFLAGS: &str = "\
race: true
debug: true
compiler: gc
main.version: \"1.0\"
";

/// A temporary workspace laid out as `{root}/src/{package}/`.
pub struct Workspace {
    dir: TempDir,
}

#[allow(dead_code)]
impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Creates a workspace holding the example packages.
    pub fn with_examples() -> Self {
        let ws = Self::new();
        ws.write("simple", "goconfig.yaml", SIMPLE);
        ws.write("exclusive", "goconfig.yaml", EXCLUSIVE);
        ws.write("buildflags", "goconfig.yaml", BUILDFLAGS);
        ws.write(
            "example.com/importer/first",
            "goconfig.yaml",
            "First: true\nfirst.S: first string\n",
        );
        ws.write(
            "example.com/importer/second",
            "goconfig.yaml",
            "Second: false\nsecond.S: second string\n",
        );
        ws.write(
            "example.com/importer/third",
            "goconfig.yaml",
            "Third: true\nthird.S: \"\"\n",
        );
        ws.write(
            "example.com/importer/rel",
            "goconfig.yaml",
            "import:\n  - ../first\n  - ../second\nimport_third: false\nmain.s: rel string\n",
        );
        ws.write(
            "example.com/importer/rel",
            "goconfig_linux.yaml",
            "import: ../third\nThird: false\n",
        );
        ws.write(
            "example.com/importer/path",
            "goconfig.yaml",
            "import:\n  - example.com/importer/first\n  - example.com/importer/second\nmain.s: path string\n",
        );
        ws
    }

    /// Root of the workspace, used as the search path.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Directory of `package`.
    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.root().join("src").join(package)
    }

    /// Writes a file into a package directory.
    pub fn write(&self, package: &str, file: &str, text: &str) -> PathBuf {
        let dir = self.package_dir(package);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file);
        fs::write(&path, text).unwrap();
        path
    }

    /// Settings targeting linux/amd64 with this workspace as search path.
    pub fn settings(&self) -> Settings {
        self.settings_builder().build().unwrap()
    }

    /// Like [`Workspace::settings`] but open to further overrides.
    pub fn settings_builder(&self) -> SettingsBuilder {
        SettingsBuilder::new()
            .skip_env()
            .with_goos("linux")
            .with_goarch("amd64")
            .with_search_path(vec![self.root().to_path_buf()])
    }
}
