//! Common test utilities for CLI integration tests.
//!
//! `TestEnv` owns a temporary Go workspace laid out as `{root}/src/{pkg}`
//! and hands out commands with a pinned environment: linux/amd64 target,
//! the workspace as `GOPATH`, and `echo` as the build tool.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
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
main.version: \"1.0\"
";

/// Snapshot file name for the pinned target.
pub const SNAPSHOT: &str = "goconfiguration_linux_amd64.yaml";

/// Isolated workspace for one test.
pub struct TestEnv {
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create an environment holding the example packages.
    pub fn new() -> Self {
        let env = Self {
            temp_dir: tempfile::tempdir().expect("Failed to create temp dir"),
        };
        env.write("simple", "goconfig.yaml", SIMPLE);
        env.write("exclusive", "goconfig.yaml", EXCLUSIVE);
        env.write("buildflags", "goconfig.yaml", BUILDFLAGS);
        env
    }

    /// Workspace root, used as `GOPATH`.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory of `package`.
    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.root().join("src").join(package)
    }

    /// Write a file into a package directory.
    pub fn write(&self, package: &str, file: &str, text: &str) -> PathBuf {
        let dir = self.package_dir(package);
        fs::create_dir_all(&dir).expect("Failed to create package directory");
        let path = dir.join(file);
        fs::write(&path, text).expect("Failed to write file");
        path
    }

    /// Stored snapshot text of `package`, if any.
    pub fn snapshot(&self, package: &str) -> Option<String> {
        fs::read_to_string(self.package_dir(package).join(SNAPSHOT)).ok()
    }

    /// Command with the pinned environment, run from the workspace root.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("goconfig").expect("Failed to find goconfig binary");
        cmd.current_dir(self.root())
            .env("GOPATH", self.root())
            .env("GOOS", "linux")
            .env("GOARCH", "amd64")
            .env("GOCONFIG_TOOL", "echo")
            .env_remove("GOCONFIG_LOG_MODE")
            .env_remove("GOCONFIG_SNAPSHOT")
            .env_remove("GOCONFIG_OUTPUT_FORMAT");
        cmd
    }
}
