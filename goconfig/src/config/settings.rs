//! Settings structure and derived file names.

use std::path::PathBuf;

/// Base name of declaration files.
pub const DECLARATION_BASE: &str = "goconfig";

/// Base name of snapshot files.
pub const SNAPSHOT_BASE: &str = "goconfiguration";

/// Extension shared by declaration and snapshot files.
pub const EXTENSION: &str = "yaml";

/// Default build tool program.
pub const DEFAULT_TOOL: &str = "go";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Target operating system, in build-tool naming.
    pub goos: String,

    /// Target architecture, in build-tool naming.
    pub goarch: String,

    /// Workspace roots searched for `src/<package>` directories.
    pub search_path: Vec<PathBuf>,

    /// Build tool program name.
    pub tool: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            goos: host_os().to_string(),
            goarch: host_arch().to_string(),
            search_path: default_search_path(),
            tool: DEFAULT_TOOL.to_string(),
        }
    }
}

impl Settings {
    /// Declaration file names, most specific first.
    #[must_use]
    pub fn candidates(&self) -> [String; 4] {
        [
            format!("{DECLARATION_BASE}_{}_{}.{EXTENSION}", self.goos, self.goarch),
            format!("{DECLARATION_BASE}_{}.{EXTENSION}", self.goarch),
            format!("{DECLARATION_BASE}_{}.{EXTENSION}", self.goos),
            Self::declaration_file().to_string(),
        ]
    }

    /// The least specific declaration file name, used in diagnostics.
    #[must_use]
    pub fn declaration_file() -> String {
        format!("{DECLARATION_BASE}.{EXTENSION}")
    }

    /// Snapshot file name for the target.
    #[must_use]
    pub fn snapshot_file(&self) -> String {
        format!("{SNAPSHOT_BASE}_{}_{}.{EXTENSION}", self.goos, self.goarch)
    }
}

/// Host operating system in build-tool naming.
#[must_use]
pub fn host_os() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}

/// Host architecture in build-tool naming.
#[must_use]
pub fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        "powerpc64" => "ppc64",
        arch => arch,
    }
}

fn default_search_path() -> Vec<PathBuf> {
    home::home_dir()
        .map(|home| vec![home.join("go")])
        .unwrap_or_default()
}
