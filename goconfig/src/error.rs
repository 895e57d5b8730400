//! Error types for the goconfig library.
//!
//! Structural failures (missing packages, unparsable files, failing build
//! tools) are reported through [`Error`]. Non-critical anomalies such as
//! unknown snapshot keys or duplicate imports are logged and skipped instead.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a goconfig error.
///
/// # Examples
///
/// ```
/// use goconfig::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("main.version".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the goconfig library.
#[derive(Debug, Error)]
pub enum Error {
    /// No declaration file exists for the requested package.
    #[error("can't find {}", searched.display())]
    PackageNotFound {
        /// The requested package identifier.
        package: String,
        /// The first candidate path tried.
        searched: PathBuf,
    },

    /// A declaration or snapshot file could not be interpreted.
    #[error("{source_name}: {message}")]
    Malformed {
        /// File or entry the problem was found in.
        source_name: String,
        /// A description of the problem.
        message: String,
    },

    /// A YAML document was not well formed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The build tool could not report the current package.
    #[error("package discovery failed: {message}")]
    PackageDiscovery {
        /// A description of the failure.
        message: String,
    },

    /// The build tool exited unsuccessfully or could not be started.
    #[error("{program}: {message}")]
    BuildTool {
        /// The program that was run.
        program: String,
        /// Combined output captured before the failure.
        output: String,
        /// A description of the failure.
        message: String,
    },

    /// A change was submitted against an outdated registry version.
    #[error("stale edit of {package}: submitted version {submitted}, current version {current}")]
    StaleVersion {
        /// The package whose registry was edited.
        package: String,
        /// The version the edit was based on.
        submitted: u64,
        /// The registry's current version.
        current: u64,
    },

    /// An entry required by the operation does not exist.
    #[error("{name} not found")]
    UnknownEntry {
        /// The missing entry name.
        name: String,
    },

    /// A runtime setting has an unusable value.
    #[error("invalid setting '{field}': {message}")]
    InvalidSetting {
        /// The setting that failed validation.
        field: String,
        /// A description of the failure.
        message: String,
    },
}

impl Error {
    /// Check if error indicates a missing package.
    ///
    /// # Examples
    ///
    /// ```
    /// use goconfig::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PackageNotFound {
    ///     package: "hello".to_string(),
    ///     searched: PathBuf::from("hello/goconfig.yaml"),
    /// };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PackageNotFound { .. } | Self::UnknownEntry { .. })
    }

    /// Output captured from a failed build tool, if any.
    #[must_use]
    pub fn tool_output(&self) -> Option<&str> {
        match self {
            Self::BuildTool { output, .. } => Some(output),
            _ => None,
        }
    }
}
