//! Runtime settings for goconfig.
//!
//! Settings describe the build target and where packages are found. They
//! are merged from several sources with the following precedence (highest to
//! lowest):
//!
//! 1. Programmatic overrides (via `SettingsBuilder::with_*`)
//! 2. Environment variables (`GOOS`, `GOARCH`, `GOPATH`, `GOCONFIG_TOOL`)
//! 3. Built-in defaults (host OS and architecture, `~/go`, `go`)
//!
//! # Examples
//!
//! ```
//! use goconfig::config::SettingsBuilder;
//!
//! let settings = SettingsBuilder::new()
//!     .skip_env()
//!     .with_goos("linux")
//!     .with_goarch("arm64")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(settings.candidates()[0], "goconfig_linux_arm64.yaml");
//! assert_eq!(settings.snapshot_file(), "goconfiguration_linux_arm64.yaml");
//! ```

pub mod builder;
pub mod environment;
pub mod settings;

pub use builder::SettingsBuilder;
pub use environment::EnvironmentSettings;
pub use settings::{host_arch, host_os, Settings};
