#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # goconfig
//!
//! A library for declaring, configuring and applying the build parameters
//! of Go packages.
//!
//! A package declares boolean tags and string parameters in
//! `goconfig*.yaml` files. The operator's chosen values are stored in a
//! per-target snapshot, and a build command is synthesized from them: true
//! tags become `-tags`, non-empty strings become `-ldflags -X` defines.
//!
//! ## Core Types
//!
//! - [`TriState`] and [`Kind`]: Parameter values
//! - [`Entry`] and [`Registry`]: Parameters and their ordered collection
//! - [`Loader`] and [`PackageConfig`]: Declaration loading
//! - [`GoCommand`] and [`Synthesizer`]: Build tool invocation
//! - [`SessionStore`]: Versioned configurations for concurrent front ends
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use goconfig::{snapshot, Entry, Registry, TriState};
//!
//! let mut registry = Registry::new();
//! registry.declare("t1", Entry::new(TriState::False));
//! registry.declare("main.s1", Entry::new(TriState::from("The quick brown fox")));
//! registry.materialize();
//!
//! snapshot::overlay(&mut registry, "t1: true\n").unwrap();
//! assert_eq!(
//!     snapshot::serialize_snapshot(&registry),
//!     "t1: true\nmain.s1: The quick brown fox\n"
//! );
//! ```

pub mod command;
pub mod config;
pub mod entry;
pub mod error;
pub mod loader;
pub mod logging;
pub mod package;
pub mod path;
pub mod registry;
pub mod session;
pub mod shell;
pub mod snapshot;
pub mod value;

// Re-export key types at crate root for convenience
pub use command::{GoCommand, Synthesizer};
pub use config::{Settings, SettingsBuilder};
pub use entry::{Cascade, Entry};
pub use error::{Error, Result};
pub use loader::Loader;
pub use logging::{init_logger, LogLevel, Logger};
pub use package::{PackageConfig, ALL};
pub use registry::Registry;
pub use session::{Change, Session, SessionStore};
pub use value::{Kind, TriState};
