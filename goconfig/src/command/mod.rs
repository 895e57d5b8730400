//! Build tool command synthesis.
//!
//! A requested command, such as `go build -v hello`, is combined with a
//! package's configuration into the argument vector actually run:
//!
//! ```text
//! go build [bool flags] [test flags] [-tags T] [-ldflags L] [valued flags] subject [args]
//! ```
//!
//! True tag entries become build tags, non-empty string entries become
//! linker defines, and entries named after configurable flags supply those
//! flags unless given explicitly.

pub mod flags;
mod parse;
mod synth;

pub use parse::GoCommand;
pub use synth::{dry_run_echo, Synthesizer};
