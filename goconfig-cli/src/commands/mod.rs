//! CLI command implementations.
//!
//! - `show`: Print parameter values
//! - `set`: Apply assignments and store the snapshot
//! - `reinit`: Restore declared defaults
//! - `describe`: Print an entry's declaration
//! - `list`: List configurable packages
//! - `tool`: Build tool pass-through for `build`, `run`, `test`, `install` and `go`
//! - `completions`: Shell completion scripts

pub mod completions;
pub mod describe;
pub mod list;
pub mod reinit;
pub mod set;
pub mod show;
pub mod tool;

pub use completions::CompletionsCommand;
pub use describe::DescribeCommand;
pub use list::ListCommand;
pub use reinit::ReinitCommand;
pub use set::SetCommand;
pub use show::ShowCommand;
pub use tool::ToolCommand;
