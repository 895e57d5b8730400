//! CLI structure and command definitions.

use crate::commands::{
    CompletionsCommand, DescribeCommand, ListCommand, ReinitCommand, SetCommand, ShowCommand,
    ToolCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Configure, build and test Go packages with declared build parameters.
#[derive(Parser)]
#[command(name = "goconfig")]
#[command(version, about = "Configure build tags and linker defines of Go packages", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Overlay this snapshot file instead of the package's stored one ("-" reads stdin)
    #[arg(long, value_name = "FILE", global = true, env = "GOCONFIG_SNAPSHOT")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print parameter values of a package
    Show(ShowCommand),

    /// Set parameters and store the package snapshot
    Set(SetCommand),

    /// Restore declared defaults and store the package snapshot
    Reinit(ReinitCommand),

    /// Print the full declaration of one parameter
    Describe(DescribeCommand),

    /// List configurable packages on the search path
    List(ListCommand),

    /// Compile a configured package
    Build(ToolCommand),

    /// Compile and run a configured package
    Run(ToolCommand),

    /// Test a configured package
    Test(ToolCommand),

    /// Compile and install a configured package
    Install(ToolCommand),

    /// Run any build tool subcommand with the configured parameters
    Go(ToolCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
