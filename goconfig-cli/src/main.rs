//! Main entry point for the goconfig CLI.
//!
//! Commands operate on the configurable build parameters of Go packages:
//! - `show`: Print current parameter values
//! - `set`: Change parameters and store the package snapshot
//! - `reinit`: Restore declared defaults
//! - `describe`: Print an entry's full declaration
//! - `list`: List configurable packages on the search path
//! - `build`, `run`, `test`, `install`, `go`: Run the build tool with the
//!   configured tags and defines

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::{Cli, Command};
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _level = goconfig::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Show(cmd) => cmd.execute(&global),
        Command::Set(cmd) => cmd.execute(&global),
        Command::Reinit(cmd) => cmd.execute(&global),
        Command::Describe(cmd) => cmd.execute(&global),
        Command::List(cmd) => cmd.execute(&global),
        Command::Build(cmd) => cmd.execute(Some("build"), &global),
        Command::Run(cmd) => cmd.execute(Some("run"), &global),
        Command::Test(cmd) => cmd.execute(Some("test"), &global),
        Command::Install(cmd) => cmd.execute(Some("install"), &global),
        Command::Go(cmd) => cmd.execute(None, &global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            if let Some(output) = e.tool_output() {
                eprint!("{output}");
            }
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
