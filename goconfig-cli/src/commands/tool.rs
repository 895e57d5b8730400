//! Build tool pass-through.
//!
//! `build`, `run`, `test` and `install` name their subcommand; `go` takes it
//! as the first argument. Explicit build flags are parsed from anywhere in
//! the arguments. The first remaining argument is the package, defaulting
//! to the current one, and the rest follow the synthesized flags.

use crate::error::CliError;
use crate::utils::{load_settings, open_package, GlobalOptions};
use clap::Args;
use goconfig::{GoCommand, Synthesizer};

/// Arguments passed through to the build tool.
#[derive(Args)]
pub struct ToolCommand {
    /// Build flags, then the package and its arguments
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Execute the command, with `subcommand` prepended when given.
    pub fn execute(self, subcommand: Option<&str>, global: &GlobalOptions) -> Result<(), CliError> {
        let mut words = self.args;
        if let Some(sub) = subcommand {
            words.insert(0, sub.to_string());
        }
        if words.is_empty() {
            return Err(CliError::InvalidArguments(
                "missing build tool subcommand".to_string(),
            ));
        }

        let (cmd, mut rest) = GoCommand::parse(words);
        let package = if rest.is_empty() {
            String::new()
        } else {
            rest.remove(0)
        };

        let settings = load_settings()?;
        let config = open_package(global, &settings, &package)?;
        log::debug!("{} {} for {}", settings.tool, cmd.name, config.package());

        let output = Synthesizer::new(&settings, &config).execute(&cmd, rest)?;
        print!("{output}");
        Ok(())
    }
}
