//! Set command implementation.

use crate::error::CliError;
use crate::utils::{load_settings, open_package, parse_assignment, GlobalOptions};
use clap::Args;
use goconfig::Error as LibError;

/// Set parameters and store the package snapshot.
///
/// Assignments run in order, each with its set or reset cascade, so a later
/// assignment can undo what an earlier cascade changed.
#[derive(Args)]
pub struct SetCommand {
    /// Package import path
    #[arg(value_name = "PACKAGE")]
    pub package: String,

    /// Assignments as NAME=VALUE
    #[arg(value_name = "NAME=VALUE", required = true)]
    pub assignments: Vec<String>,
}

impl SetCommand {
    /// Execute the set command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let assignments = self
            .assignments
            .iter()
            .map(|arg| parse_assignment(arg))
            .collect::<Result<Vec<_>, _>>()?;

        let settings = load_settings()?;
        let mut config = open_package(global, &settings, &self.package)?;

        for (name, value) in assignments {
            if !config.registry().contains(name) {
                return Err(LibError::UnknownEntry {
                    name: name.to_string(),
                }
                .into());
            }
            let cascaded = config.registry_mut().set(name, value);
            if global.verbose {
                if let Some(entry) = config.registry().get(name) {
                    let note = if cascaded { " (cascade applied)" } else { "" };
                    eprintln!("{name}: {}{note}", entry.value());
                }
            }
        }

        config.store()?;
        if !global.quiet {
            eprintln!("Stored {}", config.snapshot_path().display());
        }
        Ok(())
    }
}
