//! Reinit command implementation.

use crate::error::CliError;
use crate::utils::{load_settings, open_package, GlobalOptions};
use clap::Args;
use goconfig::Error as LibError;

/// Restore declared defaults and store the package snapshot.
#[derive(Args)]
pub struct ReinitCommand {
    /// Package import path
    #[arg(value_name = "PACKAGE")]
    pub package: String,

    /// Only reinitialize this entry
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

impl ReinitCommand {
    /// Execute the reinit command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let settings = load_settings()?;
        let mut config = open_package(global, &settings, &self.package)?;

        match &self.name {
            Some(name) => {
                if !config.registry_mut().reinitialize_one(name) {
                    return Err(LibError::UnknownEntry { name: name.clone() }.into());
                }
            }
            None => config.registry_mut().reinitialize_all(),
        }

        config.store()?;
        if !global.quiet {
            eprintln!("Stored {}", config.snapshot_path().display());
        }
        Ok(())
    }
}
