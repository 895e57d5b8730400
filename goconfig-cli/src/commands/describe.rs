//! Describe command implementation.

use crate::error::CliError;
use crate::utils::{load_settings, open_package, GlobalOptions};
use clap::Args;
use goconfig::{snapshot, Error as LibError};

/// Print the full declaration of one parameter.
///
/// The output is a verbose declaration record that can be pasted into a
/// `goconfig.yaml` file.
#[derive(Args)]
pub struct DescribeCommand {
    /// Package import path
    #[arg(value_name = "PACKAGE")]
    pub package: String,

    /// Entry name
    #[arg(value_name = "NAME")]
    pub name: String,
}

impl DescribeCommand {
    /// Execute the describe command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let settings = load_settings()?;
        let config = open_package(global, &settings, &self.package)?;

        let text = snapshot::serialize_entry(config.registry(), &self.name)
            .ok_or(LibError::UnknownEntry { name: self.name })?;
        print!("{text}");
        Ok(())
    }
}
