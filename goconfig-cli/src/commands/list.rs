//! List command implementation.
//!
//! Lists every package on the search path that carries a declaration file.

use crate::error::CliError;
use crate::utils::{load_settings, GlobalOptions};
use clap::Args;
use goconfig::{Loader, ALL};
use std::io::Write;

/// List configurable packages on the search path.
#[derive(Args)]
pub struct ListCommand {
    /// Also print each package's declaration file
    #[arg(long)]
    pub paths: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let settings = load_settings()?;
        let listing = Loader::new(&settings).load(ALL)?;

        let mut stdout = std::io::stdout().lock();
        for entry in listing.registry().walk() {
            if self.paths {
                writeln!(stdout, "{}\t{}", entry.name(), entry.value().plain_text())?;
            } else {
                writeln!(stdout, "{}", entry.name())?;
            }
        }
        Ok(())
    }
}
