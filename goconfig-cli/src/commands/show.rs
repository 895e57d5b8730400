//! Show command implementation.
//!
//! Prints `name: value` for each modified entry of a package, or for every
//! entry with `--all`, in traversal order.

use crate::error::CliError;
use crate::utils::{load_settings, open_package, GlobalOptions};
use clap::{Args, ValueEnum};
use goconfig::{Entry, TriState};
use serde::Serialize;
use std::io::Write;

/// Print parameter values of a package.
#[derive(Args)]
pub struct ShowCommand {
    /// Include entries still at their declared default
    #[arg(long)]
    pub all: bool,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "yaml",
        env = "GOCONFIG_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Package import path (defaults to the current package)
    #[arg(value_name = "PACKAGE", default_value = "")]
    pub package: String,
}

/// Output format for the show command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `name: value` lines that read back as a snapshot
    Yaml,
    /// JSON array of entries
    Json,
}

#[derive(Serialize)]
struct ShownEntry<'a> {
    name: &'a str,
    value: &'a TriState,
    init: &'a TriState,
    #[serde(skip_serializing_if = "str::is_empty")]
    help: &'a str,
}

impl<'a> From<&'a Entry> for ShownEntry<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            name: entry.name(),
            value: entry.value(),
            init: entry.init(),
            help: entry.help(),
        }
    }
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let settings = load_settings()?;
        let config = open_package(global, &settings, &self.package)?;

        let entries: Vec<&Entry> = config
            .registry()
            .walk()
            .filter(|entry| self.all || entry.is_modified())
            .collect();

        let mut stdout = std::io::stdout().lock();
        match self.format {
            OutputFormat::Yaml => {
                for entry in entries {
                    writeln!(stdout, "{}: {}", entry.name(), entry.value())?;
                }
            }
            OutputFormat::Json => {
                let shown: Vec<ShownEntry<'_>> = entries.into_iter().map(ShownEntry::from).collect();
                let json = serde_json::to_string_pretty(&shown)
                    .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
                writeln!(stdout, "{json}")?;
            }
        }
        Ok(())
    }
}
