//! Build script for goconfig-cli.
//!
//! Generates the `goconfig.1` man page into OUT_DIR with clap_mangen.
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared here as well.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep synchronized with src/cli.rs.
fn build_cli() -> Command {
    let package = || {
        Arg::new("package")
            .value_name("PACKAGE")
            .help("Package import path")
    };
    let passthrough = |name: &'static str, about: &'static str| {
        Command::new(name).about(about).arg(
            Arg::new("args")
                .value_name("ARGS")
                .help("Build flags, then the package and its arguments")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true),
        )
    };

    Command::new("goconfig")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Configure build tags and linker defines of Go packages")
        .long_about(
            "Declare, configure and apply build parameters of Go packages. \
             Parameters are declared in goconfig.yaml files and the chosen values \
             are stored per target in goconfiguration_{os}_{arch}.yaml.",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Overlay this snapshot file instead of the package's stored one")
                .value_name("FILE")
                .global(true)
                .env("GOCONFIG_SNAPSHOT"),
        )
        .subcommands(vec![
            Command::new("show")
                .about("Print parameter values of a package")
                .arg(
                    Arg::new("all")
                        .long("all")
                        .help("Include entries still at their declared default")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["yaml", "json"])
                        .default_value("yaml"),
                )
                .arg(package()),
            Command::new("set")
                .about("Set parameters and store the package snapshot")
                .arg(package().required(true))
                .arg(
                    Arg::new("assignments")
                        .value_name("NAME=VALUE")
                        .num_args(1..)
                        .required(true),
                ),
            Command::new("reinit")
                .about("Restore declared defaults and store the package snapshot")
                .arg(package().required(true))
                .arg(Arg::new("name").value_name("NAME")),
            Command::new("describe")
                .about("Print the full declaration of one parameter")
                .arg(package().required(true))
                .arg(Arg::new("name").value_name("NAME").required(true)),
            Command::new("list").about("List configurable packages on the search path"),
            passthrough("build", "Compile a configured package"),
            passthrough("run", "Compile and run a configured package"),
            passthrough("test", "Test a configured package"),
            passthrough("install", "Compile and install a configured package"),
            passthrough("go", "Run any build tool subcommand with the configured parameters"),
            Command::new("completions").about("Generate shell completion scripts"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("goconfig.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
