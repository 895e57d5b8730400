//! Argument synthesis and execution.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::package::PackageConfig;
use crate::path::{clean_join, relative_to};
use crate::shell::{self, Captured};

use super::flags::{
    is_tool_flag, BUILD_FLAGS, BUILD_STRING_FLAGS, CONFIGURABLE_BUILD_FLAGS,
    CONFIGURABLE_BUILD_STRING_FLAGS, RUN, TEST, TEST_FLAGS,
};
use super::parse::GoCommand;

const LDFLAGS: &str = "ldflags";

/// Turns commands into build tool invocations for one package.
///
/// # Examples
///
/// ```no_run
/// use goconfig::config::SettingsBuilder;
/// use goconfig::{GoCommand, Loader, Synthesizer};
///
/// let settings = SettingsBuilder::new().build().unwrap();
/// let config = Loader::new(&settings).load("example.com/hello").unwrap();
/// let synth = Synthesizer::new(&settings, &config);
/// let argv = synth.synthesize(&GoCommand::new("build"), Vec::new()).unwrap();
/// assert_eq!(argv[0], "go");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer<'a> {
    settings: &'a Settings,
    config: &'a PackageConfig,
}

impl<'a> Synthesizer<'a> {
    /// Creates a synthesizer for a loaded package.
    #[must_use]
    pub fn new(settings: &'a Settings, config: &'a PackageConfig) -> Self {
        Self { settings, config }
    }

    /// Builds the full argument vector, starting with the tool program.
    ///
    /// `args` are the positional arguments left after parsing the command.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined for
    /// a `run` subject.
    pub fn synthesize(&self, cmd: &GoCommand, args: Vec<String>) -> Result<Vec<String>> {
        let mut argv = vec![self.settings.tool.clone(), cmd.name.clone()];
        self.push_build_flags(cmd, &mut argv);
        if cmd.name == TEST {
            argv.extend(
                TEST_FLAGS
                    .iter()
                    .filter(|name| cmd.has_flag(name))
                    .map(|name| format!("-{name}")),
            );
        }
        if let Some(tags) = self.tags() {
            argv.push("-tags".to_string());
            argv.push(tags);
        }
        if let Some(ldflags) = self.ldflags(cmd) {
            argv.push(format!("-{LDFLAGS}"));
            argv.push(ldflags);
        }
        self.push_string_flags(cmd, &mut argv);
        argv.push(self.subject(cmd)?);
        argv.extend(args);
        Ok(argv)
    }

    /// Synthesizes and runs a command, returning its combined output.
    ///
    /// A dry run prefixes the output with an echo of the arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BuildTool`] carrying the captured output if the tool
    /// cannot be started or exits unsuccessfully.
    pub fn execute(&self, cmd: &GoCommand, args: Vec<String>) -> Result<String> {
        let argv = self.synthesize(cmd, args)?;
        let echo = cmd.is_dry_run().then(|| dry_run_echo(&argv));
        finish(&argv, run(&argv), echo)
    }

    /// Runs a command line, routing build tool commands through synthesis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BuildTool`] if the line cannot be tokenized or the
    /// command fails.
    pub fn exec(&self, line: &str) -> Result<String> {
        let words = shell_words::split(line).map_err(|e| Error::BuildTool {
            program: line.to_string(),
            output: String::new(),
            message: e.to_string(),
        })?;
        match words.first() {
            Some(first) if *first == self.settings.tool && words.len() > 1 => {
                let (cmd, args) = GoCommand::parse(words[1..].to_vec());
                self.execute(&cmd, args)
            }
            Some(_) => finish(&words, run(&words), None),
            None => Err(Error::BuildTool {
                program: String::new(),
                output: String::new(),
                message: "empty command line".to_string(),
            }),
        }
    }

    fn push_build_flags(&self, cmd: &GoCommand, argv: &mut Vec<String>) {
        for name in BUILD_FLAGS {
            let configured = CONFIGURABLE_BUILD_FLAGS.contains(&name)
                && self
                    .config
                    .registry()
                    .get(name)
                    .is_some_and(|e| e.value().is_true());
            if cmd.has_flag(name) || configured {
                argv.push(format!("-{name}"));
            }
        }
    }

    fn push_string_flags(&self, cmd: &GoCommand, argv: &mut Vec<String>) {
        for name in BUILD_STRING_FLAGS {
            if name == LDFLAGS {
                continue;
            }
            if let Some(value) = self.string_flag(cmd, name) {
                argv.push(format!("-{name}"));
                argv.push(value);
            }
        }
    }

    /// Explicit value of a valued flag, else its configured entry's value.
    fn string_flag(&self, cmd: &GoCommand, name: &str) -> Option<String> {
        if let Some(value) = cmd.string_flag(name) {
            return Some(value.to_string());
        }
        if !CONFIGURABLE_BUILD_STRING_FLAGS.contains(&name) {
            return None;
        }
        let entry = self.config.registry().get(name)?;
        let value = entry.value();
        (value.is_string() && value.is_set()).then(|| value.plain_text().to_string())
    }

    fn tags(&self) -> Option<String> {
        let tags: Vec<&str> = self
            .config
            .registry()
            .walk()
            .filter(|e| e.value().is_true() && !is_tool_flag(e.name()))
            .map(|e| e.name())
            .collect();
        (!tags.is_empty()).then(|| tags.join(" "))
    }

    fn ldflags(&self, cmd: &GoCommand) -> Option<String> {
        let mut clauses: Vec<String> = self
            .config
            .registry()
            .walk()
            .filter(|e| !is_tool_flag(e.name()) && e.value().is_string() && e.value().is_set())
            .map(|e| format!("-X {} \"{}\"", self.define_name(e.name()), e.value().plain_text()))
            .collect();
        if let Some(extra) = self.string_flag(cmd, LDFLAGS) {
            clauses.push(extra);
        }
        (!clauses.is_empty()).then(|| clauses.join(" "))
    }

    fn define_name(&self, name: &str) -> String {
        if name.starts_with('.') {
            format!("_{}", clean_join(self.config.dir(), name).display())
        } else {
            name.to_string()
        }
    }

    fn subject(&self, cmd: &GoCommand) -> Result<String> {
        if cmd.name != RUN {
            return Ok(self.config.package().to_string());
        }
        let dir = self.config.dir();
        let main = dir.join("main.go");
        let file = if main.exists() {
            main
        } else {
            dir.join(format!("{}.go", base_name(self.config.package())))
        };
        let cwd = env::current_dir()?;
        Ok(relative_to(&file, &cwd).display().to_string())
    }
}

fn base_name(package: &str) -> String {
    Path::new(package)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| PathBuf::from(package).display().to_string())
}

fn run(argv: &[String]) -> std::io::Result<Captured> {
    match argv.split_first() {
        Some((program, args)) => shell::run_captured(program, args),
        None => Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "empty command",
        )),
    }
}

fn finish(argv: &[String], outcome: std::io::Result<Captured>, echo: Option<String>) -> Result<String> {
    let program = argv.first().cloned().unwrap_or_default();
    let mut output = echo.unwrap_or_default();
    match outcome {
        Ok(captured) => {
            output.push_str(&captured.output);
            if captured.success {
                Ok(output)
            } else {
                Err(Error::BuildTool {
                    program,
                    output,
                    message: captured.status,
                })
            }
        }
        Err(e) => Err(Error::BuildTool {
            program,
            output,
            message: e.to_string(),
        }),
    }
}

/// Human-readable echo of an argument vector for dry runs.
///
/// # Examples
///
/// ```
/// use goconfig::command::dry_run_echo;
///
/// let argv = ["go", "build", "-tags", "a b", "hello"].map(String::from);
/// assert_eq!(dry_run_echo(&argv), "#\n#  go build -tags 'a b' hello\n#\n");
/// ```
#[must_use]
pub fn dry_run_echo(argv: &[String]) -> String {
    let mut echo = String::from("#\n# ");
    for arg in argv {
        if arg.contains(' ') {
            echo.push_str(" '");
            echo.push_str(arg);
            echo.push('\'');
        } else {
            echo.push(' ');
            echo.push_str(arg);
        }
    }
    echo.push_str("\n#\n");
    echo
}
