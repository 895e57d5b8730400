//! Shell integration for executable declaration scalars.
//!
//! A declaration value tagged `!!status`, `!!not-status` or `!!output`
//! holds a command line rather than a literal. The command is split with
//! shell quoting rules, run to completion, and its outcome becomes the
//! entry's value. Failures never propagate: they map to `false` or `""`.

use std::io;
use std::process::Command;

use crate::value::TriState;

/// How an executable scalar turns a command outcome into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecTag {
    /// True when the command succeeds.
    Status,
    /// True when the command fails.
    NotStatus,
    /// The command's trimmed combined output, or `""` on failure.
    Output,
}

impl ExecTag {
    /// Recognizes a local tag name without its `!` prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use goconfig::shell::ExecTag;
    ///
    /// assert_eq!(ExecTag::from_tag("not-status"), Some(ExecTag::NotStatus));
    /// assert_eq!(ExecTag::from_tag("binary"), None);
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "status" => Some(Self::Status),
            "not-status" => Some(Self::NotStatus),
            "output" => Some(Self::Output),
            _ => None,
        }
    }

    /// Runs `command` and maps its outcome to a value.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use goconfig::shell::ExecTag;
    /// use goconfig::TriState;
    ///
    /// assert_eq!(ExecTag::Status.evaluate("true"), TriState::True);
    /// ```
    #[must_use]
    pub fn evaluate(self, command: &str) -> TriState {
        let outcome = run_command_line(command);
        match &outcome {
            Ok(captured) => log::debug!(
                "{command:?}: {}",
                if captured.success { "succeeded" } else { "failed" }
            ),
            Err(e) => log::debug!("{command:?}: {e}"),
        }

        match (self, outcome) {
            (Self::Status, Ok(c)) => TriState::from(c.success),
            (Self::NotStatus, Ok(c)) => TriState::from(!c.success),
            (Self::Output, Ok(c)) if c.success => TriState::from(c.output.trim()),
            (Self::Status, Err(_)) => TriState::False,
            (Self::NotStatus, Err(_)) => TriState::True,
            (Self::Output, _) => TriState::from(""),
        }
    }
}

/// Outcome of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    /// True if the process exited successfully.
    pub success: bool,
    /// Description of the exit status.
    pub status: String,
    /// Standard output followed by standard error.
    pub output: String,
}

/// Splits a command line with shell quoting and runs it.
///
/// # Errors
///
/// Returns an error if the line cannot be tokenized, is empty, or the
/// program cannot be started.
pub fn run_command_line(line: &str) -> io::Result<Captured> {
    let words = shell_words::split(line)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let Some((program, args)) = words.split_first() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "empty command line",
        ));
    };
    run_captured(program, args)
}

/// Runs `program` with `args`, capturing both output streams.
///
/// # Errors
///
/// Returns an error if the program cannot be started.
pub fn run_captured(program: &str, args: &[String]) -> io::Result<Captured> {
    let out = Command::new(program).args(args).output()?;
    let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
    output.push_str(&String::from_utf8_lossy(&out.stderr));
    Ok(Captured {
        success: out.status.success(),
        status: out.status.to_string(),
        output,
    })
}
