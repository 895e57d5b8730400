//! Parsing of a requested build command.

use std::collections::{BTreeMap, BTreeSet};

use super::flags::{BUILD_FLAGS, BUILD_STRING_FLAGS, TEST, TEST_FLAGS};

/// A build subcommand with the flags given explicitly on its command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoCommand {
    /// Subcommand name, such as `build` or `test`.
    pub name: String,
    /// Boolean flags that were present.
    pub flags: BTreeSet<String>,
    /// Valued flags and their values.
    pub string_flags: BTreeMap<String, String>,
}

impl GoCommand {
    /// Creates a command with no explicit flags.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Splits `args` into a command and its remaining positional arguments.
    ///
    /// The first argument is the subcommand, after an optional leading
    /// `go`. Known flags are extracted wherever they appear, with one or
    /// two dashes; valued flags take `-k value` or `-k=value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use goconfig::GoCommand;
    ///
    /// let args = ["go", "test", "-v", "pkg", "-o=out", "-c", "-run", "X"];
    /// let (cmd, rest) = GoCommand::parse(args.iter().map(|s| s.to_string()).collect());
    /// assert_eq!(cmd.name, "test");
    /// assert!(cmd.has_flag("v") && cmd.has_flag("c"));
    /// assert_eq!(cmd.string_flag("o"), Some("out"));
    /// assert_eq!(rest, ["pkg", "-run", "X"]);
    /// ```
    #[must_use]
    pub fn parse(mut args: Vec<String>) -> (Self, Vec<String>) {
        let mut cmd = Self::new(pop_front(&mut args).unwrap_or_default());
        if cmd.name == "go" {
            cmd.name = pop_front(&mut args).unwrap_or_default();
        }

        for name in BUILD_FLAGS {
            if take_flag(&mut args, name) {
                cmd.flags.insert(name.to_string());
            }
        }
        if cmd.name == TEST {
            for name in TEST_FLAGS {
                if take_flag(&mut args, name) {
                    cmd.flags.insert(name.to_string());
                }
            }
        }
        for name in BUILD_STRING_FLAGS {
            if let Some(value) = take_valued(&mut args, name) {
                if !value.is_empty() {
                    cmd.string_flags.insert(name.to_string(), value);
                }
            }
        }
        (cmd, args)
    }

    /// Adds an explicit boolean flag.
    #[must_use]
    pub fn with_flag(mut self, name: &str) -> Self {
        self.flags.insert(name.to_string());
        self
    }

    /// Adds an explicit valued flag.
    #[must_use]
    pub fn with_string_flag(mut self, name: &str, value: impl Into<String>) -> Self {
        self.string_flags.insert(name.to_string(), value.into());
        self
    }

    /// Returns true if the boolean flag was given.
    #[must_use]
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    /// Value of a valued flag, if given and non-empty.
    #[must_use]
    pub fn string_flag(&self, name: &str) -> Option<&str> {
        self.string_flags
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Returns true for a dry run, which echoes the command it runs.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.has_flag("n")
    }
}

fn pop_front(args: &mut Vec<String>) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(args.remove(0))
    }
}

fn flag_name(arg: &str) -> Option<&str> {
    let name = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'))?;
    (!name.is_empty() && !name.starts_with('-')).then_some(name)
}

fn take_flag(args: &mut Vec<String>, name: &str) -> bool {
    let before = args.len();
    args.retain(|arg| flag_name(arg) != Some(name));
    args.len() != before
}

fn take_valued(args: &mut Vec<String>, name: &str) -> Option<String> {
    let mut found = None;
    let mut i = 0;
    while i < args.len() {
        let Some(flag) = flag_name(&args[i]) else {
            i += 1;
            continue;
        };
        if flag == name {
            args.remove(i);
            if i < args.len() {
                found = Some(args.remove(i));
            }
        } else if let Some(value) = flag.strip_prefix(name).and_then(|v| v.strip_prefix('=')) {
            found = Some(value.to_string());
            args.remove(i);
        } else {
            i += 1;
        }
    }
    found
}
