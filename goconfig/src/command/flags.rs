//! Build tool flag tables.
//!
//! Every table is sorted so synthesized arguments come out in a stable
//! order.

/// Boolean flags accepted by every build subcommand.
pub const BUILD_FLAGS: [&str; 5] = ["a", "n", "race", "v", "x"];

/// Boolean build flags that an entry of the same name may turn on.
pub const CONFIGURABLE_BUILD_FLAGS: [&str; 1] = ["race"];

/// Flags taking a value, accepted by every build subcommand.
pub const BUILD_STRING_FLAGS: [&str; 8] = [
    "ccflags",
    "compiler",
    "gccgoflags",
    "gcflags",
    "installsuffix",
    "ldflags",
    "o",
    "p",
];

/// Valued build flags that an entry of the same name may supply.
pub const CONFIGURABLE_BUILD_STRING_FLAGS: [&str; 6] = [
    "ccflags",
    "compiler",
    "gccgoflags",
    "gcflags",
    "installsuffix",
    "ldflags",
];

/// Boolean flags accepted only by `test`.
pub const TEST_FLAGS: [&str; 2] = ["c", "i"];

/// Subcommand that takes [`TEST_FLAGS`].
pub const TEST: &str = "test";

/// Subcommand whose subject is a source file rather than a package.
pub const RUN: &str = "run";

/// Returns true if `name` is any build tool flag.
///
/// Entries with such names configure flags; they never become build tags
/// or linker defines.
///
/// # Examples
///
/// ```
/// use goconfig::command::flags::is_tool_flag;
///
/// assert!(is_tool_flag("race"));
/// assert!(is_tool_flag("ldflags"));
/// assert!(!is_tool_flag("main.version"));
/// ```
#[must_use]
pub fn is_tool_flag(name: &str) -> bool {
    BUILD_FLAGS.contains(&name) || BUILD_STRING_FLAGS.contains(&name) || TEST_FLAGS.contains(&name)
}
