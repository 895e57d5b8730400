//! Lexical path helpers.
//!
//! Package directories, relative imports and relative define names are all
//! joined and cleaned without touching the filesystem.

use std::path::{Component, Path, PathBuf};

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

/// Resolves `.` and `..` components lexically.
///
/// Leading `..` components of a relative path are kept; `..` directly under
/// the root stays at the root. An empty result is `.`.
///
/// # Examples
///
/// ```
/// use goconfig::path::clean;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(clean(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(clean(Path::new("../x/../../y")), PathBuf::from("../../y"));
/// assert_eq!(clean(Path::new("a/..")), PathBuf::from("."));
/// ```
#[must_use]
pub fn clean(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    let mut has_root = false;
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                result.push(prefix.as_os_str());
                has_root = true;
            }
            Component::RootDir => {
                result.push(component);
                has_root = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    result.pop();
                    depth -= 1;
                } else if !has_root {
                    result.push("..");
                }
            }
            Component::Normal(c) => {
                result.push(c);
                depth += 1;
            }
        }
    }

    if result.as_os_str().is_empty() {
        result.push(".");
    }
    result
}

/// Joins `name` onto `dir` and cleans the result.
#[must_use]
pub fn clean_join(dir: &Path, name: &str) -> PathBuf {
    clean(&dir.join(name))
}

/// Expresses `path` relative to `base` when it lies beneath it.
///
/// Paths outside `base` are returned unchanged.
///
/// # Examples
///
/// ```
/// use goconfig::path::relative_to;
/// use std::path::{Path, PathBuf};
///
/// let rel = relative_to(Path::new("/work/hello/main.go"), Path::new("/work"));
/// assert_eq!(rel, PathBuf::from("hello/main.go"));
///
/// let outside = relative_to(Path::new("/elsewhere/x.go"), Path::new("/work"));
/// assert_eq!(outside, PathBuf::from("/elsewhere/x.go"));
/// ```
#[must_use]
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    match path.strip_prefix(base) {
        Ok(rel) if rel.as_os_str().is_empty() => PathBuf::from("."),
        Ok(rel) => rel.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}
