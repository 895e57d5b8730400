//! Merging of imported package declarations.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::loader::document::IMPORT;
use crate::loader::Loader;
use crate::path::clean_join;
use crate::registry::Registry;

/// Loads `target` and moves its entries into `registry`.
///
/// Existing names always win; a colliding import is dropped with a
/// warning. An import of a package already being loaded is skipped.
pub(super) fn import(
    loader: &Loader<'_>,
    registry: &mut Registry,
    importer: &str,
    dir: &Path,
    target: &str,
    stack: &mut Vec<PathBuf>,
) -> Result<()> {
    let (prefix, package) = resolve(dir, target);
    let Some(imported) = loader.load_nested(&package, stack)? else {
        log::warn!("{importer}: ignoring cyclic import of {target}");
        return Ok(());
    };

    log::debug!("{importer}: importing {package}");
    for entry in imported.into_registry().into_entries() {
        if entry.name() == IMPORT {
            continue;
        }
        let name = imported_name(entry.name(), entry.is_tag(), prefix, &package);
        if registry.contains(&name) {
            log::warn!("{importer}: ignoring duplicate {name} from {package}");
        } else {
            registry.declare(&name, entry);
        }
    }
    Ok(())
}

/// Splits an import target into its name prefix and package identifier.
///
/// A relative target (leading `.`) resolves against the importer's
/// directory and contributes everything up to its last `/` as a prefix.
fn resolve<'t>(dir: &Path, target: &'t str) -> (&'t str, String) {
    if !target.starts_with('.') {
        return ("", target.to_string());
    }
    let prefix = match target.rfind('/') {
        Some(slash) if slash > 0 => &target[..=slash],
        _ => "",
    };
    let package = clean_join(dir, target).to_string_lossy().into_owned();
    (prefix, package)
}

/// Name an imported entry takes in the importing registry.
fn imported_name(name: &str, is_tag: bool, prefix: &str, package: &str) -> String {
    if !is_tag && !prefix.is_empty() {
        return format!("{prefix}{name}");
    }
    match name.find('.') {
        Some(dot) if dot > 0 => format!("{package}{}", &name[dot..]),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absolute_target() {
        let (prefix, package) = resolve(Path::new("/src/rel"), "example.com/first");
        assert_eq!(prefix, "");
        assert_eq!(package, "example.com/first");
    }

    #[test]
    fn test_resolve_relative_target() {
        let (prefix, package) = resolve(Path::new("/src/importer/rel"), "../first");
        assert_eq!(prefix, "../");
        assert_eq!(
            PathBuf::from(package),
            PathBuf::from("/src/importer/first")
        );
    }

    #[test]
    fn test_resolve_relative_without_slash() {
        let (prefix, _) = resolve(Path::new("/src/p"), "./");
        assert_eq!(prefix, "./");
        let (prefix, _) = resolve(Path::new("/src/p"), "..");
        assert_eq!(prefix, "");
    }

    #[test]
    fn test_imported_names() {
        assert_eq!(imported_name("first.S", false, "../", "/x/first"), "../first.S");
        assert_eq!(imported_name("First", true, "../", "/x/first"), "First");
        assert_eq!(
            imported_name("first.S", false, "", "example.com/first"),
            "example.com/first.S"
        );
        assert_eq!(imported_name("plain", false, "", "example.com/first"), "plain");
        assert_eq!(imported_name(".hidden", false, "", "example.com/first"), ".hidden");
        assert_eq!(imported_name("a.b", true, "", "p"), "p.b");
    }
}
