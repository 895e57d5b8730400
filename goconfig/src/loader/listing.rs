//! The listing of every configurable package under the search path.

use walkdir::WalkDir;

use crate::config::Settings;
use crate::entry::Entry;
use crate::package::PackageConfig;
use crate::registry::Registry;
use crate::value::TriState;

/// Builds a registry with one string entry per package directory holding
/// a declaration file, named relative to its `src` root and valued with the
/// file's path.
pub(super) fn list_all(settings: &Settings) -> PackageConfig {
    let candidates = settings.candidates();
    let mut registry = Registry::new();

    for root in &settings.search_path {
        let src = root.join("src");
        if !src.is_dir() {
            continue;
        }
        let files = WalkDir::new(&src)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file());
        for file in files {
            let is_declaration = file
                .file_name()
                .to_str()
                .is_some_and(|name| candidates.iter().any(|c| c == name));
            if !is_declaration {
                continue;
            }
            let Some(dir) = file.path().parent() else {
                continue;
            };
            let Ok(rel) = dir.strip_prefix(&src) else {
                continue;
            };
            let name = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if name.is_empty() || registry.contains(&name) {
                continue;
            }
            let path = file.path().display().to_string();
            registry.declare(&name, Entry::new(TriState::from(path)));
        }
    }

    registry.materialize();
    log::debug!("listed {} packages", registry.len());
    PackageConfig::listing(registry)
}
