//! Integration tests for loading, overlaying and storing packages.
//!
//! Each test builds a temporary workspace with the example packages from
//! `common` and drives the public API the way a front end would.

mod common;

use std::fs;

use common::Workspace;
use goconfig::{snapshot, Error, Loader, TriState, ALL};

fn value(config: &goconfig::PackageConfig, name: &str) -> TriState {
    config
        .registry()
        .get(name)
        .unwrap_or_else(|| panic!("{name} missing"))
        .value()
        .clone()
}

fn show_all(config: &goconfig::PackageConfig) -> Vec<String> {
    config
        .registry()
        .entries()
        .map(|e| format!("{}: {}", e.name(), e.value()))
        .collect()
}

#[test]
fn test_simple_overlay_and_show_all() {
    let ws = Workspace::with_examples();
    let settings = ws.settings();
    let mut config = Loader::new(&settings).load("simple").unwrap();

    snapshot::overlay(config.registry_mut(), "t1: true\n").unwrap();
    assert_eq!(
        show_all(&config),
        [
            "t1: true",
            "t2: false",
            "main.s1: The quick brown fox",
            "main.s2: \"\"",
        ]
    );
}

#[test]
fn test_exclusive_overlay_order() {
    let ws = Workspace::with_examples();
    let settings = ws.settings();
    let mut config = Loader::new(&settings).load("exclusive").unwrap();
    assert_eq!(value(&config, "t1"), TriState::True);

    snapshot::overlay(config.registry_mut(), "t1: false\n").unwrap();
    snapshot::overlay(config.registry_mut(), "t3: true\n").unwrap();
    assert_eq!(value(&config, "t1"), TriState::False);
    assert_eq!(value(&config, "t2"), TriState::False);
    assert_eq!(value(&config, "t3"), TriState::True);
}

#[test]
fn test_exclusive_set_cascades() {
    let ws = Workspace::with_examples();
    let settings = ws.settings();
    let mut config = Loader::new(&settings).load("exclusive").unwrap();

    assert!(config.registry_mut().set("t2", "true"));
    assert_eq!(value(&config, "t1"), TriState::False);
    assert_eq!(value(&config, "t2"), TriState::True);
    assert_eq!(value(&config, "t3"), TriState::False);

    assert!(config.registry_mut().set("t2", "true"));
    assert_eq!(value(&config, "t1"), TriState::False);
}

#[test]
fn test_relative_imports() {
    let ws = Workspace::with_examples();
    let settings = ws.settings();
    let config = Loader::new(&settings).load("example.com/importer/rel").unwrap();

    let names: Vec<&str> = config.registry().entries().map(|e| e.name()).collect();
    assert_eq!(
        names,
        [
            "First",
            "Second",
            "Third",
            "import_third",
            "../first.S",
            "../second.S",
            "../third.S",
            "main.s",
        ]
    );
    assert_eq!(value(&config, "../first.S"), TriState::from("first string"));
}

#[test]
fn test_local_declaration_beats_import() {
    let ws = Workspace::with_examples();
    let settings = ws.settings();
    let config = Loader::new(&settings).load("example.com/importer/rel").unwrap();
    assert_eq!(value(&config, "Third"), TriState::False);
}

#[test]
fn test_search_path_imports_are_qualified() {
    let ws = Workspace::with_examples();
    let settings = ws.settings();
    let config = Loader::new(&settings).load("example.com/importer/path").unwrap();

    assert_eq!(
        value(&config, "example.com/importer/first.S"),
        TriState::from("first string")
    );
    assert_eq!(
        value(&config, "example.com/importer/second.S"),
        TriState::from("second string")
    );
    assert_eq!(value(&config, "First"), TriState::True);
    assert!(!config.registry().contains("first.S"));
}

#[test]
fn test_import_cycle_is_skipped() {
    let ws = Workspace::new();
    ws.write("cycle/a", "goconfig.yaml", "import: ../b\nmain.a: a\n");
    ws.write("cycle/b", "goconfig.yaml", "import: ../a\nb: true\n");
    let settings = ws.settings();
    let config = Loader::new(&settings).load("cycle/a").unwrap();

    assert_eq!(value(&config, "b"), TriState::True);
    assert_eq!(value(&config, "main.a"), TriState::from("a"));
    assert_eq!(config.registry().len(), 2);
}

#[test]
fn test_missing_import_fails_load() {
    let ws = Workspace::new();
    ws.write("lonely", "goconfig.yaml", "import: ../nowhere\n");
    let settings = ws.settings();
    let err = Loader::new(&settings).load("lonely").unwrap_err();
    assert!(matches!(err, Error::PackageNotFound { .. }));
}

#[test]
fn test_target_specific_files() {
    let ws = Workspace::new();
    ws.write("multi", "goconfig.yaml", "t: false\ngeneric: true\n");
    ws.write("multi", "goconfig_arm64.yaml", "t: true\n");
    ws.write("multi", "goconfig_linux.yaml", "linux_only: true\n");

    let amd64 = ws.settings();
    let config = Loader::new(&amd64).load("multi").unwrap();
    assert_eq!(value(&config, "t"), TriState::False);
    assert!(config.registry().contains("linux_only"));

    let arm64 = ws.settings_builder().with_goarch("arm64").build().unwrap();
    let config = Loader::new(&arm64).load("multi").unwrap();
    assert_eq!(value(&config, "t"), TriState::True);
    assert!(config
        .snapshot_path()
        .ends_with("goconfiguration_linux_arm64.yaml"));
}

#[test]
fn test_store_and_reload() {
    let ws = Workspace::with_examples();
    let settings = ws.settings();
    let loader = Loader::new(&settings);

    let mut config = loader.load("exclusive").unwrap();
    config.registry_mut().set("t3", "true");
    config.store().unwrap();

    let stored = fs::read_to_string(ws.package_dir("exclusive").join("goconfiguration_linux_amd64.yaml")).unwrap();
    assert_eq!(stored, "t1: false\nt3: true\n");

    let mut reloaded = loader.load("exclusive").unwrap();
    assert!(reloaded.overlay_stored().unwrap());
    assert_eq!(value(&reloaded, "t1"), TriState::False);
    assert_eq!(value(&reloaded, "t2"), TriState::False);
    assert_eq!(value(&reloaded, "t3"), TriState::True);
}

#[test]
fn test_reinitialize_after_overlay() {
    let ws = Workspace::with_examples();
    let settings = ws.settings();
    let mut config = Loader::new(&settings).load("simple").unwrap();
    snapshot::overlay(config.registry_mut(), "t1: true\nmain.s2: filled\n").unwrap();

    assert!(config.registry_mut().reinitialize_one("t1"));
    assert_eq!(value(&config, "t1"), TriState::False);
    assert_eq!(value(&config, "main.s2"), TriState::from("filled"));

    config.registry_mut().reinitialize_all();
    assert_eq!(value(&config, "main.s2"), TriState::from(""));
    assert_eq!(snapshot::serialize_snapshot(config.registry()), "main.s1: The quick brown fox\n");
}

#[test]
fn test_all_lists_packages() {
    let ws = Workspace::with_examples();
    let settings = ws.settings();
    let config = Loader::new(&settings).load(ALL).unwrap();

    assert!(config.is_listing());
    let names: Vec<&str> = config.registry().entries().map(|e| e.name()).collect();
    assert_eq!(
        names,
        [
            "buildflags",
            "example.com/importer/first",
            "example.com/importer/path",
            "example.com/importer/rel",
            "example.com/importer/second",
            "example.com/importer/third",
            "exclusive",
            "simple",
        ]
    );
    let simple = value(&config, "simple");
    assert!(simple.plain_text().ends_with("goconfig.yaml"));
}

#[test]
fn test_describe_entry() {
    let ws = Workspace::with_examples();
    let settings = ws.settings();
    let config = Loader::new(&settings).load("exclusive").unwrap();
    assert_eq!(
        snapshot::serialize_entry(config.registry(), "t1").unwrap(),
        "t1:\n    help: First of three exclusive tags.\n    init: true\n    set:\n        t2: false\n        t3: false\n"
    );
}

#[cfg(unix)]
#[test]
fn test_tagged_declarations() {
    let ws = Workspace::new();
    ws.write(
        "tagged",
        "goconfig.yaml",
        "\
passes: !!status true
inverse: !!not-status false
fails: !!status false
main.out: !!output echo hello
main.empty: !!null
main.quoted: \"keep !!status true\"
main.plain: run !!output ls later
",
    );
    let settings = ws.settings();
    let config = Loader::new(&settings).load("tagged").unwrap();
    assert_eq!(value(&config, "passes"), TriState::True);
    assert_eq!(value(&config, "inverse"), TriState::True);
    assert_eq!(value(&config, "fails"), TriState::False);
    assert_eq!(value(&config, "main.out"), TriState::from("hello"));
    assert_eq!(value(&config, "main.empty"), TriState::from(""));
    assert_eq!(
        value(&config, "main.quoted"),
        TriState::from("keep !!status true")
    );
    assert_eq!(
        value(&config, "main.plain"),
        TriState::from("run !!output ls later")
    );
}

#[test]
fn test_unknown_tag_fails_load() {
    let ws = Workspace::new();
    ws.write("odd", "goconfig.yaml", "t1: false\nzap: !!weird x\n");
    let settings = ws.settings();
    let err = Loader::new(&settings).load("odd").unwrap_err();
    match err {
        Error::Malformed { message, .. } => assert!(message.contains("zap"), "{message}"),
        other => panic!("unexpected error: {other}"),
    }
}
