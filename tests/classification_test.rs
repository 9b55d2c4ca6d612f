//! Classification scenarios across the registry, sniffers and built-in rules

use filekind_core::registry::ContainsEntry;
use filekind_core::sniff::NoSniffer;
use filekind_core::{ClassificationRegistry, Kind, RuleSource, SharedRegistry};
use filekind_suite::mixed_project;
use std::fs;

#[test]
fn test_python_package_wins_over_website() {
    let project = mixed_project().unwrap();
    let registry = ClassificationRegistry::with_builtin();

    assert_eq!(registry.classify(project.path().join("site_pkg")), Kind::PYTHON_PACKAGE);
    assert_eq!(registry.classify(project.path().join("www")), Kind::WEBSITE_FOLDER);
    assert_eq!(registry.classify(project.path().join("native")), Kind::C_PROJECT);
    assert_eq!(registry.classify(project.path().join("empty")), Kind::FOLDER);
}

#[test]
fn test_c_sources_any_case() {
    let project = mixed_project().unwrap();
    let registry = ClassificationRegistry::with_builtin();

    for name in ["main.c", "util.h", "UPPER.C"] {
        let path = project.path().join("native").join(name);
        assert_eq!(registry.classify(&path), Kind::C_SOURCE_FILE, "{name}");
    }
}

#[test]
fn test_text_file_through_mime_tier() {
    let project = mixed_project().unwrap();
    let registry = ClassificationRegistry::with_builtin();

    let classification = registry.explain(project.path().join("notes.txt"));
    assert_eq!(classification.kind, Kind::TEXT_FILE);
    assert!(matches!(classification.source, RuleSource::Mime { ref prefix, .. } if prefix == "text/"));
    assert_eq!(classification.mime.as_deref(), Some("text/plain"));
}

#[test]
fn test_content_beats_misleading_suffix() {
    let project = mixed_project().unwrap();
    let registry = ClassificationRegistry::with_builtin();
    assert_eq!(registry.classify(project.path().join("logo.bin")), Kind::IMAGE_FILE);
}

#[test]
fn test_extensions_without_sniffing() {
    let project = mixed_project().unwrap();
    let mut registry = ClassificationRegistry::with_builtin();
    registry.set_sniffer(Box::new(NoSniffer));

    assert_eq!(registry.classify(project.path().join("setup.cfg")), Kind::CONFIG_FILE);
    assert_eq!(registry.classify(project.path().join("data.json")), Kind::JSON_FILE);
    assert_eq!(registry.classify(project.path().join("notes.txt")), Kind::FILE);
}

#[test]
fn test_missing_and_vanished_paths() {
    let project = mixed_project().unwrap();
    let registry = ClassificationRegistry::with_builtin();

    let notes = project.path().join("notes.txt");
    assert_eq!(registry.classify(&notes), Kind::TEXT_FILE);
    fs::remove_file(&notes).unwrap();
    assert_eq!(registry.classify(&notes), Kind::MISSING);

    let through_file = project.path().join("setup.cfg").join("child");
    assert_eq!(registry.classify(through_file), Kind::MISSING);
}

#[test]
fn test_classification_is_stable_across_calls() {
    let project = mixed_project().unwrap();
    let registry = ClassificationRegistry::with_builtin();
    for entry in fs::read_dir(project.path()).unwrap() {
        let path = entry.unwrap().path();
        assert_eq!(registry.explain(&path), registry.explain(&path), "{path:?}");
    }
}

#[test]
fn test_plugin_registration_on_shared_registry() {
    let project = mixed_project().unwrap();
    let shared = SharedRegistry::with_builtin();
    let native = project.path().join("native");
    assert_eq!(shared.classify(&native), Kind::C_PROJECT);

    // A plugin registering late only affects later folder rules
    shared.register(|registry| {
        registry.register_folder(ContainsEntry::new("Makefile"), Kind::new("make_project"));
    });
    assert_eq!(shared.classify(&native), Kind::C_PROJECT);

    shared.register(|registry| {
        registry.insert_folder_boxed(0, Box::new(ContainsEntry::new("Makefile")), Kind::new("make_project"));
    });
    assert_eq!(shared.classify(&native), Kind::new("make_project"));
}

#[test]
fn test_classification_json_shape() {
    let project = mixed_project().unwrap();
    let registry = ClassificationRegistry::with_builtin();

    let by_mime = serde_json::to_value(registry.explain(project.path().join("notes.txt"))).unwrap();
    assert_eq!(by_mime["kind"], "text_file");
    assert_eq!(
        by_mime["source"],
        serde_json::json!({"tier": "mime", "prefix": "text/", "mime": "text/plain"})
    );
    assert_eq!(by_mime["mime"], "text/plain");

    let by_folder = serde_json::to_value(registry.explain(project.path().join("site_pkg"))).unwrap();
    assert_eq!(by_folder["kind"], "python_package");
    assert_eq!(by_folder["source"]["tier"], "folder");
    assert_eq!(by_folder["source"]["index"], 0);
    assert!(by_folder.get("mime").is_none());

    let missing = serde_json::to_value(registry.explain(project.path().join("ghost"))).unwrap();
    assert_eq!(missing["kind"], "missing_path");
    assert_eq!(missing["source"], serde_json::json!({"tier": "missing"}));
}
