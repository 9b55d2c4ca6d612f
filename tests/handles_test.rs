//! Opening classified paths as kind-specific handles

use filekind_core::handles::{ConfigFile, Folder, JsonFile, PythonFile, TextAccess, TextFile};
use filekind_core::{Capability, ClassificationRegistry, HandleFactory, Kind, is_hidden, open};
use filekind_suite::{Entry, build_tree, mixed_project};
use std::fs;

#[test]
fn test_config_file_round_trip() {
    let project = mixed_project().unwrap();
    let registry = ClassificationRegistry::with_builtin();
    let factory = HandleFactory::with_builtin();

    let handle = open(&registry, &factory, project.path().join("setup.cfg"));
    assert!(handle.capabilities().contains(&Capability::KeyValue));
    let config = handle.downcast_ref::<ConfigFile>().unwrap();

    let mut data = config.read().unwrap();
    assert_eq!(data["name"], "demo");
    data.insert("version".to_string(), "2.0".to_string());
    config.write(&data).unwrap();
    assert_eq!(config.read_lines().unwrap(), vec!["name = demo", "version = 2.0"]);
}

#[test]
fn test_text_and_json_handles() {
    let project = mixed_project().unwrap();
    let registry = ClassificationRegistry::with_builtin();
    let factory = HandleFactory::with_builtin();

    let notes = open(&registry, &factory, project.path().join("notes.txt"));
    let text = notes.downcast_ref::<TextFile>().unwrap();
    text.write_lines(["one", "two", "three"]).unwrap();
    assert_eq!(text.read_lines().unwrap().len(), 3);

    let data = open(&registry, &factory, project.path().join("data.json"));
    let json = data.downcast_ref::<JsonFile>().unwrap();
    assert_eq!(json.load().unwrap()["a"], 1);
}

#[test]
fn test_python_package_member() {
    let project = mixed_project().unwrap();
    let registry = ClassificationRegistry::with_builtin();
    let factory = HandleFactory::with_builtin();

    let views = open(&registry, &factory, project.path().join("site_pkg/views.py"));
    let python = views.downcast_ref::<PythonFile>().unwrap();
    assert!(python.is_in_package());
    assert!(!python.is_in_program());
    assert!(python.find_imports().unwrap().contains("flask"));

    let cmd = views.run_command(&[]).unwrap();
    assert_eq!(cmd.args, vec!["-m", "site_pkg.views"]);
    assert_eq!(cmd.working_dir.as_deref(), Some(project.path()));
}

#[test]
fn test_folder_listing_classifies_children() {
    let project = mixed_project().unwrap();
    let registry = ClassificationRegistry::with_builtin();
    let factory = HandleFactory::with_builtin();

    let handle = open(&registry, &factory, project.path().join("native"));
    assert_eq!(handle.kind(), &Kind::C_PROJECT);
    let folder = handle.downcast_ref::<Folder>().unwrap();
    let kinds: Vec<(String, Kind)> = folder
        .list(&registry)
        .unwrap()
        .into_iter()
        .map(|entry| (entry.name, entry.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("Makefile".to_string(), Kind::TEXT_FILE),
            ("UPPER.C".to_string(), Kind::C_SOURCE_FILE),
            ("main.c".to_string(), Kind::C_SOURCE_FILE),
            ("util.h".to_string(), Kind::C_SOURCE_FILE),
        ]
    );
}

#[test]
fn test_hidden_entries() {
    let project = build_tree(&[
        Entry::File(".env", b"KEY=value\n"),
        Entry::File("visible.txt", b"x\n"),
    ])
    .unwrap();

    let hidden: Vec<String> = fs::read_dir(project.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| is_hidden(path.strip_prefix(project.path()).unwrap()))
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(hidden, vec![".env"]);
}
