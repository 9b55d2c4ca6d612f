//! Fixtures shared by the cross-crate integration tests in `tests/`.

use std::fs;
use std::io;
use tempfile::TempDir;

/// A file or directory to create under a fixture root.
pub enum Entry<'a> {
    File(&'a str, &'a [u8]),
    Dir(&'a str),
}

/// Create `entries` (paths relative to a fresh temporary directory).
pub fn build_tree(entries: &[Entry<'_>]) -> io::Result<TempDir> {
    let temp_dir = TempDir::new()?;
    for entry in entries {
        match entry {
            Entry::Dir(rel) => fs::create_dir_all(temp_dir.path().join(rel))?,
            Entry::File(rel, contents) => {
                let path = temp_dir.path().join(rel);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, contents)?;
            }
        }
    }
    Ok(temp_dir)
}

/// A small mixed project: a Python package that also serves a website, a C
/// project, loose text and config files, and binary assets.
pub fn mixed_project() -> io::Result<TempDir> {
    build_tree(&[
        Entry::File("site_pkg/__init__.py", b""),
        Entry::File("site_pkg/index.html", b"<html></html>\n"),
        Entry::File("site_pkg/views.py", b"from flask import Flask\n"),
        Entry::File("native/Makefile", b"all:\n\tcc main.c\n"),
        Entry::File("native/main.c", b"int main(void) { return 0; }\n"),
        Entry::File("native/util.h", b"int util(void);\n"),
        Entry::File("native/UPPER.C", b"int upper;\n"),
        Entry::File("www/index.html", b"<!doctype html>\n<html></html>\n"),
        Entry::File("notes.txt", b"remember the milk\n"),
        Entry::File("setup.cfg", b"[metadata]\nname = demo\n"),
        Entry::File("data.json", b"{\"a\": 1}"),
        Entry::File("logo.bin", b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
        Entry::Dir("empty"),
    ])
}
