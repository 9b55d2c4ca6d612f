use std::path::{Component, Path, PathBuf};

/// True when any component of the path is a dot-file or dot-folder.
///
/// `.` and `..` are not hidden.
pub fn is_hidden(path: &Path) -> bool {
    path.components().any(|component| match component {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

pub fn is_visible(path: &Path) -> bool {
    !is_hidden(path)
}

/// Search `start` and its ancestors for the first of `names` that exists.
pub fn find_upward(start: &Path, names: &[&str]) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        for name in names {
            let candidate = dir.join(name);
            if candidate.is_file() {
                tracing::debug!("Found {:?}", candidate);
                return Some(candidate);
            }
        }
        current = dir.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_hidden_components() {
        assert!(is_hidden(Path::new(".git")));
        assert!(is_hidden(Path::new("project/.venv/lib")));
        assert!(is_hidden(Path::new("/home/user/.bashrc")));
        assert!(!is_hidden(Path::new("src/main.c")));
        assert!(!is_hidden(Path::new("./src/../main.c")));
        assert!(is_visible(Path::new("notes.txt")));
    }

    #[test]
    fn test_find_upward_prefers_order_then_nearest() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join("first.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("a").join("second.json"), "{}").unwrap();

        let found = find_upward(&nested, &["first.json", "second.json"]).unwrap();
        assert_eq!(found, temp_dir.path().join("a").join("second.json"));

        assert!(find_upward(&nested, &["absent.json"]).is_none());
    }
}
