use std::path::Path;

use super::MimeSniffer;

/// Suffix-based best guess. Never touches the file contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuessSniffer;

impl MimeSniffer for GuessSniffer {
    fn sniff(&self, path: &Path) -> Option<String> {
        mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string())
    }

    fn name(&self) -> &str {
        "GuessSniffer"
    }
}
