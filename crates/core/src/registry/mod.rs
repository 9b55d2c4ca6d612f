//! Path-to-kind classification.
//!
//! A [`ClassificationRegistry`] holds three rule sets and consults them in a
//! fixed order:
//!
//! 1. a path that does not exist is [`Kind::MISSING`];
//! 2. a directory goes through the folder rules in registration order, first
//!    match wins, otherwise [`Kind::FOLDER`];
//! 3. anything else is looked up by lower-cased suffix, then by the longest
//!    registered prefix of its detected MIME type, otherwise [`Kind::FILE`].
//!
//! Classification never fails. Unreadable entries and failing predicates
//! degrade to a less specific kind.

mod builtin;
mod context;
mod predicate;
mod shared;

pub use builtin::register_builtin_kinds;
pub use context::{ClassificationContext, EntryState};
pub use predicate::{AnyOf, ContainsEntry, FnPredicate, FolderPredicate, HasChildWithExtension};
pub use shared::{SharedRegistry, global};

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::sniff::{FallbackSniffer, MimeSniffer};
use crate::types::{Classification, Kind, RuleSource};

struct FolderRule {
    predicate: Box<dyn FolderPredicate>,
    kind: Kind,
}

/// Read-only view of one registered folder rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRuleInfo<'a> {
    pub index: usize,
    pub name: &'a str,
    pub kind: &'a Kind,
}

pub struct ClassificationRegistry {
    folder_rules: Vec<FolderRule>,
    extensions: BTreeMap<String, Kind>,
    mime_prefixes: BTreeMap<String, Kind>,
    sniffer: Box<dyn MimeSniffer>,
}

impl ClassificationRegistry {
    /// Create a registry with no rules and the default sniffer chain.
    pub fn new() -> Self {
        Self::with_sniffer(Box::new(FallbackSniffer::default()))
    }

    pub fn with_sniffer(sniffer: Box<dyn MimeSniffer>) -> Self {
        Self {
            folder_rules: Vec::new(),
            extensions: BTreeMap::new(),
            mime_prefixes: BTreeMap::new(),
            sniffer,
        }
    }

    /// Create a registry populated by [`register_builtin_kinds`].
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        register_builtin_kinds(&mut registry);
        registry
    }

    pub fn set_sniffer(&mut self, sniffer: Box<dyn MimeSniffer>) {
        self.sniffer = sniffer;
    }

    pub fn sniffer(&self) -> &dyn MimeSniffer {
        self.sniffer.as_ref()
    }

    /// Append a folder rule. Rules are consulted in registration order.
    pub fn register_folder(&mut self, predicate: impl FolderPredicate + 'static, kind: Kind) {
        self.register_folder_boxed(Box::new(predicate), kind);
    }

    pub fn register_folder_boxed(&mut self, predicate: Box<dyn FolderPredicate>, kind: Kind) {
        debug!("Registering folder rule '{}' -> {}", predicate.name(), kind);
        self.folder_rules.push(FolderRule { predicate, kind });
    }

    /// Insert a folder rule at `position` so it is consulted before the
    /// rules already registered there. Positions past the end append.
    pub fn insert_folder_boxed(
        &mut self,
        position: usize,
        predicate: Box<dyn FolderPredicate>,
        kind: Kind,
    ) {
        let position = position.min(self.folder_rules.len());
        debug!(
            "Inserting folder rule '{}' -> {} at {}",
            predicate.name(),
            kind,
            position
        );
        self.folder_rules.insert(position, FolderRule { predicate, kind });
    }

    /// Register a closure as a folder rule.
    pub fn register_folder_fn<F>(&mut self, name: impl Into<String>, f: F, kind: Kind)
    where
        F: Fn(&Path) -> io::Result<bool> + Send + Sync + 'static,
    {
        self.register_folder(FnPredicate::new(name, f), kind);
    }

    /// Map one or more extensions to a kind, overwriting earlier entries.
    ///
    /// `py`, `.py` and `.PY` all register `.py`. Empty or multi-part
    /// extensions can never match a suffix and are skipped.
    pub fn register_extension<I, S>(&mut self, extensions: I, kind: Kind)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for extension in extensions {
            let raw = extension.as_ref();
            match normalize_extension(raw) {
                Some(normalized) => {
                    debug!("Registering extension {} -> {}", normalized, kind);
                    if let Some(previous) = self.extensions.insert(normalized, kind.clone()) {
                        trace!("Extension {:?} previously mapped to {}", raw, previous);
                    }
                }
                None => warn!("Ignoring invalid extension {:?} for {}", raw, kind),
            }
        }
    }

    /// Map a MIME prefix (e.g. `text/`) to a kind, overwriting an earlier entry.
    pub fn register_mime(&mut self, prefix: impl AsRef<str>, kind: Kind) {
        let raw = prefix.as_ref();
        match normalize_mime_prefix(raw) {
            Some(normalized) => {
                debug!("Registering MIME prefix {} -> {}", normalized, kind);
                self.mime_prefixes.insert(normalized, kind);
            }
            None => warn!("Ignoring empty MIME prefix for {}", kind),
        }
    }

    /// Classify a path. Never fails.
    pub fn classify(&self, path: impl AsRef<Path>) -> Kind {
        self.explain(path).kind
    }

    /// Classify a path and report which rule decided it.
    pub fn explain(&self, path: impl AsRef<Path>) -> Classification {
        let ctx = ClassificationContext::inspect(path.as_ref(), self.sniffer.as_ref());
        trace!("Classifying {:?} ({:?})", ctx.path(), ctx.state());

        let (kind, source) = match ctx.state() {
            EntryState::Missing => (Kind::MISSING, RuleSource::Missing),
            EntryState::Directory => self.match_folder(&ctx),
            EntryState::File | EntryState::Unreadable => self.match_file(&ctx),
        };

        debug!("Classified {:?} as {} via {}", ctx.path(), kind, source);
        let mime = ctx.detected_mime();
        Classification::new(ctx.into_path(), kind, source).with_mime(mime)
    }

    fn match_folder(&self, ctx: &ClassificationContext<'_>) -> (Kind, RuleSource) {
        for (index, rule) in self.folder_rules.iter().enumerate() {
            match rule.predicate.matches(ctx.path()) {
                Ok(true) => {
                    let source = RuleSource::Folder {
                        index,
                        name: rule.predicate.name().to_string(),
                    };
                    return (rule.kind.clone(), source);
                }
                Ok(false) => {}
                Err(e) => trace!(
                    "Folder rule '{}' failed on {:?}: {}",
                    rule.predicate.name(),
                    ctx.path(),
                    e
                ),
            }
        }

        if ctx.vanished() {
            return (Kind::MISSING, RuleSource::Missing);
        }
        (Kind::FOLDER, RuleSource::Fallback)
    }

    fn match_file(&self, ctx: &ClassificationContext<'_>) -> (Kind, RuleSource) {
        if let Some(suffix) = ctx.suffix() {
            if let Some(kind) = self.extensions.get(suffix) {
                let source = RuleSource::Extension {
                    extension: suffix.to_string(),
                };
                return (kind.clone(), source);
            }
        }

        if let Some(mime) = ctx.mime() {
            if let Some((prefix, kind)) = self.longest_mime_prefix(mime) {
                let source = RuleSource::Mime {
                    prefix: prefix.to_string(),
                    mime: mime.to_string(),
                };
                return (kind.clone(), source);
            }
        }

        if ctx.vanished() {
            return (Kind::MISSING, RuleSource::Missing);
        }
        (Kind::FILE, RuleSource::Fallback)
    }

    fn longest_mime_prefix(&self, mime: &str) -> Option<(&str, &Kind)> {
        self.mime_prefixes
            .iter()
            .filter(|(prefix, _)| mime.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(prefix, kind)| (prefix.as_str(), kind))
    }

    /// Folder rules in consultation order.
    pub fn folder_rules(&self) -> impl Iterator<Item = FolderRuleInfo<'_>> {
        self.folder_rules
            .iter()
            .enumerate()
            .map(|(index, rule)| FolderRuleInfo {
                index,
                name: rule.predicate.name(),
                kind: &rule.kind,
            })
    }

    /// Extension map, sorted by extension.
    pub fn extension_rules(&self) -> impl Iterator<Item = (&str, &Kind)> {
        self.extensions.iter().map(|(ext, kind)| (ext.as_str(), kind))
    }

    /// MIME prefix map, sorted by prefix.
    pub fn mime_rules(&self) -> impl Iterator<Item = (&str, &Kind)> {
        self.mime_prefixes
            .iter()
            .map(|(prefix, kind)| (prefix.as_str(), kind))
    }

    /// Render all rules in consultation order, one per line.
    pub fn describe_rules(&self) -> String {
        let mut out = String::new();
        out.push_str("folders:\n");
        for rule in self.folder_rules() {
            out.push_str(&format!("  {}. {} -> {}\n", rule.index + 1, rule.name, rule.kind));
        }
        out.push_str("extensions:\n");
        for (ext, kind) in self.extension_rules() {
            out.push_str(&format!("  {ext} -> {kind}\n"));
        }
        out.push_str("mime:\n");
        for (prefix, kind) in self.mime_rules() {
            out.push_str(&format!("  {prefix} -> {kind}\n"));
        }
        out
    }
}

impl Default for ClassificationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClassificationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let folders: Vec<(&str, &Kind)> = self
            .folder_rules
            .iter()
            .map(|rule| (rule.predicate.name(), &rule.kind))
            .collect();
        f.debug_struct("ClassificationRegistry")
            .field("folder_rules", &folders)
            .field("extensions", &self.extensions)
            .field("mime_prefixes", &self.mime_prefixes)
            .field("sniffer", &self.sniffer.name())
            .finish()
    }
}

/// Normalize an extension to lower case with exactly one leading dot.
pub fn normalize_extension(extension: &str) -> Option<String> {
    let bare = extension.trim().trim_start_matches('.');
    if bare.is_empty() || bare.contains('.') || bare.contains(['/', '\\']) {
        return None;
    }
    Some(format!(".{}", bare.to_lowercase()))
}

pub fn normalize_mime_prefix(prefix: &str) -> Option<String> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return None;
    }
    Some(prefix.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sniff::NoSniffer;
    use std::fs;
    use tempfile::TempDir;

    struct FixedMime(&'static str);
    impl MimeSniffer for FixedMime {
        fn sniff(&self, _path: &Path) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    fn touch(dir: &Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("py"), Some(".py".to_string()));
        assert_eq!(normalize_extension(".PY"), Some(".py".to_string()));
        assert_eq!(normalize_extension(" .c "), Some(".c".to_string()));
        assert_eq!(normalize_extension(""), None);
        assert_eq!(normalize_extension("."), None);
        assert_eq!(normalize_extension("tar.gz"), None);
    }

    #[test]
    fn test_missing_path() {
        let registry = ClassificationRegistry::with_builtin();
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(registry.classify(temp_dir.path().join("ghost.py")), Kind::MISSING);
        assert_eq!(registry.classify(temp_dir.path().join("ghost")), Kind::MISSING);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let mut registry = ClassificationRegistry::with_sniffer(Box::new(NoSniffer));
        registry.register_extension([".c", "H"], Kind::C_SOURCE_FILE);

        let temp_dir = TempDir::new().unwrap();
        for name in ["main.c", "header.h", "upper.C", "UPPER.H"] {
            let path = touch(temp_dir.path(), name);
            assert_eq!(registry.classify(&path), Kind::C_SOURCE_FILE, "{name}");
        }
    }

    #[test]
    fn test_reregistering_extension_overwrites() {
        let mut registry = ClassificationRegistry::with_sniffer(Box::new(NoSniffer));
        registry.register_extension(["cfg"], Kind::CONFIG_FILE);
        registry.register_extension([".CFG"], Kind::TEXT_FILE);
        assert_eq!(registry.extension_rules().count(), 1);

        let temp_dir = TempDir::new().unwrap();
        let path = touch(temp_dir.path(), "setup.cfg");
        assert_eq!(registry.classify(&path), Kind::TEXT_FILE);
    }

    #[test]
    fn test_first_registered_folder_rule_wins() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "__init__.py");
        touch(temp_dir.path(), "index.html");

        let mut registry = ClassificationRegistry::new();
        registry.register_folder(ContainsEntry::new("__init__.py"), Kind::PYTHON_PACKAGE);
        registry.register_folder(ContainsEntry::new("index.html"), Kind::WEBSITE_FOLDER);
        assert_eq!(registry.classify(temp_dir.path()), Kind::PYTHON_PACKAGE);

        let mut reversed = ClassificationRegistry::new();
        reversed.register_folder(ContainsEntry::new("index.html"), Kind::WEBSITE_FOLDER);
        reversed.register_folder(ContainsEntry::new("__init__.py"), Kind::PYTHON_PACKAGE);
        assert_eq!(reversed.classify(temp_dir.path()), Kind::WEBSITE_FOLDER);
    }

    #[test]
    fn test_failing_predicate_is_a_non_match() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "index.html");

        let mut registry = ClassificationRegistry::new();
        registry.register_folder_fn(
            "explodes",
            |_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "nope")),
            Kind::new("never"),
        );
        registry.register_folder(ContainsEntry::new("index.html"), Kind::WEBSITE_FOLDER);

        let classification = registry.explain(temp_dir.path());
        assert_eq!(classification.kind, Kind::WEBSITE_FOLDER);
        assert_eq!(
            classification.source,
            RuleSource::Folder {
                index: 1,
                name: "contains index.html".to_string()
            }
        );
    }

    struct DeletingSniffer;
    impl MimeSniffer for DeletingSniffer {
        fn sniff(&self, path: &Path) -> Option<String> {
            fs::remove_file(path).ok()?;
            None
        }
    }

    #[test]
    fn test_folder_removed_during_classification_is_missing() {
        let mut registry = ClassificationRegistry::with_sniffer(Box::new(NoSniffer));
        registry.register_folder_fn(
            "removes itself",
            |dir: &Path| {
                fs::remove_dir_all(dir)?;
                Ok(false)
            },
            Kind::C_PROJECT,
        );

        let temp_dir = TempDir::new().unwrap();
        let doomed = temp_dir.path().join("doomed");
        fs::create_dir(&doomed).unwrap();

        let classification = registry.explain(&doomed);
        assert_eq!(classification.kind, Kind::MISSING);
        assert_eq!(classification.source, RuleSource::Missing);
    }

    #[test]
    fn test_file_removed_during_sniffing_is_missing() {
        let registry = ClassificationRegistry::with_sniffer(Box::new(DeletingSniffer));
        let temp_dir = TempDir::new().unwrap();
        let path = touch(temp_dir.path(), "unknown.blob");

        assert_eq!(registry.classify(&path), Kind::MISSING);
        assert!(!path.exists());
    }

    #[test]
    fn test_generic_folder_and_file() {
        let registry = ClassificationRegistry::with_builtin();
        let temp_dir = TempDir::new().unwrap();
        let plain = temp_dir.path().join("plain");
        fs::create_dir(&plain).unwrap();
        assert_eq!(registry.classify(&plain), Kind::FOLDER);

        let mut no_mime = ClassificationRegistry::with_builtin();
        no_mime.set_sniffer(Box::new(NoSniffer));
        let blob = touch(temp_dir.path(), "blob");
        let classification = no_mime.explain(&blob);
        assert_eq!(classification.kind, Kind::FILE);
        assert_eq!(classification.source, RuleSource::Fallback);
        assert_eq!(classification.mime, None);
    }

    #[test]
    fn test_extension_beats_mime() {
        let mut registry = ClassificationRegistry::with_sniffer(Box::new(FixedMime("text/plain")));
        registry.register_extension(["py"], Kind::PYTHON_FILE);
        registry.register_mime("text/", Kind::TEXT_FILE);

        let temp_dir = TempDir::new().unwrap();
        let path = touch(temp_dir.path(), "script.py");
        let classification = registry.explain(&path);
        assert_eq!(classification.kind, Kind::PYTHON_FILE);
        // The MIME tier was never consulted
        assert_eq!(classification.mime, None);
    }

    #[test]
    fn test_mime_prefix_match() {
        let mut registry = ClassificationRegistry::with_sniffer(Box::new(FixedMime("text/plain")));
        registry.register_mime("text/", Kind::TEXT_FILE);

        let temp_dir = TempDir::new().unwrap();
        let path = touch(temp_dir.path(), "notes.txt");
        let classification = registry.explain(&path);
        assert_eq!(classification.kind, Kind::TEXT_FILE);
        assert_eq!(
            classification.source,
            RuleSource::Mime {
                prefix: "text/".to_string(),
                mime: "text/plain".to_string()
            }
        );
        assert_eq!(classification.mime.as_deref(), Some("text/plain"));
    }

    #[test]
    fn test_longest_mime_prefix_wins() {
        let mut registry =
            ClassificationRegistry::with_sniffer(Box::new(FixedMime("application/json")));
        registry.register_mime("application/", Kind::new("binary_blob"));
        registry.register_mime("application/json", Kind::JSON_FILE);
        registry.register_mime("APPLICATION/J", Kind::new("j_thing"));

        let temp_dir = TempDir::new().unwrap();
        let path = touch(temp_dir.path(), "data");
        assert_eq!(registry.classify(&path), Kind::JSON_FILE);
    }

    #[test]
    fn test_mime_match_ignores_case() {
        let mut registry = ClassificationRegistry::with_sniffer(Box::new(FixedMime("Image/PNG")));
        registry.register_mime("IMAGE/", Kind::IMAGE_FILE);

        let temp_dir = TempDir::new().unwrap();
        let path = touch(temp_dir.path(), "picture");
        assert_eq!(registry.classify(&path), Kind::IMAGE_FILE);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let registry = ClassificationRegistry::with_builtin();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "hello\n").unwrap();

        let first = registry.explain(&path);
        let second = registry.explain(&path);
        assert_eq!(first, second);
        assert_eq!(first.kind, Kind::TEXT_FILE);
    }

    #[test]
    fn test_describe_rules() {
        let mut registry = ClassificationRegistry::with_sniffer(Box::new(NoSniffer));
        registry.register_folder(ContainsEntry::new("__init__.py"), Kind::PYTHON_PACKAGE);
        registry.register_extension(["py"], Kind::PYTHON_FILE);
        registry.register_extension(["c", "h"], Kind::C_SOURCE_FILE);
        registry.register_mime("text/", Kind::TEXT_FILE);

        insta::assert_snapshot!(registry.describe_rules(), @r"
        folders:
          1. contains __init__.py -> python_package
        extensions:
          .c -> c_source_file
          .h -> c_source_file
          .py -> python_file
        mime:
          text/ -> text_file
        ");
    }

    #[test]
    fn test_registry_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClassificationRegistry>();
    }
}
