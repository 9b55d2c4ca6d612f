use super::{AnyOf, ClassificationRegistry, ContainsEntry, HasChildWithExtension};
use crate::types::Kind;

/// Register every built-in kind, in precedence order.
///
/// Folder rules are order-sensitive: a Python package that also ships a
/// Makefile or an `index.html` stays a Python package.
pub fn register_builtin_kinds(registry: &mut ClassificationRegistry) {
    registry.register_folder(ContainsEntry::new("__init__.py"), Kind::PYTHON_PACKAGE);
    registry.register_folder(
        AnyOf::new(vec![
            Box::new(ContainsEntry::new("Makefile")),
            Box::new(HasChildWithExtension::new("c")),
        ]),
        Kind::C_PROJECT,
    );
    registry.register_folder(ContainsEntry::new("index.html"), Kind::WEBSITE_FOLDER);

    registry.register_extension([".py"], Kind::PYTHON_FILE);
    registry.register_extension([".c", ".h"], Kind::C_SOURCE_FILE);
    registry.register_extension([".cfg"], Kind::CONFIG_FILE);
    registry.register_extension([".json"], Kind::JSON_FILE);
    registry.register_extension([".pkl", ".pickle"], Kind::PICKLE_FILE);

    registry.register_mime("text/", Kind::TEXT_FILE);
    registry.register_mime("image/", Kind::IMAGE_FILE);
    registry.register_mime("audio/", Kind::AUDIO_FILE);
    registry.register_mime("video/", Kind::VIDEO_FILE);
    registry.register_mime("application/json", Kind::JSON_FILE);
    registry.register_mime("application/zip", Kind::ARCHIVE_FILE);
    registry.register_mime("application/gzip", Kind::ARCHIVE_FILE);
    registry.register_mime("application/x-tar", Kind::ARCHIVE_FILE);
    registry.register_mime("application/x-bzip2", Kind::ARCHIVE_FILE);
    registry.register_mime("application/x-xz", Kind::ARCHIVE_FILE);
    registry.register_mime("application/x-executable", Kind::EXECUTABLE_FILE);
    registry.register_mime("application/x-mach-binary", Kind::EXECUTABLE_FILE);
    registry.register_mime("application/x-dosexec", Kind::EXECUTABLE_FILE);
}
