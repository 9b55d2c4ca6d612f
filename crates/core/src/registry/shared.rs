use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::ClassificationRegistry;
use crate::types::{Classification, Kind};

/// A registry that supports registration while other threads classify.
///
/// Classification takes the read lock, registration the write lock. Cloning
/// shares the same underlying registry.
#[derive(Clone, Debug, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<ClassificationRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: ClassificationRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn with_builtin() -> Self {
        Self::new(ClassificationRegistry::with_builtin())
    }

    pub fn classify(&self, path: impl AsRef<Path>) -> Kind {
        self.read().classify(path)
    }

    pub fn explain(&self, path: impl AsRef<Path>) -> Classification {
        self.read().explain(path)
    }

    /// Run registration calls under the write lock.
    pub fn register<R>(&self, f: impl FnOnce(&mut ClassificationRegistry) -> R) -> R {
        f(&mut self.write())
    }

    pub fn read(&self) -> RwLockReadGuard<'_, ClassificationRegistry> {
        // Registration cannot leave the tables half-updated, so a poisoned
        // lock still guards consistent data.
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, ClassificationRegistry> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Process-wide registry, seeded with the built-in kinds on first use.
pub fn global() -> &'static SharedRegistry {
    static GLOBAL: OnceLock<SharedRegistry> = OnceLock::new();
    GLOBAL.get_or_init(SharedRegistry::with_builtin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn test_late_registration_is_visible_to_clones() {
        let shared = SharedRegistry::with_builtin();
        let clone = shared.clone();

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lib.rs");
        fs::write(&path, "pub fn f() {}\n").unwrap();
        assert_eq!(shared.classify(&path), Kind::TEXT_FILE);

        clone.register(|registry| registry.register_extension(["rs"], Kind::new("rust_file")));
        assert_eq!(shared.classify(&path), Kind::new("rust_file"));
    }

    #[test]
    fn test_concurrent_classification() {
        let shared = SharedRegistry::with_builtin();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("main.c");
        fs::write(&path, "int main(void){return 0;}").unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                let path = path.clone();
                thread::spawn(move || shared.classify(&path))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Kind::C_SOURCE_FILE);
        }
    }

    #[test]
    fn test_global_has_builtins() {
        assert!(global().read().folder_rules().count() >= 3);
        assert!(std::ptr::eq(global(), global()));
    }
}
