//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::logical::{logical_stem, matches_logical_stem};
use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Mock storage for testing.
///
/// Stores file contents in memory, keyed by path. Use the builder methods
/// to configure the mock with test data; writes made through
/// [`Storage::overwrite`] are visible to later reads and can be inspected
/// with [`MockStorage::written`].
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use bw_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("/source/my/index.html.md", "## <a href=\"./a.html\" class=\"subnav\">A</a>");
///
/// let found = storage.find_extension_agnostic(Path::new("my/index"), Path::new("/source"));
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<BTreeMap<PathBuf, String>>,
    writes: RwLock<Vec<PathBuf>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Paths written through [`Storage::overwrite`], in write order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn written(&self) -> Vec<PathBuf> {
        self.writes.read().unwrap().clone()
    }
}

impl Storage for MockStorage {
    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::NotFound)
                    .with_path(path)
                    .with_backend("Mock")
            })
    }

    fn find_extension_agnostic(&self, logical: &Path, root: &Path) -> Vec<PathBuf> {
        let Some(stem) = logical_stem(logical) else {
            return Vec::new();
        };
        // BTreeMap iteration keeps the result sorted
        self.files
            .read()
            .unwrap()
            .keys()
            .filter(|path| {
                path.strip_prefix(root)
                    .is_ok_and(|rel_path| matches_logical_stem(rel_path, &stem))
            })
            .cloned()
            .collect()
    }

    fn overwrite(&self, path: &Path, text: &str) -> Result<(), StorageError> {
        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), text.to_owned());
        self.writes.write().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_mock_storage_is_send_sync() {
        assert_send_sync::<MockStorage>();
    }

    #[test]
    fn test_with_file() {
        let storage = MockStorage::new().with_file("/source/guide.md", "## Guide");

        assert!(storage.exists(Path::new("/source/guide.md")));
        assert_eq!(storage.read(Path::new("/source/guide.md")).unwrap(), "## Guide");
    }

    #[test]
    fn test_read_not_found() {
        let storage = MockStorage::new();

        let err = storage.read(Path::new("missing.md")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_find_extension_agnostic() {
        let storage = MockStorage::new()
            .with_file("/source/my/index.html", "")
            .with_file("/source/my/index.html.md.erb", "")
            .with_file("/source/my/index2.html", "")
            .with_file("/other/my/index.html", "");

        let found = storage.find_extension_agnostic(Path::new("my/index"), Path::new("/source"));

        assert_eq!(
            found,
            vec![
                PathBuf::from("/source/my/index.html"),
                PathBuf::from("/source/my/index.html.md.erb"),
            ]
        );
    }

    #[test]
    fn test_overwrite_is_readable_and_recorded() {
        let storage = MockStorage::new().with_file("/out/pdf.yml", "old");

        storage.overwrite(Path::new("/out/pdf.yml"), "new").unwrap();

        assert_eq!(storage.read(Path::new("/out/pdf.yml")).unwrap(), "new");
        assert_eq!(storage.written(), vec![PathBuf::from("/out/pdf.yml")]);
    }
}
