//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading and writing the staged book tree on the
//! local filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use crate::logical::{logical_stem, matches_logical_stem};
use crate::storage::{Storage, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Stateless: every call goes straight to the filesystem. Symlinks are
/// followed when searching, since staged books link section sources into the
/// site generator's tree instead of copying them. Lookups only list the one
/// directory a logical path can resolve into, so they never walk the tree.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use bw_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new();
/// let matches = storage.find_extension_agnostic(Path::new("my/index"), Path::new("source"));
/// ```
#[derive(Debug, Default)]
pub struct FsStorage;

impl FsStorage {
    /// Create a new filesystem storage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// List the files directly inside `dir` that match `stem`.
    fn collect_matches(dir: &Path, root: &Path, stem: &Path) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };

        entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            // Path::is_file follows symlinks
            .filter(|path| path.is_file())
            .filter(|path| {
                path.strip_prefix(root)
                    .is_ok_and(|rel_path| matches_logical_stem(rel_path, stem))
            })
            .collect()
    }
}

impl Storage for FsStorage {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        fs::read_to_string(path)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))
    }

    fn find_extension_agnostic(&self, logical: &Path, root: &Path) -> Vec<PathBuf> {
        let Some(stem) = logical_stem(logical) else {
            return Vec::new();
        };

        // Only the stem's own directory can hold matches
        let search_dir = root.join(stem.parent().unwrap_or(Path::new("")));
        let mut found = Self::collect_matches(&search_dir, root, &stem);
        found.sort();

        tracing::trace!(
            logical = %logical.display(),
            root = %root.display(),
            matches = found.len(),
            "Extension-agnostic lookup"
        );
        found
    }

    fn overwrite(&self, path: &Path, text: &str) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::io(e, Some(parent.to_path_buf())).with_backend(BACKEND)
            })?;
        }
        fs::write(path, text)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageErrorKind;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_find_matches_every_extension() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        touch(&root.join("top-dir/nested/dir/foo.whatev"));
        touch(&root.join("top-dir/nested/dir/foo.erb.blah"));
        touch(&root.join("top-dir/nested/dir/bar.html"));

        let storage = FsStorage::new();
        let found =
            storage.find_extension_agnostic(Path::new("top-dir/nested/dir/foo.html"), root);

        assert_eq!(
            found,
            vec![
                root.join("top-dir/nested/dir/foo.erb.blah"),
                root.join("top-dir/nested/dir/foo.whatev"),
            ]
        );
    }

    #[test]
    fn test_find_without_extension() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        touch(&root.join("top-dir/nested/dir/foo.html"));
        touch(&root.join("top-dir/nested/dir/bar"));

        let storage = FsStorage::new();
        let found = storage.find_extension_agnostic(Path::new("top-dir/nested/dir/foo"), root);

        assert_eq!(found, vec![root.join("top-dir/nested/dir/foo.html")]);
    }

    #[test]
    fn test_find_in_directory_with_dot() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("top-dir/nested/di.r/foo.dir")).unwrap();
        touch(&root.join("top-dir/nested/di.r/foo.whatev"));
        touch(&root.join("top-dir/nested/di.t"));

        let storage = FsStorage::new();
        let found =
            storage.find_extension_agnostic(Path::new("top-dir/nested/di.r/foo.html"), root);

        assert_eq!(found, vec![root.join("top-dir/nested/di.r/foo.whatev")]);
    }

    #[test]
    fn test_find_only_matches_full_path() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        touch(&root.join("nested/foo.whatev"));
        touch(&root.join("dir/nested/foo.whatev"));

        let storage = FsStorage::new();
        let found = storage.find_extension_agnostic(Path::new("nested/foo.html"), root);

        assert_eq!(found, vec![root.join("nested/foo.whatev")]);
    }

    #[test]
    fn test_find_does_not_match_longer_names() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        touch(&root.join("my/index.html"));
        touch(&root.join("my/index.html.md.erb"));
        touch(&root.join("my/index2.html"));

        let storage = FsStorage::new();
        let found = storage.find_extension_agnostic(Path::new("my/index"), root);

        assert_eq!(
            found,
            vec![root.join("my/index.html"), root.join("my/index.html.md.erb")]
        );
    }

    #[test]
    fn test_find_missing_root_is_empty() {
        let storage = FsStorage::new();
        let found =
            storage.find_extension_agnostic(Path::new("my/index"), Path::new("/nonexistent"));

        assert!(found.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_find_follows_symlinked_directories() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path().join("source");
        let section = temp_dir.path().join("section-repo");
        touch(&section.join("guide.html.md"));
        fs::create_dir_all(&root).unwrap();
        std::os::unix::fs::symlink(&section, root.join("my")).unwrap();

        let storage = FsStorage::new();
        let found = storage.find_extension_agnostic(Path::new("my/guide.html"), &root);

        assert_eq!(found, vec![root.join("my/guide.html.md")]);
    }

    #[test]
    fn test_read_and_exists() {
        let temp_dir = create_test_dir();
        let path = temp_dir.path().join("doc.html.md");
        fs::write(&path, "## Heading").unwrap();

        let storage = FsStorage::new();

        assert!(storage.exists(&path));
        assert!(!storage.exists(temp_dir.path()));
        assert_eq!(storage.read(&path).unwrap(), "## Heading");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new();

        let err = storage.read(&temp_dir.path().join("missing.md")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_overwrite_replaces_content() {
        let temp_dir = create_test_dir();
        let path = temp_dir.path().join("my-file.html");
        fs::write(&path, "this is some text").unwrap();

        let storage = FsStorage::new();
        storage.overwrite(&path, "and this is more text").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "and this is more text");
    }

    #[test]
    fn test_overwrite_creates_parent_directories() {
        let temp_dir = create_test_dir();
        let path = temp_dir.path().join("subnavs/deep/my-file.html");

        let storage = FsStorage::new();
        storage.overwrite(&path, "and this is more text").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "and this is more text");
    }
}
