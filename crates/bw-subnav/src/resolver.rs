//! Extension-agnostic resolution of logical paths.

use std::path::{Path, PathBuf};

use bw_storage::Storage;

/// A logical path together with the files it resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Logical path relative to the search root.
    pub logical: String,
    /// Concrete matches, sorted.
    pub matches: Vec<PathBuf>,
}

impl ResolvedLink {
    /// No file matched.
    #[must_use]
    pub fn is_broken(&self) -> bool {
        self.matches.is_empty()
    }

    /// File used for reading when several match.
    #[must_use]
    pub fn primary(&self) -> Option<&Path> {
        self.matches.first().map(PathBuf::as_path)
    }
}

/// Resolves logical paths under a fixed root.
pub struct FileResolver<'a> {
    storage: &'a dyn Storage,
    root: &'a Path,
}

impl<'a> FileResolver<'a> {
    /// Create a resolver searching under `root`.
    pub fn new(storage: &'a dyn Storage, root: &'a Path) -> Self {
        Self { storage, root }
    }

    /// Search root.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root
    }

    /// Resolve `logical` (e.g. `my/index` or `my/cats/doc.html`).
    pub fn resolve(&self, logical: &str) -> ResolvedLink {
        let matches = self
            .storage
            .find_extension_agnostic(Path::new(logical), self.root);
        tracing::trace!(logical, count = matches.len(), "Resolved logical path");
        ResolvedLink {
            logical: logical.to_owned(),
            matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use bw_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_resolve_any_extension() {
        let storage = MockStorage::new()
            .with_file("/src/my/index.html.md.erb", "")
            .with_file("/src/my/index.md", "")
            .with_file("/src/my/indexes.html", "");
        let root = Path::new("/src");
        let resolver = FileResolver::new(&storage, root);

        let resolved = resolver.resolve("my/index");

        assert_eq!(
            resolved.matches,
            vec![
                PathBuf::from("/src/my/index.html.md.erb"),
                PathBuf::from("/src/my/index.md"),
            ]
        );
        assert_eq!(
            resolved.primary(),
            Some(Path::new("/src/my/index.html.md.erb"))
        );
        assert!(!resolved.is_broken());
    }

    #[test]
    fn test_resolve_ignores_given_extension() {
        let storage = MockStorage::new().with_file("/src/my/doc.html.md", "");
        let root = Path::new("/src");
        let resolver = FileResolver::new(&storage, root);

        assert!(!resolver.resolve("my/doc.html").is_broken());
        assert!(!resolver.resolve("my/doc.pdf").is_broken());
    }

    #[test]
    fn test_resolve_broken() {
        let storage = MockStorage::new().with_file("/elsewhere/my/doc.md", "");
        let root = Path::new("/src");
        let resolver = FileResolver::new(&storage, root);

        let resolved = resolver.resolve("my/doc");

        assert!(resolved.is_broken());
        assert_eq!(resolved.primary(), None);
        assert_eq!(resolved.logical, "my/doc");
    }
}
