//! Depth-first subnav discovery from a markdown root document.
//!
//! The walker starts from a product's `subnav_root`, follows every subnav
//! heading anchor into the linked document and mirrors the link structure as
//! nested [`NavigationEntry`] values.
//!
//! # Link policy
//!
//! With `check_all_links` set, a link resolving to no file fails with
//! [`SubnavError::BrokenLink`] and a link to a document already in the tree
//! fails with [`SubnavError::DuplicateLink`]. Without it, both are logged and
//! kept: broken links become leaf entries carrying the href as written, and
//! duplicates are emitted again without descending into them a second time.
//!
//! External `http(s)` links and same-page `#fragment` links are emitted
//! untouched and never resolved.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bw_config::OutputLocations;
use bw_storage::Storage;

use crate::entry::NavigationEntry;
use crate::error::SubnavError;
use crate::markdown::subnav_links_in;
use crate::path::{is_external, join_logical, logical_dir, site_url, split_suffix};
use crate::resolver::FileResolver;

/// Files already placed in the tree being built.
///
/// Keyed by resolved file path, so `./doc.html` and `../x/doc.html` pointing
/// at the same file count as the same document.
#[derive(Debug, Default)]
pub struct VisitedSet(HashSet<PathBuf>);

impl VisitedSet {
    /// Record `path`; returns `false` if it was already present.
    pub fn insert(&mut self, path: &Path) -> bool {
        self.0.insert(path.to_path_buf())
    }

    /// Whether `path` is already in the tree.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.0.contains(path)
    }

    /// Number of documents in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been visited yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Builds a subnav tree by walking markdown source documents.
pub struct MarkdownRootWalker {
    storage: Arc<dyn Storage>,
    check_all_links: bool,
}

impl MarkdownRootWalker {
    /// Create a walker. `check_all_links` selects strict mode.
    pub fn new(storage: Arc<dyn Storage>, check_all_links: bool) -> Self {
        Self {
            storage,
            check_all_links,
        }
    }

    /// Build the tree rooted at the logical path `subnav_root`.
    ///
    /// # Errors
    ///
    /// Returns [`SubnavError::RootMissing`] if the root resolves to no file
    /// (in either mode), the strict-mode link errors described in the module
    /// docs, or a storage error if a resolved document cannot be read.
    pub fn build(
        &self,
        subnav_root: &str,
        locations: &OutputLocations,
    ) -> Result<Vec<NavigationEntry>, SubnavError> {
        let source = locations.source_for_site_generator();
        let resolver = FileResolver::new(self.storage.as_ref(), &source);

        let root_logical = subnav_root.trim_start_matches('/');
        let root = resolver.resolve(root_logical);
        let Some(root_file) = root.primary() else {
            return Err(SubnavError::RootMissing {
                path: subnav_root.to_owned(),
            });
        };

        tracing::debug!(root = %root_file.display(), "Building subnav from markdown root");

        let mut visited = VisitedSet::default();
        visited.insert(root_file);
        let entries = self.walk(&resolver, root_logical, root_file, &mut visited)?;

        tracing::debug!(documents = visited.len(), "Subnav walk complete");
        Ok(entries)
    }

    fn walk(
        &self,
        resolver: &FileResolver<'_>,
        logical: &str,
        file: &Path,
        visited: &mut VisitedSet,
    ) -> Result<Vec<NavigationEntry>, SubnavError> {
        let text = self.storage.read(file)?;
        let base_dir = logical_dir(logical);

        let mut entries = Vec::new();
        for link in subnav_links_in(&text) {
            let (href_path, suffix) = split_suffix(&link.href);
            if is_external(&link.href) || href_path.is_empty() {
                entries.push(NavigationEntry::new(link.href, link.label));
                continue;
            }

            let Some(target) = join_logical(base_dir, href_path) else {
                let literal = link.href.trim_start_matches("./").trim_start_matches('/');
                self.tolerate_broken(literal, file)?;
                entries.push(NavigationEntry::new(format!("/{literal}"), link.label));
                continue;
            };

            let resolved = resolver.resolve(&target);
            let Some(target_file) = resolved.primary() else {
                self.tolerate_broken(&target, file)?;
                entries.push(NavigationEntry::new(format!("/{target}{suffix}"), link.label));
                continue;
            };

            if !visited.insert(target_file) {
                if self.check_all_links {
                    return Err(SubnavError::DuplicateLink {
                        path: target,
                        resolved: target_file.to_path_buf(),
                    });
                }
                tracing::warn!(
                    path = %target,
                    resolved = %target_file.display(),
                    "Duplicate subnav link"
                );
                entries.push(NavigationEntry::new(site_url(&target), link.label));
                continue;
            }

            let nested = self.walk(resolver, &target, target_file, visited)?;
            entries.push(NavigationEntry::new(site_url(&target), link.label).with_nested(nested));
        }

        Ok(entries)
    }

    fn tolerate_broken(&self, path: &str, linked_from: &Path) -> Result<(), SubnavError> {
        if self.check_all_links {
            return Err(SubnavError::BrokenLink {
                path: path.to_owned(),
            });
        }
        tracing::warn!(path, from = %linked_from.display(), "Broken subnav link");
        Ok(())
    }
}
