//! Extension-agnostic matching of logical paths.
//!
//! A logical path names a document without committing to its templating or
//! rendering suffix: `guide/install` refers equally to `guide/install.html`,
//! `guide/install.html.md` and `guide/install.html.md.erb`.

use std::path::{Path, PathBuf};

/// Cut a logical path down to its stem.
///
/// Only the final component is cut, at its first `.`, so directories whose
/// names contain dots are kept intact (`di.r/foo.html` becomes `di.r/foo`).
///
/// Returns `None` when nothing is left to match on (an empty path, or a final
/// component that starts with a dot).
pub fn logical_stem(logical: &Path) -> Option<PathBuf> {
    let name = logical.file_name()?.to_str()?;
    let stem = name.split('.').next().unwrap_or_default();
    if stem.is_empty() {
        return None;
    }
    Some(logical.with_file_name(stem))
}

/// Check whether `candidate` (relative to the search root) matches `stem`.
///
/// The candidate must live in exactly the stem's directory and its file name
/// must be the stem name followed by a suffix starting with `.`. A candidate
/// without any suffix never matches.
pub fn matches_logical_stem(candidate: &Path, stem: &Path) -> bool {
    if candidate.parent() != stem.parent() {
        return false;
    }
    let (Some(name), Some(stem_name)) = (
        candidate.file_name().and_then(|n| n.to_str()),
        stem.file_name().and_then(|n| n.to_str()),
    ) else {
        return false;
    };
    name.strip_prefix(stem_name)
        .is_some_and(|rest| rest.starts_with('.'))
}
