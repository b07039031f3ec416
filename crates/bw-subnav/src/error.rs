//! Error types for subnav resolution.

use std::path::PathBuf;

use bw_storage::StorageError;

/// Error while building or writing a subnav.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SubnavError {
    /// The configured subnav root resolves to no file.
    #[error("subnav root not found: {path}")]
    RootMissing {
        /// Logical path of the root as configured.
        path: String,
    },

    /// A subnav link resolves to no file.
    #[error("broken subnav link: {path}")]
    BrokenLink {
        /// Logical path the link points at.
        path: String,
    },

    /// A subnav link resolves to a document already in the tree.
    #[error("duplicate subnav link: {path} (already included as {})", resolved.display())]
    DuplicateLink {
        /// Logical path the link points at.
        path: String,
        /// File the link resolved to.
        resolved: PathBuf,
    },

    /// A component was invoked without the context it requires.
    #[error("malformed resolution: {0}")]
    MalformedResolution(String),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Rendered table of contents could not be parsed.
    #[error("HTML parse error")]
    Html(#[from] quick_xml::Error),

    /// JSON serialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML error")]
    Yaml(#[from] serde_yaml::Error),
}
