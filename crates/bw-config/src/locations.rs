//! Output locations of a book build.
//!
//! Every directory the subnav resolver reads from or writes to is derived
//! from a single context directory, so a build can be relocated by changing
//! one path.

use std::path::{Path, PathBuf};

/// Directory layout of one book build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLocations {
    context_dir: PathBuf,
}

impl OutputLocations {
    /// Create locations rooted at `context_dir`.
    #[must_use]
    pub fn new(context_dir: impl Into<PathBuf>) -> Self {
        Self {
            context_dir: context_dir.into(),
        }
    }

    /// The book's context directory.
    #[must_use]
    pub fn context_dir(&self) -> &Path {
        &self.context_dir
    }

    /// Build output directory (`output/`).
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.context_dir.join("output")
    }

    /// Staged site generator project (`output/master_middleman/`).
    #[must_use]
    pub fn site_generator_home(&self) -> PathBuf {
        self.output_dir().join("master_middleman")
    }

    /// Source tree the site generator builds from; logical paths resolve here.
    #[must_use]
    pub fn source_for_site_generator(&self) -> PathBuf {
        self.site_generator_home().join("source")
    }

    /// Directory the layout loads subnav partials from.
    #[must_use]
    pub fn subnavs_for_layout_dir(&self) -> PathBuf {
        self.source_for_site_generator().join("subnavs")
    }

    /// Rendered HTML produced by section preprocessing.
    #[must_use]
    pub fn html_from_preprocessing_dir(&self) -> PathBuf {
        self.output_dir().join("preprocessing").join("html")
    }

    /// Directory PDF configs are written to.
    #[must_use]
    pub fn pdf_config_dir(&self) -> PathBuf {
        self.context_dir.clone()
    }
}
