//! Strategy selection for building a product's subnav.

use std::sync::Arc;

use bw_config::{OutputLocations, ProductConfig};
use bw_storage::Storage;

use crate::entry::NavigationEntry;
use crate::error::SubnavError;
use crate::html_toc::HtmlTocReader;
use crate::walker::MarkdownRootWalker;

/// A way of discovering a product's navigation tree.
pub trait NavigationSource {
    /// Build the tree for `product`.
    ///
    /// # Errors
    ///
    /// Returns [`SubnavError::MalformedResolution`] if `product` lacks the
    /// field this source reads from, or any error of the source itself.
    fn discover(
        &self,
        product: &ProductConfig,
        locations: &OutputLocations,
    ) -> Result<Vec<NavigationEntry>, SubnavError>;
}

impl NavigationSource for MarkdownRootWalker {
    fn discover(
        &self,
        product: &ProductConfig,
        locations: &OutputLocations,
    ) -> Result<Vec<NavigationEntry>, SubnavError> {
        let root = product.subnav_root.as_deref().ok_or_else(|| {
            SubnavError::MalformedResolution(format!(
                "product {} has no subnav_root",
                product.id
            ))
        })?;
        self.build(root, locations)
    }
}

impl NavigationSource for HtmlTocReader {
    fn discover(
        &self,
        product: &ProductConfig,
        locations: &OutputLocations,
    ) -> Result<Vec<NavigationEntry>, SubnavError> {
        let dir = product.toc_directory.as_deref().ok_or_else(|| {
            SubnavError::MalformedResolution(format!(
                "product {} has no toc_directory",
                product.id
            ))
        })?;
        self.read(dir, locations)
    }
}

/// Which source a product's tree comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Rendered table of contents of a preprocessed section.
    HtmlToc,
    /// Markdown documents reachable from `subnav_root`.
    MarkdownRoot,
    /// The product has no navigation.
    Empty,
}

/// Builds navigation trees, choosing the source per product.
pub struct NavigationTreeBuilder {
    walker: MarkdownRootWalker,
    toc: HtmlTocReader,
}

impl NavigationTreeBuilder {
    /// Create a builder. `check_all_links` selects strict link checking for
    /// markdown roots.
    pub fn new(storage: Arc<dyn Storage>, check_all_links: bool) -> Self {
        Self {
            walker: MarkdownRootWalker::new(Arc::clone(&storage), check_all_links),
            toc: HtmlTocReader::new(storage),
        }
    }

    /// Decide where `product`'s tree comes from.
    #[must_use]
    pub fn strategy(&self, product: &ProductConfig, locations: &OutputLocations) -> Strategy {
        if let Some(dir) = product.toc_directory.as_deref()
            && self.toc.has_toc(dir, locations)
        {
            return Strategy::HtmlToc;
        }
        if product.subnav_root.is_some() {
            return Strategy::MarkdownRoot;
        }
        Strategy::Empty
    }

    /// Build the navigation tree for `product`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the selected source.
    pub fn generate(
        &self,
        product: &ProductConfig,
        locations: &OutputLocations,
    ) -> Result<Vec<NavigationEntry>, SubnavError> {
        let strategy = self.strategy(product, locations);
        tracing::debug!(product = %product.id, ?strategy, "Generating navigation");

        let source: &dyn NavigationSource = match strategy {
            Strategy::HtmlToc => &self.toc,
            Strategy::MarkdownRoot => &self.walker,
            Strategy::Empty => return Ok(Vec::new()),
        };
        source.discover(product, locations)
    }
}
