//! Per-product subnav generation.

use std::sync::Arc;

use bw_config::{OutputLocations, ProductConfig};
use bw_storage::Storage;

use crate::builder::NavigationTreeBuilder;
use crate::entry::NavigationEntry;
use crate::error::SubnavError;
use crate::pdf::PdfConfigCreator;
use crate::template::TemplateCreator;

/// Builds a product's tree and writes everything derived from it.
pub struct SubnavGenerator {
    builder: NavigationTreeBuilder,
    template_creator: TemplateCreator,
    pdf_config_creator: PdfConfigCreator,
    locations: OutputLocations,
}

impl SubnavGenerator {
    /// Create a generator for one book build.
    pub fn new(storage: Arc<dyn Storage>, locations: OutputLocations, check_all_links: bool) -> Self {
        Self {
            builder: NavigationTreeBuilder::new(Arc::clone(&storage), check_all_links),
            template_creator: TemplateCreator::new(Arc::clone(&storage)),
            pdf_config_creator: PdfConfigCreator::new(storage),
            locations,
        }
    }

    /// Output locations this generator writes to.
    #[must_use]
    pub fn locations(&self) -> &OutputLocations {
        &self.locations
    }

    /// Build the tree for `product` without writing anything.
    pub fn links(&self, product: &ProductConfig) -> Result<Vec<NavigationEntry>, SubnavError> {
        self.builder.generate(product, &self.locations)
    }

    /// Write the subnav partial and props for `product`, plus its PDF
    /// config when one is named.
    ///
    /// Returns the tree that was written.
    pub fn generate(&self, product: &ProductConfig) -> Result<Vec<NavigationEntry>, SubnavError> {
        let entries = self.links(product)?;

        self.template_creator
            .create(&entries, product, &self.locations)?;

        if product.pdf_config.is_some() {
            self.pdf_config_creator
                .create(&entries, product, &self.locations)?;
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use bw_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn storage() -> Arc<MockStorage> {
        Arc::new(
            MockStorage::new()
                .with_file(
                    "/book/output/master_middleman/source/docs/index.html.md",
                    "## <a href=\"./intro.html\" class=\"subnav\">Intro</a>\n",
                )
                .with_file("/book/output/master_middleman/source/docs/intro.md", ""),
        )
    }

    fn generator(storage: &Arc<MockStorage>) -> SubnavGenerator {
        SubnavGenerator::new(
            Arc::clone(storage) as Arc<dyn Storage>,
            OutputLocations::new("/book"),
            true,
        )
    }

    #[test]
    fn test_generate_without_pdf_config() {
        let storage = storage();
        let product = ProductConfig::new("docs").with_subnav_root("docs/index");

        let entries = generator(&storage).generate(&product).unwrap();

        assert_eq!(entries, vec![NavigationEntry::new("/docs/intro.html", "Intro")]);
        assert_eq!(
            storage.written(),
            vec![
                PathBuf::from("/book/output/master_middleman/source/subnavs/_docs.html"),
                PathBuf::from("/book/output/master_middleman/source/subnavs/docs-props.json"),
            ]
        );
    }

    #[test]
    fn test_generate_with_pdf_config() {
        let storage = storage();
        let product = ProductConfig::new("docs")
            .with_subnav_root("docs/index")
            .with_pdf_config("docs-pdf.yml");

        generator(&storage).generate(&product).unwrap();

        assert_eq!(
            storage.written().last(),
            Some(&PathBuf::from("/book/docs-pdf.yml"))
        );
        assert_eq!(storage.written().len(), 3);
    }

    #[test]
    fn test_generate_failure_writes_nothing() {
        let storage = Arc::new(MockStorage::new());
        let product = ProductConfig::new("docs")
            .with_subnav_root("docs/index")
            .with_pdf_config("docs-pdf.yml");

        let err = generator(&storage).generate(&product).unwrap_err();

        assert!(matches!(err, SubnavError::RootMissing { .. }));
        assert!(storage.written().is_empty());
    }

    #[test]
    fn test_links_does_not_write() {
        let storage = storage();
        let product = ProductConfig::new("docs").with_subnav_root("docs/index");

        let entries = generator(&storage).links(&product).unwrap();

        assert_eq!(entries.len(), 1);
        assert!(storage.written().is_empty());
    }
}
