//! Per-product configuration.

use serde::Deserialize;

/// Configuration of one product (one subnav) within a book.
///
/// Loaded once per book build and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductConfig {
    /// Product identifier, also used as the subnav name.
    pub id: String,
    /// Logical path of the document the subnav tree starts from
    /// (e.g. `my/index`). `None` means the product has no subnav.
    pub subnav_root: Option<String>,
    /// File name of the PDF config to generate from the subnav.
    pub pdf_config: Option<String>,
    /// Desired directory of a preprocessed section whose rendered
    /// `index.html` is used as the table of contents.
    pub toc_directory: Option<String>,
}

impl ProductConfig {
    /// Create a product with the given id and nothing else configured.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the subnav root.
    #[must_use]
    pub fn with_subnav_root(mut self, subnav_root: impl Into<String>) -> Self {
        self.subnav_root = Some(subnav_root.into());
        self
    }

    /// Set the PDF config file name.
    #[must_use]
    pub fn with_pdf_config(mut self, pdf_config: impl Into<String>) -> Self {
        self.pdf_config = Some(pdf_config.into());
        self
    }

    /// Set the rendered table of contents directory.
    #[must_use]
    pub fn with_toc_directory(mut self, toc_directory: impl Into<String>) -> Self {
        self.toc_directory = Some(toc_directory.into());
        self
    }

    /// Name of the generated subnav partial.
    #[must_use]
    pub fn subnav_name(&self) -> &str {
        &self.id
    }

    /// A product is valid when it carries an id.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product() {
        let yaml = r"
id: my_product
subnav_root: some/file/path
pdf_config: mypdfconfig
";
        let product: ProductConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(product.id, "my_product");
        assert_eq!(product.subnav_root.as_deref(), Some("some/file/path"));
        assert_eq!(product.pdf_config.as_deref(), Some("mypdfconfig"));
        assert!(product.toc_directory.is_none());
    }

    #[test]
    fn test_subnav_name_is_id() {
        let product = ProductConfig::new("my_product");

        assert_eq!(product.subnav_name(), "my_product");
    }

    #[test]
    fn test_valid_with_id() {
        assert!(ProductConfig::new("elena").is_valid());
    }

    #[test]
    fn test_invalid_without_id() {
        let product: ProductConfig = serde_yaml::from_str("subnav_root: my/index").unwrap();

        assert!(!product.is_valid());
    }
}
