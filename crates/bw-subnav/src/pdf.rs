//! PDF page-list generation from a subnav tree.

use std::sync::Arc;

use bw_config::{OutputLocations, ProductConfig};
use bw_storage::Storage;
use serde::{Deserialize, Serialize};

use crate::entry::{NavigationEntry, flatten_urls};
use crate::error::SubnavError;

/// Value written for fields the book author must fill in.
pub const PLACEHOLDER: &str = "REPLACE ME";

/// PDF config as written to disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Footer copyright line; written as [`PLACEHOLDER`].
    pub copyright_notice: String,
    /// Running page header; written as [`PLACEHOLDER`].
    pub header: String,
    /// PDF renderer to invoke; written as [`PLACEHOLDER`].
    pub executable: String,
    /// Pages in reading order, relative to the site root.
    pub pages: Vec<String>,
}

impl PdfConfig {
    /// Config listing every linked page of `entries`, depth-first.
    #[must_use]
    pub fn from_entries(entries: &[NavigationEntry]) -> Self {
        Self {
            copyright_notice: PLACEHOLDER.to_owned(),
            header: PLACEHOLDER.to_owned(),
            executable: PLACEHOLDER.to_owned(),
            pages: flatten_urls(entries)
                .into_iter()
                .map(|url| url.trim_start_matches('/').to_owned())
                .collect(),
        }
    }
}

/// Writes a product's PDF config.
pub struct PdfConfigCreator {
    storage: Arc<dyn Storage>,
}

impl PdfConfigCreator {
    /// Create a creator writing through `storage`.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Write `<pdf config dir>/<pdf_config>` for `product`.
    ///
    /// # Errors
    ///
    /// Returns [`SubnavError::MalformedResolution`] if the product names no
    /// PDF config, or an error if serialization or the write fails.
    pub fn create(
        &self,
        entries: &[NavigationEntry],
        product: &ProductConfig,
        locations: &OutputLocations,
    ) -> Result<(), SubnavError> {
        let name = product.pdf_config.as_deref().ok_or_else(|| {
            SubnavError::MalformedResolution(format!("product {} has no pdf_config", product.id))
        })?;

        let config = PdfConfig::from_entries(entries);
        let path = locations.pdf_config_dir().join(name);
        self.storage
            .overwrite(&path, &serde_yaml::to_string(&config)?)?;

        tracing::info!(
            product = %product.id,
            path = %path.display(),
            pages = config.pages.len(),
            "Wrote PDF config"
        );
        Ok(())
    }
}
