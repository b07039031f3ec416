//! Subnav navigation graph resolver for Bookwatch.
//!
//! This crate provides:
//! - [`SubnavGenerator`]: builds a product's tree and writes the subnav
//!   partial, props JSON and PDF config
//! - [`NavigationTreeBuilder`]: picks the tree source for a product
//! - [`MarkdownRootWalker`]: follows `## <a href="..." class="subnav">` links
//!   from a root document, with strict or lenient link checking
//! - [`HtmlTocReader`]: reads the tree from a rendered table of contents
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use bw_config::{OutputLocations, ProductConfig};
//! use bw_storage::FsStorage;
//! use bw_subnav::SubnavGenerator;
//!
//! let generator = SubnavGenerator::new(Arc::new(FsStorage::new()), OutputLocations::new("."), true);
//! let product = ProductConfig::new("docs").with_subnav_root("docs/index");
//!
//! let entries = generator.generate(&product)?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod entities;
mod entry;
mod error;
mod generator;
pub mod html_toc;
pub mod markdown;
mod path;
mod pdf;
mod resolver;
mod tag;
mod template;
mod walker;

pub use builder::{NavigationSource, NavigationTreeBuilder, Strategy};
pub use entry::{NavigationEntry, flatten_urls};
pub use error::SubnavError;
pub use generator::SubnavGenerator;
pub use html_toc::HtmlTocReader;
pub use markdown::SubnavLink;
pub use pdf::{PLACEHOLDER, PdfConfig, PdfConfigCreator};
pub use resolver::{FileResolver, ResolvedLink};
pub use template::{TemplateCreator, render_subnav};
pub use walker::{MarkdownRootWalker, VisitedSet};
