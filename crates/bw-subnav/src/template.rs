//! Subnav partial and props rendering.
//!
//! For each product two files land in the layout's subnav directory:
//! `_<name>.html`, a static `<nav>` tree the layout includes, and
//! `<name>-props.json`, the same tree as data for client-side rendering.

use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;

use bw_config::{OutputLocations, ProductConfig};
use bw_storage::Storage;
use serde::Serialize;

use crate::entry::NavigationEntry;
use crate::error::SubnavError;

/// Props file payload.
#[derive(Serialize)]
struct SubnavProps<'a> {
    links: &'a [NavigationEntry],
}

/// Writes a product's subnav partial and props.
pub struct TemplateCreator {
    storage: Arc<dyn Storage>,
}

impl TemplateCreator {
    /// Create a creator writing through `storage`.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Path of the partial for `product`.
    #[must_use]
    pub fn partial_path(product: &ProductConfig, locations: &OutputLocations) -> PathBuf {
        locations
            .subnavs_for_layout_dir()
            .join(format!("_{}.html", product.subnav_name()))
    }

    /// Path of the props file for `product`.
    #[must_use]
    pub fn props_path(product: &ProductConfig, locations: &OutputLocations) -> PathBuf {
        locations
            .subnavs_for_layout_dir()
            .join(format!("{}-props.json", product.subnav_name()))
    }

    /// Render and write both files.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or either write fails.
    pub fn create(
        &self,
        entries: &[NavigationEntry],
        product: &ProductConfig,
        locations: &OutputLocations,
    ) -> Result<(), SubnavError> {
        let partial = Self::partial_path(product, locations);
        self.storage
            .overwrite(&partial, &render_subnav(product.subnav_name(), entries))?;

        let props = serde_json::to_string_pretty(&SubnavProps { links: entries })?;
        self.storage
            .overwrite(&Self::props_path(product, locations), &props)?;

        tracing::info!(product = %product.id, path = %partial.display(), "Wrote subnav");
        Ok(())
    }
}

/// Render the `<nav>` partial.
pub fn render_subnav(name: &str, entries: &[NavigationEntry]) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        "<nav class=\"subnav\" data-subnav=\"{}\">",
        escape(name)
    );
    html.push_str("<ul>\n");
    render_nav_items(&mut html, entries);
    html.push_str("</ul>\n</nav>\n");
    html
}

fn render_nav_items(html: &mut String, entries: &[NavigationEntry]) {
    for entry in entries {
        html.push_str("<li>");
        match entry.url.as_deref() {
            Some(url) => {
                let _ = write!(html, "<a href=\"{}\">{}</a>", escape(url), escape(&entry.text));
            }
            None => {
                let _ = write!(
                    html,
                    "<span class=\"subnav-header\">{}</span>",
                    escape(&entry.text)
                );
            }
        }

        if !entry.nested_links.is_empty() {
            html.push_str("\n<ul>\n");
            render_nav_items(html, &entry.nested_links);
            html.push_str("</ul>\n");
        }

        html.push_str("</li>\n");
    }
}

fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use bw_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn tree() -> Vec<NavigationEntry> {
        vec![
            NavigationEntry::new("/my/a.html", "A").with_nested(vec![NavigationEntry::new(
                "/my/b.html",
                "B",
            )]),
            NavigationEntry::header("Reference"),
        ]
    }

    #[test]
    fn test_render_subnav_nests_lists() {
        assert_eq!(
            render_subnav("docs", &tree()),
            "<nav class=\"subnav\" data-subnav=\"docs\">\n\
             <ul>\n\
             <li><a href=\"/my/a.html\">A</a>\n\
             <ul>\n\
             <li><a href=\"/my/b.html\">B</a></li>\n\
             </ul>\n\
             </li>\n\
             <li><span class=\"subnav-header\">Reference</span></li>\n\
             </ul>\n\
             </nav>\n"
        );
    }

    #[test]
    fn test_render_subnav_escapes() {
        let html = render_subnav(
            "docs",
            &[NavigationEntry::new("/a.html?x=\"1\"", "Tips & <Tricks>")],
        );

        assert!(html.contains("href=\"/a.html?x=&quot;1&quot;\""));
        assert!(html.contains(">Tips &amp; &lt;Tricks&gt;</a>"));
    }

    #[test]
    fn test_create_writes_partial_and_props() {
        let storage = Arc::new(MockStorage::new());
        let creator = TemplateCreator::new(Arc::clone(&storage) as Arc<dyn Storage>);
        let locations = OutputLocations::new("/book");
        let product = ProductConfig::new("docs");

        creator.create(&tree(), &product, &locations).unwrap();

        let subnavs = Path::new("/book/output/master_middleman/source/subnavs");
        assert_eq!(
            storage.written(),
            vec![subnavs.join("_docs.html"), subnavs.join("docs-props.json")]
        );

        let props: serde_json::Value =
            serde_json::from_str(&storage.read(&subnavs.join("docs-props.json")).unwrap()).unwrap();
        assert_eq!(
            props,
            serde_json::json!({
                "links": [
                    {
                        "url": "/my/a.html",
                        "text": "A",
                        "nested_links": [{ "url": "/my/b.html", "text": "B" }]
                    },
                    { "text": "Reference" }
                ]
            })
        );
    }

    #[test]
    fn test_create_empty_tree() {
        let storage = Arc::new(MockStorage::new());
        let creator = TemplateCreator::new(Arc::clone(&storage) as Arc<dyn Storage>);
        let locations = OutputLocations::new("/book");

        creator
            .create(&[], &ProductConfig::new("bare"), &locations)
            .unwrap();

        let partial = storage
            .read(Path::new(
                "/book/output/master_middleman/source/subnavs/_bare.html",
            ))
            .unwrap();
        assert_eq!(partial, "<nav class=\"subnav\" data-subnav=\"bare\">\n<ul>\n</ul>\n</nav>\n");
    }
}
