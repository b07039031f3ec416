//! Navigation entry model shared by every discovery strategy.

use serde::{Deserialize, Serialize};

/// One node of a subnav tree.
///
/// Serializes as `{"url": ..., "text": ..., "nested_links": [...]}` with
/// `url` omitted for headers and `nested_links` omitted when empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    /// Absolute site path, or an external URL left untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Human-readable label.
    #[serde(default)]
    pub text: String,
    /// Child entries in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_links: Vec<NavigationEntry>,
}

impl NavigationEntry {
    /// Create a linked entry without children.
    #[must_use]
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            text: text.into(),
            nested_links: Vec::new(),
        }
    }

    /// Create a category header (an entry without a url).
    #[must_use]
    pub fn header(text: impl Into<String>) -> Self {
        Self {
            url: None,
            text: text.into(),
            nested_links: Vec::new(),
        }
    }

    /// Attach child entries.
    #[must_use]
    pub fn with_nested(mut self, nested_links: Vec<NavigationEntry>) -> Self {
        self.nested_links = nested_links;
        self
    }
}

/// Flatten a tree into its urls, depth-first in source order.
///
/// Entries without a url are skipped, but their children are still visited.
pub fn flatten_urls(entries: &[NavigationEntry]) -> Vec<&str> {
    fn visit<'a>(entries: &'a [NavigationEntry], urls: &mut Vec<&'a str>) {
        for entry in entries {
            if let Some(url) = entry.url.as_deref() {
                urls.push(url);
            }
            visit(&entry.nested_links, urls);
        }
    }

    let mut urls = Vec::new();
    visit(entries, &mut urls);
    urls
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_serialize_omits_empty_fields() {
        let entries = vec![
            NavigationEntry::new("/my/a.html", "A")
                .with_nested(vec![NavigationEntry::new("/my/b.html", "B")]),
            NavigationEntry::header("Reference"),
        ];

        let json = serde_json::to_value(&entries).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {
                    "url": "/my/a.html",
                    "text": "A",
                    "nested_links": [{"url": "/my/b.html", "text": "B"}]
                },
                {"text": "Reference"}
            ])
        );
    }

    #[test]
    fn test_flatten_urls_depth_first() {
        let entries = vec![
            NavigationEntry::new("/annie/dog.html", "Dog")
                .with_nested(vec![NavigationEntry::new("/annie/puppy.html", "Puppy")]),
            NavigationEntry::new("/sophie/pup.html", "Pup"),
            NavigationEntry::header("ignore me")
                .with_nested(vec![NavigationEntry::new("yuki/pooch.html", "Pooch")]),
        ];

        assert_eq!(
            flatten_urls(&entries),
            vec![
                "/annie/dog.html",
                "/annie/puppy.html",
                "/sophie/pup.html",
                "yuki/pooch.html"
            ]
        );
    }
}
