//! Subnav discovery from a rendered HTML table of contents.
//!
//! Some sections are preprocessed into HTML before the book is bound. Their
//! `index.html` carries the table of contents as nested lists:
//!
//! ```html
//! <ul>
//!   <li><a href="intro.html">Intro</a>
//!     <ul><li><a href="intro/setup.html">Setup</a></li></ul>
//!   </li>
//! </ul>
//! ```
//!
//! The first `<ul>` in the document is taken as the tree. Relative hrefs are
//! rebased onto the section's desired directory; absolute `http(s)` links
//! are kept verbatim. Nothing is resolved against the filesystem.

use std::path::PathBuf;
use std::sync::Arc;

use bw_config::OutputLocations;
use bw_storage::Storage;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::decode_entity;
use crate::entry::NavigationEntry;
use crate::error::SubnavError;
use crate::path::is_external;

/// Elements that never have content or a closing tag in HTML.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// File holding a section's rendered table of contents.
const TOC_FILE: &str = "index.html";

/// Reads subnav trees from preprocessed HTML.
pub struct HtmlTocReader {
    storage: Arc<dyn Storage>,
}

impl HtmlTocReader {
    /// Create a reader over `storage`.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Location of the rendered table of contents for `desired_dir`.
    #[must_use]
    pub fn toc_path(desired_dir: &str, locations: &OutputLocations) -> PathBuf {
        locations
            .html_from_preprocessing_dir()
            .join(desired_dir.trim_matches('/'))
            .join(TOC_FILE)
    }

    /// Whether a rendered table of contents exists for `desired_dir`.
    #[must_use]
    pub fn has_toc(&self, desired_dir: &str, locations: &OutputLocations) -> bool {
        self.storage.exists(&Self::toc_path(desired_dir, locations))
    }

    /// Read and parse the table of contents for `desired_dir`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read, or an HTML error
    /// if it cannot be tokenized.
    pub fn read(
        &self,
        desired_dir: &str,
        locations: &OutputLocations,
    ) -> Result<Vec<NavigationEntry>, SubnavError> {
        let path = Self::toc_path(desired_dir, locations);
        tracing::debug!(path = %path.display(), "Reading rendered table of contents");
        let html = self.storage.read(&path)?;
        links_in(&html, desired_dir)
    }
}

/// Extract the navigation tree from rendered HTML.
///
/// # Errors
///
/// Returns [`SubnavError::Html`] if the markup cannot be tokenized.
pub fn links_in(html: &str, desired_dir: &str) -> Result<Vec<NavigationEntry>, SubnavError> {
    let document = parse_document(html)?;
    let desired_dir = desired_dir.trim_matches('/');
    Ok(document
        .find_first("ul")
        .map(|ul| entries_from_list(ul, desired_dir))
        .unwrap_or_default())
}

#[derive(Debug, Default)]
struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    fn new(tag: String, attrs: Vec<(String, String)>) -> Self {
        Self {
            tag,
            attrs,
            children: Vec::new(),
        }
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First descendant named `tag`, depth-first.
    fn find_first(&self, tag: &str) -> Option<&Element> {
        self.elements()
            .find_map(|child| (child.tag == tag).then_some(child).or_else(|| child.find_first(tag)))
    }

    /// Like [`Self::find_first`], without descending into nested lists.
    fn find_outside_lists(&self, tag: &str) -> Option<&Element> {
        self.elements().find_map(|child| {
            if child.tag == tag {
                Some(child)
            } else if child.tag == "ul" || child.tag == "ol" {
                None
            } else {
                child.find_outside_lists(tag)
            }
        })
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_owned()));
        }
    }

    /// Text content with runs of whitespace collapsed, skipping nested lists.
    fn label(&self) -> String {
        fn collect(element: &Element, out: &mut String) {
            for node in &element.children {
                match node {
                    Node::Text(text) => out.push_str(text),
                    Node::Element(child) if child.tag != "ul" && child.tag != "ol" => {
                        collect(child, out);
                    }
                    Node::Element(_) => {}
                }
            }
        }

        let mut raw = String::new();
        collect(self, &mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

fn entries_from_list(list: &Element, desired_dir: &str) -> Vec<NavigationEntry> {
    let mut entries = Vec::new();
    for item in list.elements().filter(|e| e.tag == "li") {
        let nested = item
            .find_outside_lists("ul")
            .map(|ul| entries_from_list(ul, desired_dir))
            .unwrap_or_default();

        let entry = match item.find_outside_lists("a") {
            Some(anchor) => NavigationEntry {
                url: anchor.attr("href").map(|href| rebase(href, desired_dir)),
                text: anchor.label(),
                nested_links: nested,
            },
            // Category headings are list items with only text and a sublist
            None if !nested.is_empty() => NavigationEntry::header(item.label()).with_nested(nested),
            None => continue,
        };
        entries.push(entry);
    }
    entries
}

fn rebase(href: &str, desired_dir: &str) -> String {
    if is_external(href) || href.starts_with('/') {
        return href.to_owned();
    }
    let href = href.trim_start_matches("./");
    if desired_dir.is_empty() {
        format!("/{href}")
    } else {
        format!("/{desired_dir}/{href}")
    }
}

/// Parse HTML leniently into an element tree rooted at a synthetic element.
fn parse_document(html: &str) -> Result<Element, SubnavError> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.allow_dangling_amp = true;

    let mut buf = Vec::new();
    let mut stack = vec![Element::default()];

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let element = start_element(&e);
                if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    append_child(&mut stack, element);
                } else {
                    if element.tag == "li" {
                        close_open_item(&mut stack);
                    }
                    stack.push(element);
                }
            }
            Event::Empty(e) => append_child(&mut stack, start_element(&e)),
            Event::End(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                close_element(&mut stack, &tag);
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&String::from_utf8_lossy(&e));
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&String::from_utf8_lossy(&e));
                }
            }
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(&e);
                let text = decode_entity(&entity).map_or_else(|| format!("&{entity};"), String::from);
                if let Some(current) = stack.last_mut() {
                    current.push_text(&text);
                }
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }

    // Close whatever the document left open
    while stack.len() > 1 {
        pop_into_parent(&mut stack);
    }
    Ok(stack.pop().unwrap_or_default())
}

fn start_element(e: &BytesStart<'_>) -> Element {
    let tag = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
    let attrs = e
        .html_attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
            let value = attr.unescape_value().map_or_else(
                |_| crate::entities::decode_entities(&String::from_utf8_lossy(&attr.value)),
                std::borrow::Cow::into_owned,
            );
            (key, value)
        })
        .collect();
    Element::new(tag, attrs)
}

fn append_child(stack: &mut [Element], element: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
    }
}

fn pop_into_parent(stack: &mut Vec<Element>) {
    if let Some(element) = stack.pop() {
        append_child(stack, element);
    }
}

/// Close the innermost open element named `tag`; stray end tags are ignored.
fn close_element(stack: &mut Vec<Element>, tag: &str) {
    let Some(index) = stack.iter().skip(1).rposition(|e| e.tag == tag) else {
        return;
    };
    // `index` counts from the element after the synthetic root
    while stack.len() > index + 1 {
        pop_into_parent(stack);
    }
}

/// A new `<li>` implicitly closes an open `<li>` of the same list.
fn close_open_item(stack: &mut Vec<Element>) {
    let list = stack
        .iter()
        .rposition(|e| e.tag == "ul" || e.tag == "ol")
        .unwrap_or(0);
    if let Some(item) = stack.iter().skip(list).rposition(|e| e.tag == "li") {
        let depth = list + item;
        while stack.len() > depth {
            pop_into_parent(stack);
        }
    }
}
