//! Subnav link extraction from markdown source documents.
//!
//! A document takes part in the subnav through its second-level headings:
//!
//! ```markdown
//! ## <a href="./install.html" class="subnav">Installing</a>
//! ```
//!
//! Heading structure comes from pulldown-cmark (so front matter, code blocks
//! and body paragraphs never produce links); the anchor itself is read with
//! the tag tokenizer in [`crate::tag`].

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::tag::{HtmlTag, parse_tag};

/// Class marking an anchor as a subnav target.
const SUBNAV_CLASS: &str = "subnav";

/// An anchor found in a second-level heading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubnavLink {
    /// Target as written in the document.
    pub href: String,
    /// Anchor text, trimmed.
    pub label: String,
    /// Whether the anchor carries the subnav marker.
    pub is_subnav_target: bool,
}

/// Anchor state while inside one heading.
#[derive(Default)]
struct HeadingAnchor {
    tag: Option<HtmlTag>,
    label: String,
    open: bool,
}

impl HeadingAnchor {
    fn into_link(self) -> Option<SubnavLink> {
        let tag = self.tag?;
        let href = tag.attr("href").unwrap_or_default().trim();
        // Quick-link anchors (`<a id="...">`) have no target
        if href.is_empty() {
            return None;
        }
        let is_subnav_target = tag
            .attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == SUBNAV_CLASS));
        Some(SubnavLink {
            href: href.to_owned(),
            label: self.label.trim().to_owned(),
            is_subnav_target,
        })
    }
}

/// Extract heading anchors with an `href`, in document order.
///
/// Only the first anchor of each level-2 heading is considered.
pub fn links_in(text: &str) -> Vec<SubnavLink> {
    let parser = Parser::new_ext(text, Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let mut links = Vec::new();
    let mut heading: Option<HeadingAnchor> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H2,
                ..
            }) => heading = Some(HeadingAnchor::default()),
            Event::End(TagEnd::Heading(HeadingLevel::H2)) => {
                if let Some(link) = heading.take().and_then(HeadingAnchor::into_link) {
                    links.push(link);
                }
            }
            Event::InlineHtml(raw) | Event::Html(raw) => {
                let Some(anchor) = heading.as_mut() else {
                    continue;
                };
                match parse_tag(&raw) {
                    Some(tag) if tag.opens("a") && anchor.tag.is_none() => {
                        anchor.tag = Some(tag);
                        anchor.open = true;
                    }
                    Some(tag) if tag.closes("a") => anchor.open = false,
                    _ => {}
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(anchor) = heading.as_mut()
                    && anchor.open
                {
                    anchor.label.push_str(&text);
                }
            }
            _ => {}
        }
    }

    links
}

/// Extract only the anchors that are subnav targets, in document order.
pub fn subnav_links_in(text: &str) -> Vec<SubnavLink> {
    links_in(text)
        .into_iter()
        .filter(|link| link.is_subnav_target)
        .collect()
}
