//! Minimal HTML tag tokenizer.
//!
//! Parses a single raw tag such as `<a href="./x.html" class="subnav">` or
//! `</a>` as it appears inline in markdown. Runs in one linear pass over the
//! input with no backtracking.

/// A single parsed tag.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum HtmlTag {
    /// Opening (or self-closing) tag with its attributes in source order.
    Open {
        name: String,
        attrs: Vec<(String, String)>,
    },
    /// Closing tag.
    Close { name: String },
}

impl HtmlTag {
    /// Value of an attribute on an opening tag (first occurrence wins).
    pub(crate) fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Self::Open { attrs, .. } => attrs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str()),
            Self::Close { .. } => None,
        }
    }

    /// Whether this is an opening tag named `tag`.
    pub(crate) fn opens(&self, tag: &str) -> bool {
        matches!(self, Self::Open { name, .. } if name == tag)
    }

    /// Whether this is a closing tag named `tag`.
    pub(crate) fn closes(&self, tag: &str) -> bool {
        matches!(self, Self::Close { name } if name == tag)
    }
}

/// Parse one raw tag. Returns `None` for anything that is not a tag
/// (comments, declarations, stray text).
pub(crate) fn parse_tag(raw: &str) -> Option<HtmlTag> {
    let mut cursor = Cursor::new(raw.trim());
    cursor.expect('<')?;

    let closing = cursor.eat('/');
    let name = cursor.take_while(|c| c.is_ascii_alphanumeric() || c == '-');
    if name.is_empty() {
        return None;
    }
    let name = name.to_ascii_lowercase();

    if closing {
        return Some(HtmlTag::Close { name });
    }

    let mut attrs = Vec::new();
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            None | Some('>') => break,
            Some('/') => {
                cursor.bump();
            }
            Some(_) => {
                let key = cursor
                    .take_while(|c| !c.is_whitespace() && !matches!(c, '=' | '>' | '/'))
                    .to_ascii_lowercase();
                if key.is_empty() {
                    // Unparseable character
                    cursor.bump();
                    continue;
                }
                cursor.skip_whitespace();
                let value = if cursor.eat('=') {
                    cursor.skip_whitespace();
                    cursor.attr_value()
                } else {
                    String::new()
                };
                attrs.push((key, value));
            }
        }
    }

    Some(HtmlTag::Open { name, attrs })
}

/// Forward-only cursor over a tag's characters.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rest = &self.rest[c.len_utf8()..];
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Option<()> {
        self.eat(expected).then_some(())
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let end = self
            .rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.rest.len(), |(i, _)| i);
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        taken
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    /// Quoted or unquoted attribute value, with entities decoded.
    fn attr_value(&mut self) -> String {
        let raw = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let value = self.take_while(|c| c != quote);
                self.bump();
                value
            }
            _ => self.take_while(|c| !c.is_whitespace() && c != '>'),
        };
        crate::entities::decode_entities(raw)
    }
}
