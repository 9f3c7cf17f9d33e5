//! In-memory representation of lexed HTML events.
//!
//! This is the boundary the tokenizer produces and everything downstream
//! (annotation, forest construction, selection) consumes. Tokens borrow from
//! the source document wherever possible; owning variants exist only where a
//! caller builds tokens synthetically (tests, demos).

use std::borrow::Cow;

/// A single `key="value"` pair on a `TagOpen` token.
///
/// Keys are compared case-insensitively, values case-sensitively, per the
/// matching rules every predicate and selector in this crate follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub key: Cow<'a, str>,
    pub value: Cow<'a, str>,
}

impl<'a> Attribute<'a> {
    pub fn new(key: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) -> Self {
        Attribute { key: key.into(), value: value.into() }
    }

    pub fn key_eq_ignore_ascii_case(&self, other: &str) -> bool {
        self.key.eq_ignore_ascii_case(other)
    }

    pub fn into_owned(self) -> Attribute<'static> {
        Attribute {
            key: Cow::Owned(self.key.into_owned()),
            value: Cow::Owned(self.value.into_owned()),
        }
    }
}

/// One lexed HTML event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlToken<'a> {
    TagOpen {
        name: Cow<'a, str>,
        attributes: Vec<Attribute<'a>>,
    },
    TagClose {
        name: Cow<'a, str>,
    },
    Text {
        text: Cow<'a, str>,
    },
    Comment {
        comment: Cow<'a, str>,
    },
}

impl<'a> HtmlToken<'a> {
    /// The tag name, for `TagOpen`/`TagClose` tokens.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            HtmlToken::TagOpen { name, .. } | HtmlToken::TagClose { name, .. } => Some(name),
            HtmlToken::Text { .. } | HtmlToken::Comment { .. } => None,
        }
    }

    pub fn is_tag_open(&self) -> bool {
        matches!(self, HtmlToken::TagOpen { .. })
    }

    pub fn is_tag_close(&self) -> bool {
        matches!(self, HtmlToken::TagClose { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, HtmlToken::Text { .. })
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, HtmlToken::Comment { .. })
    }

    pub fn attributes(&self) -> &[Attribute<'a>] {
        match self {
            HtmlToken::TagOpen { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Render this single token back to HTML, per the serialization table.
    pub fn render_into(&self, out: &mut String) {
        match self {
            HtmlToken::TagOpen { name, attributes } => {
                out.push('<');
                out.push_str(name);
                for attr in attributes {
                    out.push(' ');
                    out.push_str(&attr.key);
                    out.push_str("=\"");
                    out.push_str(&attr.value);
                    out.push('"');
                }
                out.push('>');
            }
            HtmlToken::TagClose { name } => {
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
            HtmlToken::Text { text } => out.push_str(text),
            HtmlToken::Comment { comment } => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
        }
    }
}
