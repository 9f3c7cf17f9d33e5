//! A pragmatic HTML tokenizer.
//!
//! Turns a source string into an [`HtmlToken`] stream. This is the one piece
//! of the pipeline that is *not* part of the selection/extraction engine
//! proper (see the module docs on [`crate`]) — it exists so `scrape` has
//! something real to hand the annotator. It does not decode entities, sniff
//! encodings, or validate structure; malformed markup is handled further
//! down the pipeline, by the annotator and forest builder.

use std::borrow::Cow;

use cow_utils::CowUtils;
use winnow::ascii::multispace0;
use winnow::Parser;

use crate::token::{Attribute, HtmlToken};

/// Tags whose content the tokenizer must not scan for nested markup.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Void elements: the tokenizer never looks for (and never emits) a
/// matching `TagClose` for these, per spec.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Tokenize `source` into an ordered stream of [`HtmlToken`]s.
///
/// Empty text runs are suppressed; everything else (including comments) is
/// preserved in document order.
pub fn tokenize(source: &str) -> Vec<HtmlToken<'_>> {
    let mut tokens = Vec::new();
    let mut rest = source;
    let mut raw_text_tag: Option<String> = None;

    while !rest.is_empty() {
        if let Some(tag) = &raw_text_tag {
            let (text, closed, remainder) = split_raw_text(rest, tag);
            if !text.is_empty() {
                tokens.push(HtmlToken::Text { text: Cow::Borrowed(text) });
            }
            if closed {
                tokens.push(HtmlToken::TagClose { name: Cow::Borrowed(tag.as_str()) });
                raw_text_tag = None;
            }
            rest = remainder;
            continue;
        }

        if rest.starts_with("<!--") {
            let (comment, remainder) = scan_comment(rest);
            tokens.push(HtmlToken::Comment { comment: Cow::Borrowed(comment) });
            rest = remainder;
            continue;
        }

        if rest.starts_with("<!") || rest.starts_with("<?") {
            // Doctype / processing-instruction-like junk: skip to `>`.
            let end = rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
            rest = &rest[end..];
            continue;
        }

        if rest.starts_with("</") {
            if let Some((name, remainder)) = scan_close_tag(rest) {
                tokens.push(HtmlToken::TagClose { name: Cow::Borrowed(name) });
                rest = remainder;
                continue;
            }
            // Malformed `</` with no closing `>`: treat the rest as text.
            tokens.push(HtmlToken::Text { text: Cow::Borrowed(rest) });
            break;
        }

        if rest.starts_with('<') {
            if let Some((name, attributes, self_closing, remainder)) = scan_open_tag(rest) {
                let lower_name = name.cow_to_ascii_lowercase();
                let is_void = VOID_ELEMENTS.contains(&lower_name.as_ref());
                tokens.push(HtmlToken::TagOpen { name: Cow::Borrowed(name), attributes });
                if !self_closing && !is_void && RAW_TEXT_TAGS.contains(&lower_name.as_ref()) {
                    raw_text_tag = Some(lower_name.into_owned());
                }
                rest = remainder;
                continue;
            }
            // A bare `<` that doesn't open a tag: one character of text.
            let (head, tail) = rest.split_at(1);
            push_text(&mut tokens, head);
            rest = tail;
            continue;
        }

        let end = rest.find('<').unwrap_or(rest.len());
        let (text, remainder) = rest.split_at(end.max(1));
        push_text(&mut tokens, text);
        rest = remainder;
    }

    tokens
}

fn push_text<'a>(tokens: &mut Vec<HtmlToken<'a>>, text: &'a str) {
    if text.is_empty() {
        return;
    }
    if let Some(HtmlToken::Text { text: prev }) = tokens.last_mut() {
        // Merge adjacent text runs produced by the fallback single-char path.
        let mut merged = prev.to_string();
        merged.push_str(text);
        *prev = Cow::Owned(merged);
        return;
    }
    tokens.push(HtmlToken::Text { text: Cow::Borrowed(text) });
}

fn scan_comment(input: &str) -> (&str, &str) {
    debug_assert!(input.starts_with("<!--"));
    let body = &input[4..];
    match body.find("-->") {
        Some(idx) => (&body[..idx], &body[idx + 3..]),
        None => (body, ""),
    }
}

fn split_raw_text<'a>(input: &'a str, tag: &str) -> (&'a str, bool, &'a str) {
    let needle_lower = format!("</{}", tag);
    let mut search_from = 0;
    let lower_input = input.cow_to_ascii_lowercase();
    loop {
        match lower_input[search_from..].find(&needle_lower) {
            None => return (input, false, ""),
            Some(rel_idx) => {
                let idx = search_from + rel_idx;
                let after_name = idx + needle_lower.len();
                let close_tail = &input[after_name..];
                let trimmed = close_tail.trim_start();
                if let Some(gt) = trimmed.strip_prefix('>') {
                    let consumed = close_tail.len() - gt.len();
                    return (&input[..idx], true, &input[after_name + consumed..]);
                }
                // Not actually a matching close tag (e.g. `</scriptx>`); keep scanning.
                search_from = after_name;
            }
        }
    }
}

fn scan_close_tag(input: &str) -> Option<(&str, &str)> {
    debug_assert!(input.starts_with("</"));
    let after = &input[2..];
    let name_end = after
        .find(|c: char| c.is_whitespace() || c == '>')
        .unwrap_or(after.len());
    if name_end == 0 {
        return None;
    }
    let name = &after[..name_end];
    let gt = after[name_end..].find('>')?;
    Some((name, &after[name_end + gt + 1..]))
}

/// Returns `(name, attributes, self_closing, remainder)`.
fn scan_open_tag(input: &str) -> Option<(&str, Vec<Attribute<'_>>, bool, &str)> {
    debug_assert!(input.starts_with('<'));
    let after = &input[1..];
    let name_end = after
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(after.len());
    if name_end == 0 || !after.as_bytes()[0].is_ascii_alphabetic() {
        return None;
    }
    let name = &after[..name_end];
    let mut rest = &after[name_end..];
    let mut attributes = Vec::new();

    loop {
        let (_, r) = multispace0::<_, winnow::error::ContextError>
            .parse_peek(rest)
            .ok()?;
        rest = r;
        if let Some(tail) = rest.strip_prefix("/>") {
            return Some((name, attributes, true, tail));
        }
        if let Some(tail) = rest.strip_prefix('>') {
            return Some((name, attributes, false, tail));
        }
        if rest.is_empty() {
            return None;
        }
        let (attr, r) = scan_attribute(rest)?;
        attributes.push(attr);
        rest = r;
    }
}

fn scan_attribute(input: &str) -> Option<(Attribute<'_>, &str)> {
    let key_end = input
        .find(|c: char| c.is_whitespace() || c == '=' || c == '>' || c == '/')
        .unwrap_or(input.len());
    if key_end == 0 {
        return None;
    }
    let key = &input[..key_end];
    let mut rest = &input[key_end..];
    let (_, r) = multispace0::<_, winnow::error::ContextError>
        .parse_peek(rest)
        .ok()?;
    rest = r;

    if let Some(tail) = rest.strip_prefix('=') {
        let (_, r) = multispace0::<_, winnow::error::ContextError>
            .parse_peek(tail)
            .ok()?;
        let (value, r) = scan_attribute_value(r)?;
        return Some((Attribute::new(key, value), r));
    }

    Some((Attribute::new(key, ""), rest))
}

/// Parses a quoted (`"..."`/`'...'`) or bare attribute value.
fn scan_attribute_value(input: &str) -> Option<(&str, &str)> {
    if let Some(body) = input.strip_prefix('"') {
        let end = body.find('"')?;
        return Some((&body[..end], &body[end + 1..]));
    }
    if let Some(body) = input.strip_prefix('\'') {
        let end = body.find('\'')?;
        return Some((&body[..end], &body[end + 1..]));
    }
    let end = input
        .find(|c: char| c.is_whitespace() || c == '>')
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    Some((&input[..end], &input[end..]))
}
