//! Tag annotation: matching opening and closing tags over a flat token
//! stream in one linear pass.
//!
//! This is the first of the four hard cores this crate implements (see the
//! [`crate`] docs). It never fails: unmatched tags simply carry no
//! `close_offset`.

use std::collections::HashMap;

use crate::token::HtmlToken;

/// Per-token annotation produced by [`annotate_tags`].
///
/// Aligned index-for-index with the token vector it was computed from —
/// `infos[i]` describes `tokens[i]`. Only `TagOpen` tokens that had a
/// same-name `TagClose` later in the stream carry a `close_offset`; every
/// other token (text, comments, bare/unmatched closers) carries `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagInfo {
    /// `close_index - open_index`, always strictly positive when present.
    pub close_offset: Option<usize>,
}

/// Matches opening and closing tags by name, tolerating malformed (crossed
/// or missing) closures.
///
/// Maintains one LIFO stack per lowercased tag name; a `TagClose` pops the
/// most recently opened same-name tag, however deeply other tags have been
/// opened in between. Entries still on a stack once the stream ends are
/// left unmatched. Tag names are matched case-insensitively (the stack key
/// is lowercased; the tokens themselves keep their original case).
pub fn annotate_tags(tokens: &[HtmlToken]) -> Vec<TagInfo> {
    let mut stacks: HashMap<String, Vec<usize>> = HashMap::new();
    let mut close_offset: Vec<Option<usize>> = vec![None; tokens.len()];

    for (i, token) in tokens.iter().enumerate() {
        match token {
            HtmlToken::TagOpen { name, .. } => {
                stacks.entry(name.to_ascii_lowercase()).or_default().push(i);
            }
            HtmlToken::TagClose { name } => {
                if let Some(stack) = stacks.get_mut(&name.to_ascii_lowercase()) {
                    if let Some(open_index) = stack.pop() {
                        close_offset[open_index] = Some(i - open_index);
                    }
                }
            }
            HtmlToken::Text { .. } | HtmlToken::Comment { .. } => {}
        }
    }

    close_offset.into_iter().map(|close_offset| TagInfo { close_offset }).collect()
}
