//! Hierarchical forest construction: turning the flat, annotated token
//! stream into a tree that gracefully handles cross-closing malformed HTML.
//!
//! This is the second hard core (see the [`crate`] docs). Construction is a
//! two-step process, both named directly after the algorithm they
//! implement: [`build_raw_forest`] ("Step A") lays out a forest purely from
//! each token's own `close_offset`, then [`fix_forest`] ("Step B")
//! renormalizes it so no node's span exceeds its parent's.

use crate::tag_info::TagInfo;
use crate::token::HtmlToken;

/// A closed token range `[start, end]` (inclusive on both ends).
///
/// `start <= end` always holds. When an opening tag has no matching
/// closing tag, `end == start` — a degenerate, childless span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpan {
    pub start: usize,
    pub end: usize,
}

/// One node of a [`TagForest`]: a span plus its own child forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub value: TagSpan,
    pub forest: TagForest,
}

/// An ordered forest of [`Tree`]s, in document order.
///
/// After [`from_tag_info`] runs, every forest (at every nesting level)
/// satisfies: siblings are ordered by `.start` and non-overlapping
/// (`a.end < b.start` for consecutive siblings `a`, `b`), and every child
/// `c` of a node `p` satisfies `p.start < c.start && c.end <= p.end`.
pub type TagForest = Vec<Tree>;

/// Builds the tag forest for `tokens`/`infos` (aligned by index, as
/// produced by [`crate::tag_info::annotate_tags`]).
pub fn from_tag_info(tokens: &[HtmlToken], infos: &[TagInfo]) -> TagForest {
    fix_forest(build_raw_forest(tokens, infos))
}

/// Step A. Builds the forest implied by each token's own `close_offset`,
/// without regard to whether a child's span fits inside its nominal
/// parent's — that repair is [`fix_forest`]'s job.
///
/// Direct translation of spec §4.2's `forestWithin(start, end)`: a node's
/// own span is whatever its `close_offset` says, independent of the `end`
/// bound passed down to it — `end` only ever decides whether *another*
/// sibling gets a chance to start afterward, never how far the current
/// node's own span (or its descendants') may run. That's what lets a
/// crossing close (a child's own close index landing past its nominal
/// parent's) surface correctly here and get hoisted to a sibling by
/// [`fix_forest`] afterward, rather than silently losing the parent node —
/// see the `crossed_tags_lift_descendant_to_sibling` test below.
///
/// Siblings at one level are walked with a loop, not one recursive call
/// each, so a level with many thousands of siblings doesn't recurse
/// natively per sibling; only true nesting depth recurses (one call per
/// level, for a node's children).
fn build_raw_forest(tokens: &[HtmlToken], infos: &[TagInfo]) -> TagForest {
    forest_within(tokens, infos, 0, tokens.len())
}

fn forest_within(tokens: &[HtmlToken], infos: &[TagInfo], start: usize, end: usize) -> TagForest {
    let mut siblings = Vec::new();
    let mut pos = start;

    while pos < end {
        match &tokens[pos] {
            HtmlToken::Comment { .. } | HtmlToken::TagClose { .. } => {
                pos += 1;
            }
            _ => {
                let close_index = pos + infos[pos].close_offset.unwrap_or(0);
                let children = if close_index > pos {
                    forest_within(tokens, infos, pos + 1, close_index)
                } else {
                    // Degenerate span: a bare Text token, or a TagOpen with
                    // no matching close.
                    Vec::new()
                };
                siblings.push(Tree { value: TagSpan { start: pos, end: close_index }, forest: children });
                pos = close_index + 1;
            }
        }
    }

    siblings
}

/// Step B. Renormalizes a raw forest so that no child's span exceeds its
/// parent's, hoisting offenders up to become siblings of that parent
/// instead. This is what recovers a sane tree from crossed closing tags
/// such as `<a><b><c></c><a></b>` — `<c>` ends up a sibling of the outer
/// `<a>` rather than trapped as a child of the misclosed `<b>`.
///
/// The sibling dimension is an iterative right-to-left fold — arbitrarily
/// many siblings at one level never recurse natively — while the child
/// (true nesting) dimension recurses once per nesting level.
fn fix_forest(forest: TagForest) -> TagForest {
    let mut tail: TagForest = Vec::new();
    for tree in forest.into_iter().rev() {
        let Tree { value, forest: children } = tree;
        let fixed_children = fix_forest(children);

        let mut ok = Vec::with_capacity(fixed_children.len());
        let mut bad = Vec::new();
        for child in fixed_children {
            if child.value.end <= value.end {
                ok.push(child);
            } else {
                bad.push(child);
            }
        }

        let mut level = Vec::with_capacity(1 + bad.len() + tail.len());
        level.push(Tree { value, forest: ok });
        level.extend(bad);
        level.extend(tail);
        tail = level;
    }
    tail
}
