//! Selector algebra and the `select` matcher: the third hard core (see the
//! [`crate`] docs) — a recursive DFS that satisfies a chain of selectors
//! against a [`TagForest`], with depth constraints, sibling lifting across
//! malformed boundaries, and tri-state match pruning.

use std::rc::Rc;

use crate::forest::{TagForest, TagSpan, Tree};
use crate::predicate::AttributePredicate;
use crate::spec::{Context, TagSpec};
use crate::token::HtmlToken;

/// What a single [`Selection`] looks for at a candidate node.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// A `TagOpen` with this name (case-insensitive) whose attributes
    /// satisfy every predicate.
    SelectOne { tag: String, predicates: Vec<AttributePredicate> },
    /// A `TagOpen` satisfying every predicate, or — only when there are no
    /// predicates — a `Text` node.
    SelectAny { predicates: Vec<AttributePredicate> },
    /// A `Text` node.
    SelectText,
}

/// Per-selection settings. Currently just the depth constraint.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    /// When set, this selection must occur at exactly this many ancestor
    /// levels below the previous match (or the document root, for the
    /// first selection tried).
    pub depth: Option<usize>,
}

/// One step of a [`Selector`] chain: a strategy plus its settings.
#[derive(Debug, Clone)]
pub struct Selection {
    pub strategy: Strategy,
    pub settings: Settings,
}

/// An ordered chain of [`Selection`]s, **innermost-first**: `nested(a, b)`
/// produces `[b's selections..., a's selections...]`, so the *last*
/// element is always the outermost selection and the first tested against
/// the document root.
#[derive(Debug, Clone, Default)]
pub struct Selector(pub Vec<Selection>);

impl Selector {
    fn single(strategy: Strategy) -> Selector {
        Selector(vec![Selection { strategy, settings: Settings::default() }])
    }
}

/// Selects `<name>` tags with no attribute constraints.
pub fn tag(name: impl Into<String>) -> Selector {
    Selector::single(Strategy::SelectOne { tag: name.into(), predicates: Vec::new() })
}

/// Selects `<name>` tags whose attributes satisfy every predicate.
pub fn with_attributes(name: impl Into<String>, predicates: Vec<AttributePredicate>) -> Selector {
    Selector::single(Strategy::SelectOne { tag: name.into(), predicates })
}

/// Selects any tag (with no attribute constraints) or text node.
pub fn any() -> Selector {
    Selector::single(Strategy::SelectAny { predicates: Vec::new() })
}

/// Selects any tag whose attributes satisfy every predicate.
pub fn any_with_attributes(predicates: Vec<AttributePredicate>) -> Selector {
    Selector::single(Strategy::SelectAny { predicates })
}

/// Selects text nodes.
pub fn text() -> Selector {
    Selector::single(Strategy::SelectText)
}

/// Concatenates `parent` and `child` so that matching `child` only counts
/// when it occurs inside a match of `parent`. `child` comes first in
/// storage order (innermost-first), `parent` last.
pub fn nested(parent: Selector, child: Selector) -> Selector {
    let mut selections = child.0;
    selections.extend(parent.0);
    Selector(selections)
}

/// Overrides the depth setting of `sel`'s outermost (last) selection.
pub fn at_depth(mut sel: Selector, depth: usize) -> Selector {
    if let Some(last) = sel.0.last_mut() {
        last.settings.depth = Some(depth);
    }
    sel
}

/// Tri-state verdict for a single node/selection test.
///
/// `Cull` terminates the subtree search outright (the node and every
/// descendant can never satisfy); `Fail` only rejects the current node.
/// Combining two results: any `Cull` wins; two `Ok`s combine to `Ok`;
/// anything else is `Fail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Ok,
    Fail,
    Cull,
}

impl MatchResult {
    pub fn combine(self, other: MatchResult) -> MatchResult {
        use MatchResult::*;
        match (self, other) {
            (Cull, _) | (_, Cull) => Cull,
            (Ok, Ok) => Ok,
            _ => Fail,
        }
    }

    fn from_bool(b: bool) -> MatchResult {
        if b { MatchResult::Ok } else { MatchResult::Fail }
    }
}

/// Walks `spec.hierarchy` against `selector`'s innermost-first chain,
/// returning one freshly-numbered [`TagSpec`] per match, in the order the
/// recursive descent discovers them (document order, depth-first).
pub fn select<'doc>(spec: &TagSpec<'doc>, selector: &Selector) -> Vec<TagSpec<'doc>> {
    let mut matches: Vec<Tree> = Vec::new();
    if !selector.0.is_empty() {
        select_nodes(&spec.hierarchy, &spec.hierarchy, &selector.0, spec.tags.as_ref(), &mut matches);
    }
    matches
        .into_iter()
        .enumerate()
        .map(|(i, tree)| TagSpec {
            context: Context { position: i, in_chroot: true },
            hierarchy: vec![tree],
            tags: Rc::clone(&spec.tags),
        })
        .collect()
}

/// The recursive descent from spec.md §4.3. `selector` is consumed from
/// the back: `selector.last()` is the selection tested against the
/// current level, `selector[..len-1]` is what remains for the next level
/// down (matching the innermost-first storage order).
fn select_nodes<'t>(
    forest: &'t [Tree],
    root: &'t [Tree],
    selector: &[Selection],
    tokens: &[HtmlToken],
    out: &mut Vec<Tree>,
) {
    let Some((f, fs)) = forest.split_first() else { return };
    let (n, ns) = selector.split_last().expect("selector is never empty here");

    let result = node_matches(f, root, n, tokens);

    if ns.is_empty() {
        match result {
            MatchResult::Ok => {
                select_nodes(&f.forest, root, selector, tokens, out);
                select_nodes(fs, root, selector, tokens, out);
                out.push(f.clone());
            }
            MatchResult::Fail => {
                select_nodes(&f.forest, root, selector, tokens, out);
                select_nodes(fs, root, selector, tokens, out);
            }
            MatchResult::Cull => {
                select_nodes(fs, root, selector, tokens, out);
            }
        }
        return;
    }

    match result {
        MatchResult::Ok => {
            select_nodes(fs, root, selector, tokens, out);
            let siblings = lift_siblings(fs, f.value);
            let mut combined = f.forest.clone();
            combined.extend(siblings.iter().cloned());
            let mut new_root = siblings;
            new_root.push(f.clone());
            select_nodes(&combined, &new_root, ns, tokens, out);
        }
        MatchResult::Fail => {
            select_nodes(&f.forest, root, selector, tokens, out);
            select_nodes(fs, root, selector, tokens, out);
        }
        MatchResult::Cull => {
            select_nodes(fs, root, selector, tokens, out);
        }
    }
}

/// Hoists sibling subtrees that *started* strictly inside `(start, end)`
/// so they can be considered alongside `f`'s own children — the
/// malformed-HTML recovery spec.md §4.3 calls "lifting".
///
/// Only a sibling's *start* is checked against the bound, not its end: a
/// lifted sibling's span routinely extends past `end` — that's exactly
/// why `fix_forest` hoisted it out to sibling position in the first
/// place (spec.md §8 scenario 3: in `<a><b><c><d>2</d></b></c></a>`,
/// `<c>` surfaces as `<b>`'s sibling with a span that outlives `<b>`'s,
/// and `nested(tag("b"), tag("d"))` only finds `<d>` by lifting `<c>`
/// back into `<b>`'s search scope despite that). Only the immediate
/// siblings are inspected: `fix_forest` already guarantees a crossing
/// node surfaces as a direct sibling of whatever node it escapes, never
/// buried deeper.
fn lift_siblings(fs: &[Tree], bounds: TagSpan) -> TagForest {
    fs.iter()
        .filter(|t| t.value.start > bounds.start && t.value.start < bounds.end)
        .cloned()
        .collect()
}

fn node_matches(tree: &Tree, root: &[Tree], selection: &Selection, tokens: &[HtmlToken]) -> MatchResult {
    let settings_result = check_settings(&selection.settings, tree.value, root);
    let strategy_result = check_strategy(&selection.strategy, &tokens[tree.value.start]);
    settings_result.combine(strategy_result)
}

fn check_settings(settings: &Settings, span: TagSpan, root: &[Tree]) -> MatchResult {
    match settings.depth {
        None => MatchResult::Ok,
        Some(required) => {
            let current = count_ancestors(root, span);
            if current < required {
                MatchResult::Fail
            } else if current > required {
                MatchResult::Cull
            } else {
                MatchResult::Ok
            }
        }
    }
}

/// Counts true ancestors of `span` within `root`'s full recursive
/// structure: `root` need not be a flat sibling list cut at the document
/// top — it's whatever forest the previous successful match reset
/// ancestor-counting to (see `select_nodes`'s non-terminal `MatchOk` arm).
fn count_ancestors(root: &[Tree], span: TagSpan) -> usize {
    for t in root {
        if t.value.start < span.start && span.end < t.value.end {
            return 1 + count_ancestors(&t.forest, span);
        }
    }
    0
}

fn check_strategy(strategy: &Strategy, token: &HtmlToken) -> MatchResult {
    let ok = match strategy {
        Strategy::SelectOne { tag, predicates } => match token {
            HtmlToken::TagOpen { name, attributes } => {
                name.eq_ignore_ascii_case(tag) && predicates.iter().all(|p| p.test(attributes))
            }
            _ => false,
        },
        Strategy::SelectAny { predicates } => match token {
            HtmlToken::TagOpen { attributes, .. } => predicates.iter().all(|p| p.test(attributes)),
            HtmlToken::Text { .. } => predicates.is_empty(),
            _ => false,
        },
        Strategy::SelectText => token.is_text(),
    };
    MatchResult::from_bool(ok)
}
