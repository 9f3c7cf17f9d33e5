//! Zipper-based ordered sibling navigation: the fourth hard core (see the
//! [`crate`] docs) — a cooperative combinator set over a focused sequence
//! of sibling [`TagSpec`]s, with step/seek/until primitives.
//!
//! Per spec.md §9's redesign guidance, a "SerialScraper" here is not a
//! named trait — it's any `FnMut(&mut SpecZipper) -> Option<T>`. State is
//! threaded by `&mut` rather than by returning a new zipper each call,
//! which is the more idiomatic of the two options spec.md §9 allows.

use std::rc::Rc;

use crate::forest::Tree;
use crate::spec::{Context, TagSpec};
use crate::token::HtmlToken;

/// A focused sequence of `Option<TagSpec>`, padded with a sentinel `None`
/// at both ends.
///
/// The padding is what lets [`step_next`]/[`step_back`] ever reach the
/// first or last real element: the initial focus sits on the left
/// sentinel, and only a successful move lands on the first real spec.
/// Reading a focus that is `None` always fails the scraper at that
/// position, but *moving past* one is how `seek`/`repeat` cross it to
/// keep going.
#[derive(Debug, Clone)]
pub struct SpecZipper<'doc> {
    /// Elements to the left of the focus, nearest-first from the end:
    /// `lefts.last()` is the immediate left neighbor.
    lefts: Vec<Option<TagSpec<'doc>>>,
    focus: Option<TagSpec<'doc>>,
    /// Elements to the right of the focus, nearest-first from the end:
    /// `rights.last()` is the immediate right neighbor.
    rights: Vec<Option<TagSpec<'doc>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Back,
}

impl<'doc> SpecZipper<'doc> {
    /// Builds a zipper over `roots`, one sub-spec per root tree (each
    /// seeing one root and the shared token vector), padded with `None` on
    /// both ends. The initial focus is the leftmost sentinel.
    pub fn from_roots(roots: &[Tree], tags: Rc<Vec<HtmlToken<'doc>>>, context: Context) -> Self {
        let specs = roots.iter().map(|t| TagSpec { context, hierarchy: vec![t.clone()], tags: Rc::clone(&tags) });
        Self::padded(specs)
    }

    fn padded(specs: impl Iterator<Item = TagSpec<'doc>>) -> Self {
        // Natural left-to-right order is [spec_1, .., spec_n, None]; the
        // `rights` stack is stored nearest-first, so reverse it.
        let mut rights: Vec<Option<TagSpec<'doc>>> = specs.map(Some).collect();
        rights.push(None);
        rights.reverse();
        SpecZipper { lefts: Vec::new(), focus: None, rights }
    }

    /// The spec under focus, if any (`None` on a sentinel).
    pub fn focus(&self) -> Option<&TagSpec<'doc>> {
        self.focus.as_ref()
    }

    fn apply(&mut self, dir: Direction) -> bool {
        match dir {
            Direction::Next => match self.rights.pop() {
                Some(next) => {
                    let old = std::mem::replace(&mut self.focus, next);
                    self.lefts.push(old);
                    true
                }
                None => false,
            },
            Direction::Back => match self.lefts.pop() {
                Some(prev) => {
                    let old = std::mem::replace(&mut self.focus, prev);
                    self.rights.push(old);
                    true
                }
                None => false,
            },
        }
    }
}

/// Moves one step, runs `scraper` on the new focus, and commits the move
/// only if the focus was real (`Some`) and `scraper` succeeded. On any
/// failure (movement ran off the end, landed on a sentinel, or `scraper`
/// returned `None`) the zipper is left exactly as it was.
fn step_with<'doc, T>(
    zipper: &mut SpecZipper<'doc>,
    dir: Direction,
    scraper: impl FnOnce(&TagSpec<'doc>) -> Option<T>,
) -> Option<T> {
    let snapshot = zipper.clone();
    if !zipper.apply(dir) {
        return None;
    }
    match zipper.focus() {
        Some(spec) => match scraper(spec) {
            Some(value) => Some(value),
            None => {
                *zipper = snapshot;
                None
            }
        },
        None => {
            *zipper = snapshot;
            None
        }
    }
}

/// Steps forward once, running `scraper` on the next spec.
pub fn step_next<'doc, T>(
    zipper: &mut SpecZipper<'doc>,
    scraper: impl FnOnce(&TagSpec<'doc>) -> Option<T>,
) -> Option<T> {
    step_with(zipper, Direction::Next, scraper)
}

/// Steps backward once, running `scraper` on the previous spec.
pub fn step_back<'doc, T>(
    zipper: &mut SpecZipper<'doc>,
    scraper: impl FnOnce(&TagSpec<'doc>) -> Option<T>,
) -> Option<T> {
    step_with(zipper, Direction::Back, scraper)
}

/// Moves in `dir` one step at a time — including across sentinel `None`
/// positions — running `scraper` at each stop, stopping and committing
/// the zipper at the first success. Fails the whole operation, without
/// rolling back any movement already made, the moment `dir` runs out of
/// positions to try.
fn seek_with<'doc, T>(
    zipper: &mut SpecZipper<'doc>,
    dir: Direction,
    scraper: impl Fn(&TagSpec<'doc>) -> Option<T>,
) -> Option<T> {
    loop {
        if !zipper.apply(dir) {
            return None;
        }
        if let Some(spec) = zipper.focus() {
            if let Some(value) = scraper(spec) {
                return Some(value);
            }
        }
    }
}

/// Seeks forward until `scraper` succeeds.
pub fn seek_next<'doc, T>(
    zipper: &mut SpecZipper<'doc>,
    scraper: impl Fn(&TagSpec<'doc>) -> Option<T>,
) -> Option<T> {
    seek_with(zipper, Direction::Next, scraper)
}

/// Seeks backward until `scraper` succeeds.
pub fn seek_back<'doc, T>(
    zipper: &mut SpecZipper<'doc>,
    scraper: impl Fn(&TagSpec<'doc>) -> Option<T>,
) -> Option<T> {
    seek_with(zipper, Direction::Back, scraper)
}

/// Moves in `dir` collecting every real spec it passes over, stopping
/// (without consuming) the first spec `until` succeeds on — or, failing
/// to ever find one, everything up to the end of the zipper. Runs `inner`
/// on a freshly padded sub-zipper over exactly the collected specs, in
/// document order, then leaves the outer zipper parked just before the
/// boundary (so a following `seek` can still find it).
fn until_with<'doc, T>(
    zipper: &mut SpecZipper<'doc>,
    dir: Direction,
    until: impl Fn(&TagSpec<'doc>) -> Option<()>,
    inner: impl FnOnce(&mut SpecZipper<'doc>) -> Option<T>,
) -> Option<T> {
    let mut collected: Vec<TagSpec<'doc>> = Vec::new();
    loop {
        let before = zipper.clone();
        if !zipper.apply(dir) {
            break;
        }
        match zipper.focus() {
            Some(spec) if until(spec).is_some() => {
                *zipper = before;
                break;
            }
            Some(spec) => collected.push(spec.clone()),
            None => {}
        }
    }
    if dir == Direction::Back {
        collected.reverse();
    }
    let mut sub = SpecZipper::padded(collected.into_iter());
    inner(&mut sub)
}

/// Bounds `inner` to the run of specs between the current position and
/// the next one `until` matches (exclusive), moving forward.
pub fn until_next<'doc, T>(
    zipper: &mut SpecZipper<'doc>,
    until: impl Fn(&TagSpec<'doc>) -> Option<()>,
    inner: impl FnOnce(&mut SpecZipper<'doc>) -> Option<T>,
) -> Option<T> {
    until_with(zipper, Direction::Next, until, inner)
}

/// Bounds `inner` to the run of specs between the current position and
/// the previous one `until` matches (exclusive), moving backward.
pub fn until_back<'doc, T>(
    zipper: &mut SpecZipper<'doc>,
    until: impl Fn(&TagSpec<'doc>) -> Option<()>,
    inner: impl FnOnce(&mut SpecZipper<'doc>) -> Option<T>,
) -> Option<T> {
    until_with(zipper, Direction::Back, until, inner)
}

/// Runs `scraper` repeatedly, collecting successes, stopping (without
/// failing) at the first `None`. Zero matches is success: `vec![]`.
pub fn repeat<'doc, T>(
    zipper: &mut SpecZipper<'doc>,
    mut scraper: impl FnMut(&mut SpecZipper<'doc>) -> Option<T>,
) -> Vec<T> {
    let mut out = Vec::new();
    while let Some(value) = scraper(zipper) {
        out.push(value);
    }
    out
}

/// Like [`repeat`], but fails the whole thing if `scraper` doesn't
/// succeed at least once.
pub fn repeat1<'doc, T>(
    zipper: &mut SpecZipper<'doc>,
    mut scraper: impl FnMut(&mut SpecZipper<'doc>) -> Option<T>,
) -> Option<Vec<T>> {
    let first = scraper(zipper)?;
    let mut out = vec![first];
    out.extend(repeat(zipper, scraper));
    Some(out)
}

/// Converts a `SerialScraper` into a regular `Scraper` by building the
/// zipper it runs over: the children of `spec`'s root node when `spec` has
/// been narrowed into a chroot, otherwise `spec`'s own top-level siblings.
pub fn in_serial<'doc, T>(
    spec: &TagSpec<'doc>,
    mut serial: impl FnMut(&mut SpecZipper<'doc>) -> Option<T>,
) -> Option<T> {
    let roots: &[Tree] = if spec.context.in_chroot {
        spec.hierarchy.first().map(|t| t.forest.as_slice()).unwrap_or(&[])
    } else {
        spec.hierarchy.as_slice()
    };
    let mut zipper = SpecZipper::from_roots(roots, Rc::clone(&spec.tags), spec.context);
    serial(&mut zipper)
}
