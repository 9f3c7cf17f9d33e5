//! The working document view that selection and extraction operate over.

use std::rc::Rc;

use crate::forest::TagForest;
use crate::token::HtmlToken;

/// Where a [`TagSpec`] sits relative to the document it was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// 0-based ordinal assigned by [`crate::scraper::chroots`] when it
    /// narrows to one of several matches; `0` otherwise.
    pub position: usize,
    /// `true` once the spec has been narrowed by `select`/`chroot`.
    pub in_chroot: bool,
}

impl Default for Context {
    fn default() -> Self {
        Context { position: 0, in_chroot: false }
    }
}

/// A view over a parsed document: a context, a forest, and the token
/// vector the forest's spans index into.
///
/// `tags` is shared (an [`Rc`]) and never mutated once built: narrowing a
/// spec (via `select` or `chroot`) only ever replaces `context` and
/// `hierarchy`, cloning the `Rc` pointer rather than copying token data.
/// This crate indexes the shared token vector with absolute positions
/// throughout rather than literally reslicing it per match — see
/// `DESIGN.md` for why that's an equivalent, cheaper reading of spec.md's
/// "substitute a sliced view into tags".
#[derive(Debug, Clone)]
pub struct TagSpec<'doc> {
    pub context: Context,
    pub hierarchy: TagForest,
    pub tags: Rc<Vec<HtmlToken<'doc>>>,
}

impl<'doc> TagSpec<'doc> {
    /// The root `TagSpec` for a freshly built document: no narrowing has
    /// happened yet.
    pub fn root(hierarchy: TagForest, tags: Rc<Vec<HtmlToken<'doc>>>) -> Self {
        TagSpec { context: Context::default(), hierarchy, tags }
    }

    /// Token slice covering `[start, end]` inclusive — the region a single
    /// matched node (or this spec's whole view, when it wraps one node)
    /// owns.
    pub fn token_range(&self, start: usize, end: usize) -> &[HtmlToken<'doc>] {
        &self.tags[start..=end]
    }
}
