//! # htmlcomb
//!
//! A zero-copy HTML selection and extraction combinator library.
//!
//! Given an HTML source string, this crate tokenizes it, annotates matching
//! opening/closing tags over the (possibly malformed) token stream, builds
//! an indexed hierarchical forest out of that annotation, and exposes two
//! composable query surfaces over the result:
//!
//! - [`scraper`] functions: hierarchical queries over the DOM (`text`,
//!   `attr`, `html`, `chroot`, `chroots`, ...).
//! - [`serial`] functions: ordered, zipper-based navigation across a
//!   sequence of siblings (`step_next`, `seek_next`, `until_next`,
//!   `repeat`, ...).
//!
//! Both are plain `Fn`/`FnMut` closures over a [`TagSpec`] or
//! [`serial::SpecZipper`] — there is no combinator trait to implement, per
//! this crate's design notes (see `DESIGN.md`): compose them the way you'd
//! compose any other Rust function, with `?`, `Option::map`, `and_then`,
//! closures.
//!
//! ## Quick start
//!
//! ```rust
//! use htmlcomb::{scrape, selector::tag, scraper::texts};
//!
//! let html = "<a>1</a><a>2</a><a>3</a>";
//! let result = scrape(html, |spec| texts(spec, &tag("a")));
//! assert_eq!(result, Some(vec!["1".into(), "2".into(), "3".into()]));
//! ```
//!
//! Nested selection and malformed-HTML tolerance:
//!
//! ```rust
//! use htmlcomb::{scrape, selector::{nested, tag}, scraper::texts};
//!
//! // The closing tags of `<b>`/`<c>` are crossed; the forest builder
//! // still recovers `<d>` as reachable from `<b>`.
//! let html = "<a><b><c><d>2</d></b></c></a>";
//! let result = scrape(html, |spec| texts(spec, &nested(tag("b"), tag("d"))));
//! assert_eq!(result, Some(vec!["2".into()]));
//! ```

pub mod forest;
pub mod predicate;
pub mod scraper;
pub mod selector;
pub mod serial;
pub mod spec;
pub mod tag_info;
pub mod token;
pub mod tokenizer;

pub use forest::{from_tag_info, TagForest, TagSpan, Tree};
pub use predicate::AttributePredicate;
pub use selector::{MatchResult, Selector};
pub use serial::SpecZipper;
pub use spec::{Context, TagSpec};
pub use tag_info::{annotate_tags, TagInfo};
pub use token::{Attribute, HtmlToken};
pub use tokenizer::tokenize;

use std::rc::Rc;
use std::thread;

/// Worker-thread stack size `scrape` runs the whole pipeline under.
///
/// The only unbounded native recursion left after the forest builder's
/// iterative Step A (see `forest.rs`) is one stack frame per nesting
/// *level* (`fix_forest`'s child recursion, `select`'s DFS) — sibling
/// count and document length never recurse natively. A pathologically
/// deep document (spec.md §9's ≥10,000-deep budget) can still exceed the
/// default thread stack, so `scrape` always runs on a dedicated worker
/// thread sized generously for that budget, the same mitigation
/// `servo-html5ever`'s own codegen tooling uses for deep recursive work.
const DEEP_DOCUMENT_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Tokenizes `source`, builds the initial [`TagSpec`], and runs `scraper`
/// over it.
///
/// This is the top-level entry point (spec.md §4.6): tokenize → annotate →
/// build forest → run one [`scraper`]-style function, propagating
/// whatever `Option<T>` it returns. The only negative result anywhere in
/// this crate is `None` — there is no `Result`/error type to produce, per
/// spec.md §7.
///
/// Runs on a dedicated worker thread with a generous stack so that
/// deeply nested (adversarial or just very large) documents don't
/// overflow the calling thread's stack; see [`DEEP_DOCUMENT_STACK_SIZE`].
pub fn scrape<T, F>(source: &str, scraper: F) -> Option<T>
where
    T: Send + 'static,
    F: for<'doc> FnOnce(&TagSpec<'doc>) -> Option<T> + Send + 'static,
{
    let owned_source = source.to_string();
    thread::Builder::new()
        .stack_size(DEEP_DOCUMENT_STACK_SIZE)
        .spawn(move || scrape_on_this_thread(&owned_source, scraper))
        .expect("failed to spawn htmlcomb worker thread")
        .join()
        .expect("htmlcomb worker thread panicked")
}

/// The actual pipeline, free of the worker-thread plumbing — exposed
/// separately so tests can exercise it directly on the default test
/// thread stack when the input depth doesn't warrant a dedicated worker.
pub fn scrape_on_this_thread<T>(
    source: &str,
    scraper: impl for<'doc> FnOnce(&TagSpec<'doc>) -> Option<T>,
) -> Option<T> {
    let tokens = tokenizer::tokenize(source);
    let infos = tag_info::annotate_tags(&tokens);
    let hierarchy = forest::from_tag_info(&tokens, &infos);
    let spec = TagSpec::root(hierarchy, Rc::new(tokens));
    scraper(&spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::{attr, chroots, position, text, texts};
    use crate::selector::{at_depth, nested, tag};

    #[test]
    fn scenario_1_flat_siblings() {
        let result = scrape("<a>1</a><a>2</a><a>3</a>", |s| texts(s, &tag("a")));
        assert_eq!(result, Some(vec!["1".into(), "2".into(), "3".into()]));
    }

    #[test]
    fn scenario_2_nested_selector() {
        let html = "<a><b>1</b></a><a><b>2</b></a>";
        let result = scrape(html, |s| texts(s, &nested(tag("a"), tag("b"))));
        assert_eq!(result, Some(vec!["1".into(), "2".into()]));
    }

    #[test]
    fn scenario_3_malformed_lifting() {
        let html = "<a><b><c><d>2</d></b></c></a>";
        let result = scrape(html, |s| texts(s, &nested(tag("b"), tag("d"))));
        assert_eq!(result, Some(vec!["2".into()]));
    }

    #[test]
    fn scenario_4_at_depth() {
        let html = "<a><b>1</b><c><b>2</b></c></a>";
        let result = scrape(html, |s| {
            texts(s, &nested(tag("a"), at_depth(tag("b"), 2)))
        });
        assert_eq!(result, Some(vec!["2".into()]));
    }

    #[test]
    fn scenario_5_attr() {
        let html = r#"<a key="v">x</a>"#;
        let result = scrape(html, |s| attr("key", s, &tag("a")));
        assert_eq!(result, Some("v".into()));
    }

    #[test]
    fn scenario_6_chroots_with_position() {
        let html = "<article><p>A</p><p>B</p><p>C</p></article>";
        let result = scrape(html, |s| {
            chroots(s, &nested(tag("article"), tag("p")), |m| {
                Some((position(m)?, text(m, &crate::selector::any())))
            })
        });
        assert_eq!(
            result,
            Some(vec![
                (0, Some("A".to_string())),
                (1, Some("B".to_string())),
                (2, Some("C".to_string())),
            ])
        );
    }

    #[test]
    fn scrape_propagates_none_when_scraper_fails() {
        let result: Option<String> = scrape("<a>x</a>", |s| text(s, &tag("missing")));
        assert_eq!(result, None);
    }
}
