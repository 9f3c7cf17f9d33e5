//! # Link Extraction Example
//!
//! Demonstrates the combinator style of pulling structured data out of a
//! small HTML fragment: every `<a>`'s `href` paired with its link text.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example extract_links
//! ```

use htmlcomb::scraper::{attr, chroot, chroots, text};
use htmlcomb::selector::tag;
use htmlcomb::serial::{in_serial, repeat, seek_next};
use htmlcomb::scrape;

const PAGE: &str = r#"
<nav>
  <a href="/home">Home</a>
  <a href="/docs">Documentation</a>
  <a href="/blog">Blog</a>
</nav>
"#;

fn main() {
    let pairs: Vec<(String, String)> = scrape(PAGE, |s| {
        chroots(s, &tag("a"), |a| {
            Some((attr("href", a, &tag("a"))?, text(a, &tag("a"))?))
        })
    })
    .expect("page always has at least one link");

    for (href, label) in &pairs {
        println!("{label} -> {href}");
    }

    // Same extraction, driven serially across `<nav>`'s children instead.
    let via_serial: Option<Vec<(String, String)>> = scrape(PAGE, |s| {
        chroot(s, &tag("nav"), |nav| {
            in_serial(nav, |z| {
                Some(repeat(z, |z| {
                    seek_next(z, |n| {
                        Some((attr("href", n, &tag("a"))?, text(n, &tag("a"))?))
                    })
                }))
            })
        })
    });
    assert_eq!(Some(pairs), via_serial);
}
