#![no_main]

use htmlcomb::scraper::texts;
use htmlcomb::selector::{any, nested, tag};
use libfuzzer_sys::fuzz_target;

/// Fuzzes the whole pipeline (tokenizer, annotator, forest builder,
/// selector) against arbitrary byte input, running a handful of
/// representative selectors over whatever forest comes out.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = htmlcomb::scrape_on_this_thread(s, |spec| texts(spec, &tag("a")));
        let _ = htmlcomb::scrape_on_this_thread(s, |spec| texts(spec, &nested(tag("div"), any())));
    }
});
