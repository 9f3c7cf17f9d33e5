#![no_main]

use libfuzzer_sys::fuzz_target;

/// Fuzzes the tokenizer directly on arbitrary byte input.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = htmlcomb::tokenize(s);
    }
});
