#![no_main]

use libfuzzer_sys::fuzz_target;
use repodata_tools::xml::{has_control_chars, sanitize_attr, sanitize_text};

fuzz_target!(|data: &[u8]| {
    let text = sanitize_text(data);
    assert!(!has_control_chars(text.as_bytes()));
    let _ = sanitize_attr(data);
});
