//! Encoding safety for text that ends up in XML.
//!
//! Header strings are raw bytes: usually UTF-8, sometimes Latin-1, now and
//! then with stray control characters. XML 1.0 accepts neither invalid UTF-8
//! nor control characters other than tab, newline and carriage return, so
//! every string is checked here before it is written. Clean input is
//! borrowed unchanged; anything else is re-read as Latin-1.

use std::borrow::Cow;

/// `true` if the input contains a byte below 0x20 other than TAB, LF or CR.
#[must_use]
pub fn has_control_chars(s: &[u8]) -> bool {
    s.iter().any(|&b| is_forbidden_control(b))
}

/// Text content: valid UTF-8 without forbidden control characters passes
/// through untouched, everything else goes through [`latin1_to_utf8`].
///
/// ```
/// use repodata_tools::xml::sanitize_text;
///
/// assert_eq!(sanitize_text(b"He\x9fllo"), "Hello");
/// ```
#[must_use]
pub fn sanitize_text(s: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(s) {
        Ok(text) if !has_control_chars(s) => Cow::Borrowed(text),
        _ => Cow::Owned(latin1_to_utf8(s)),
    }
}

/// Attribute values: only UTF-8 validity is checked.
#[must_use]
pub fn sanitize_attr(s: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(s) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(latin1_to_utf8(s)),
    }
}

/// Re-encode bytes as if they were Latin-1.
///
/// - ASCII is copied, except forbidden control characters, which are dropped
/// - 0x80..=0xBF is dropped (C1 controls and bytes that cannot start a
///   character on their own)
/// - 0xC0..=0xFF becomes the two-byte UTF-8 encoding of the same code point
#[must_use]
pub fn latin1_to_utf8(s: &[u8]) -> String {
    let mut out = String::with_capacity(s.len() * 2 + 1);
    for &b in s {
        match b {
            0x00..=0x7f if is_forbidden_control(b) => {}
            0x00..=0x7f | 0xc0..=0xff => out.push(char::from(b)),
            0x80..=0xbf => {}
        }
    }
    out
}

const fn is_forbidden_control(b: u8) -> bool {
    b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r')
}
