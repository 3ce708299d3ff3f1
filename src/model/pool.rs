//! Per-record string arena.
//!
//! Every string a [`PackageRecord`](super::PackageRecord) holds lives in one
//! growable byte buffer owned by the record. Entities refer to their strings
//! through [`PoolStr`] handles (offset and length into that buffer), so a
//! record is a handful of allocations no matter how many dependencies and
//! files it carries, and dropping it frees everything at once.

use crate::xml::sanitize_text;
use std::borrow::Cow;
use std::collections::HashMap;
use xxhash_rust::xxh3::xxh3_64;

/// Handle to a string stored in a [`StringPool`].
///
/// Only meaningful together with the pool that issued it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PoolStr {
    start: usize,
    len: usize,
}

impl PoolStr {
    /// The empty string; valid in every pool.
    pub const EMPTY: Self = Self { start: 0, len: 0 };

    #[must_use]
    pub const fn len(self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Append-only byte arena with content interning.
///
/// Identical strings (dependency versions, directory names, changelog
/// authors) are stored once; lookups go through an xxh3 hash of the bytes.
#[derive(Debug, Clone, Default)]
pub struct StringPool {
    buf: Vec<u8>,
    interned: HashMap<u64, PoolStr>,
}

impl StringPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bytes),
            interned: HashMap::new(),
        }
    }

    /// Store a string and return its handle.
    pub fn insert(&mut self, s: &[u8]) -> PoolStr {
        if s.is_empty() {
            return PoolStr::EMPTY;
        }

        let hash = xxh3_64(s);
        if let Some(&existing) = self.interned.get(&hash) {
            if self.get(existing) == s {
                return existing;
            }
        }

        let handle = PoolStr {
            start: self.buf.len(),
            len: s.len(),
        };
        self.buf.extend_from_slice(s);
        // On a hash collision the first string keeps the slot.
        self.interned.entry(hash).or_insert(handle);
        handle
    }

    /// Store an optional string; `None` stays `None`.
    pub fn insert_opt(&mut self, s: Option<&[u8]>) -> Option<PoolStr> {
        s.map(|s| self.insert(s))
    }

    /// Raw bytes behind a handle. A handle from another pool that falls out
    /// of range reads as empty.
    #[must_use]
    pub fn get(&self, s: PoolStr) -> &[u8] {
        self.buf
            .get(s.start..s.start + s.len)
            .unwrap_or_default()
    }

    /// Sanitized text behind a handle, safe to embed in XML.
    #[must_use]
    pub fn text(&self, s: PoolStr) -> Cow<'_, str> {
        sanitize_text(self.get(s))
    }

    /// Bytes stored so far.
    #[must_use]
    pub fn bytes_used(&self) -> usize {
        self.buf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut pool = StringPool::new();
        let a = pool.insert(b"glibc");
        let b = pool.insert(b"bash");

        assert_eq!(pool.get(a), b"glibc");
        assert_eq!(pool.get(b), b"bash");
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn test_identical_strings_are_stored_once() {
        let mut pool = StringPool::new();
        let first = pool.insert(b"/usr/bin/");
        let second = pool.insert(b"/usr/bin/");

        assert_eq!(first, second);
        assert_eq!(pool.bytes_used(), 9);
    }

    #[test]
    fn test_empty_strings_do_not_allocate() {
        let mut pool = StringPool::new();
        let empty = pool.insert(b"");
        assert_eq!(empty, PoolStr::EMPTY);
        assert!(empty.is_empty());
        assert_eq!(pool.bytes_used(), 0);
        assert_eq!(pool.get(empty), b"");
    }

    #[test]
    fn test_foreign_handle_reads_empty() {
        let mut big = StringPool::new();
        let handle = big.insert(b"only in the big pool");
        let small = StringPool::new();
        assert_eq!(small.get(handle), b"");
    }

    #[test]
    fn test_text_is_sanitized() {
        let mut pool = StringPool::new();
        let handle = pool.insert(b"Jos\xe9");
        assert_eq!(pool.text(handle), "José");
    }
}
