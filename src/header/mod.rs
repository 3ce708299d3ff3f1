//! Typed, by-tag access to package header data.
//!
//! Everything downstream of this module reads a header through the
//! [`HeaderStore`] trait, so the same extraction code runs against:
//!
//! - [`HeaderMap`]: an owned, in-memory map that can be built by hand or
//!   loaded from a JSON/YAML [`HeaderDump`]
//! - [`HeaderBlob`]: a zero-copy view over a binary header blob
//!
//! Absence of a tag is never an error; the provided accessors fall back to an
//! empty string or zero.

mod blob;
mod dump;
mod map;
mod tags;

pub use blob::{encode_blob, HeaderBlob, HEADER_MAGIC};
pub use dump::{DumpValue, HeaderDump};
pub use map::{HeaderMap, TagValue};
pub use tags::{Tag, TagType};

/// Read-only, typed accessor over a package header.
///
/// String values are raw bytes: headers routinely carry Latin-1 or otherwise
/// non-UTF-8 text, and conversion is the sanitizer's job, not the store's.
pub trait HeaderStore {
    /// Scalar string value. For i18n tables the first (default locale) entry.
    fn string(&self, tag: Tag) -> Option<&[u8]>;

    /// First element of a numeric entry.
    fn number(&self, tag: Tag) -> Option<u64>;

    /// Ordered string array.
    fn string_array(&self, tag: Tag) -> Option<Vec<&[u8]>>;

    /// Ordered numeric array.
    fn number_array(&self, tag: Tag) -> Option<Vec<u64>>;

    /// Opaque binary blob.
    fn binary(&self, tag: Tag) -> Option<&[u8]>;

    /// String value, or empty when the tag is absent.
    fn get_string(&self, tag: Tag) -> &[u8] {
        self.string(tag).unwrap_or_default()
    }

    /// String value, or `None` when the tag is absent or empty.
    fn get_optional_string(&self, tag: Tag) -> Option<&[u8]> {
        self.string(tag).filter(|s| !s.is_empty())
    }

    /// Numeric value, or zero when the tag is absent.
    fn get_number(&self, tag: Tag) -> u64 {
        self.number(tag).unwrap_or(0)
    }
}

impl<T: HeaderStore + ?Sized> HeaderStore for &T {
    fn string(&self, tag: Tag) -> Option<&[u8]> {
        (**self).string(tag)
    }

    fn number(&self, tag: Tag) -> Option<u64> {
        (**self).number(tag)
    }

    fn string_array(&self, tag: Tag) -> Option<Vec<&[u8]>> {
        (**self).string_array(tag)
    }

    fn number_array(&self, tag: Tag) -> Option<Vec<u64>> {
        (**self).number_array(tag)
    }

    fn binary(&self, tag: Tag) -> Option<&[u8]> {
        (**self).binary(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provided_defaults() {
        let header = HeaderMap::new()
            .with_string(Tag::Name, "bash")
            .with_string(Tag::Description, "");

        assert_eq!(header.get_string(Tag::Name), b"bash");
        assert_eq!(header.get_string(Tag::Vendor), b"");
        assert_eq!(header.get_optional_string(Tag::Description), None);
        assert_eq!(header.get_optional_string(Tag::Name), Some(&b"bash"[..]));
        assert_eq!(header.get_number(Tag::Epoch), 0);
    }

    #[test]
    fn test_adapters_agree() {
        let map = HeaderMap::new()
            .with_string(Tag::Name, "zsh")
            .with_number(Tag::Epoch, 2)
            .with_strings(Tag::RequireName, ["libc.so.6", "/bin/sh"])
            .with_numbers(Tag::RequireFlags, [0, 0])
            .with_binary(Tag::SigGpg, b"\xde\xad");
        let bytes = encode_blob(&map).unwrap();
        let blob = HeaderBlob::parse(&bytes).unwrap();

        fn probe(store: &impl HeaderStore) -> (Vec<u8>, u64, usize, Option<Vec<u8>>) {
            (
                store.get_string(Tag::Name).to_vec(),
                store.get_number(Tag::Epoch),
                store.string_array(Tag::RequireName).map_or(0, |v| v.len()),
                store.binary(Tag::SigGpg).map(<[u8]>::to_vec),
            )
        }

        assert_eq!(probe(&map), probe(&blob));
    }
}
