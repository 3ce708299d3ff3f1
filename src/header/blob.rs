//! Zero-copy reader for binary package headers.
//!
//! Layout (all integers big-endian):
//!
//! ```text
//! [magic: 8e ad e8 01 00 00 00 00]   optional
//! nindex: u32
//! hsize:  u32
//! index:  nindex * { tag: u32, type: u32, offset: u32, count: u32 }
//! data:   hsize bytes
//! ```

use super::{HeaderMap, HeaderStore, Tag, TagType, TagValue};
use crate::error::{RepodataError, Result};
use indexmap::IndexMap;

/// Magic prefix of a header as stored in a package file.
pub const HEADER_MAGIC: [u8; 8] = [0x8e, 0xad, 0xe8, 0x01, 0x00, 0x00, 0x00, 0x00];

const ENTRY_SIZE: usize = 16;
const MAX_INDEX_ENTRIES: usize = 0xffff;
const MAX_DATA_SIZE: usize = 256 * 1024 * 1024;

#[derive(Debug, Clone, Copy)]
struct IndexEntry {
    tag_type: TagType,
    offset: usize,
    count: usize,
    len: usize,
}

/// Borrowed view over a header blob.
///
/// All index entries are bounds-checked in [`HeaderBlob::parse`], so the
/// accessors never fail once a blob has been accepted.
#[derive(Debug, Clone)]
pub struct HeaderBlob<'a> {
    entries: IndexMap<u32, IndexEntry>,
    data: &'a [u8],
}

impl<'a> HeaderBlob<'a> {
    /// Parse and validate a header blob, with or without the magic prefix.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let bytes = bytes.strip_prefix(&HEADER_MAGIC[..]).unwrap_or(bytes);

        let nindex = read_u32(bytes, 0).ok_or_else(|| truncated("index count"))? as usize;
        let hsize = read_u32(bytes, 4).ok_or_else(|| truncated("data size"))? as usize;
        if nindex > MAX_INDEX_ENTRIES {
            return Err(RepodataError::malformed_blob(format!(
                "{nindex} index entries exceeds limit of {MAX_INDEX_ENTRIES}"
            )));
        }
        if hsize > MAX_DATA_SIZE {
            return Err(RepodataError::malformed_blob(format!(
                "data size {hsize} exceeds limit of {MAX_DATA_SIZE}"
            )));
        }

        let data_start = 8 + nindex * ENTRY_SIZE;
        let data = bytes
            .get(data_start..data_start + hsize)
            .ok_or_else(|| truncated("data store"))?;

        let mut entries = IndexMap::with_capacity(nindex);
        for i in 0..nindex {
            let base = 8 + i * ENTRY_SIZE;
            let field = |n: usize| read_u32(bytes, base + n * 4).ok_or_else(|| truncated("index"));
            let tag = field(0)?;
            let code = field(1)?;
            let offset = field(2)? as usize;
            let count = field(3)? as usize;

            let tag_type = TagType::from_code(code).ok_or_else(|| {
                RepodataError::malformed_blob(format!("tag {tag} has unknown type {code}"))
            })?;
            let len = entry_len(data, tag_type, offset, count).ok_or_else(|| {
                RepodataError::malformed_blob(format!(
                    "tag {tag} ({tag_type:?} x{count} at {offset}) overruns data store"
                ))
            })?;

            entries.entry(tag).or_insert(IndexEntry {
                tag_type,
                offset,
                count,
                len,
            });
        }

        Ok(Self { entries, data })
    }

    /// Number of index entries, including tags this crate does not know.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, tag: Tag) -> Option<(IndexEntry, &'a [u8])> {
        let entry = *self.entries.get(&tag.id())?;
        let bytes = self.data.get(entry.offset..entry.offset + entry.len)?;
        Some((entry, bytes))
    }

    fn numbers(entry: IndexEntry, bytes: &[u8]) -> Option<Vec<u64>> {
        let size = entry.tag_type.element_size()?;
        if !entry.tag_type.is_numeric() {
            return None;
        }
        bytes
            .chunks_exact(size)
            .take(entry.count)
            .map(|chunk| {
                Some(match size {
                    1 => u64::from(chunk[0]),
                    2 => u64::from(u16::from_be_bytes(chunk.try_into().ok()?)),
                    4 => u64::from(u32::from_be_bytes(chunk.try_into().ok()?)),
                    _ => u64::from_be_bytes(chunk.try_into().ok()?),
                })
            })
            .collect()
    }
}

impl HeaderStore for HeaderBlob<'_> {
    fn string(&self, tag: Tag) -> Option<&[u8]> {
        let (entry, bytes) = self.entry(tag)?;
        match entry.tag_type {
            TagType::String | TagType::I18nString => bytes.split(|b| *b == 0).next(),
            _ => None,
        }
    }

    fn number(&self, tag: Tag) -> Option<u64> {
        self.number_array(tag)?.first().copied()
    }

    fn string_array(&self, tag: Tag) -> Option<Vec<&[u8]>> {
        let (entry, bytes) = self.entry(tag)?;
        match entry.tag_type {
            TagType::String | TagType::StringArray | TagType::I18nString => {
                Some(bytes.split(|b| *b == 0).take(entry.count).collect())
            }
            _ => None,
        }
    }

    fn number_array(&self, tag: Tag) -> Option<Vec<u64>> {
        let (entry, bytes) = self.entry(tag)?;
        Self::numbers(entry, bytes)
    }

    fn binary(&self, tag: Tag) -> Option<&[u8]> {
        let (entry, bytes) = self.entry(tag)?;
        (entry.tag_type == TagType::Binary).then_some(bytes)
    }
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let raw = bytes.get(at..at + 4)?;
    Some(u32::from_be_bytes(raw.try_into().ok()?))
}

fn truncated(what: &str) -> RepodataError {
    RepodataError::malformed_blob(format!("truncated {what}"))
}

/// Byte length of an entry's payload, or `None` if it does not fit.
fn entry_len(data: &[u8], tag_type: TagType, offset: usize, count: usize) -> Option<usize> {
    let tail = data.get(offset..)?;
    match tag_type {
        TagType::Null => Some(0),
        TagType::String | TagType::StringArray | TagType::I18nString => {
            if tag_type == TagType::String && count != 1 {
                return None;
            }
            let mut len = 0;
            for _ in 0..count {
                let nul = tail.get(len..)?.iter().position(|b| *b == 0)?;
                len += nul + 1;
            }
            Some(len)
        }
        _ => {
            let len = tag_type.element_size()?.checked_mul(count)?;
            (len <= tail.len()).then_some(len)
        }
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Serialize a [`HeaderMap`] into a header blob (without magic).
///
/// Each value must match its tag's storage type; numeric arrays are aligned
/// to their element size and the index is sorted by tag id.
pub fn encode_blob(header: &HeaderMap) -> Result<Vec<u8>> {
    let mut index: Vec<[u32; 4]> = Vec::with_capacity(header.len());
    let mut data: Vec<u8> = Vec::new();

    for (tag, value) in header.iter() {
        let tag_type = tag.tag_type();
        let mismatch = || {
            RepodataError::invalid_value(
                tag.name(),
                format!("expected {tag_type:?}, got {}", value.kind()),
            )
        };

        let (offset, count) = match (tag_type, value) {
            (TagType::String, TagValue::String(s)) => {
                let offset = data.len();
                push_cstr(&mut data, tag, s)?;
                (offset, 1)
            }
            (TagType::StringArray | TagType::I18nString, TagValue::StringArray(items)) => {
                let offset = data.len();
                for item in items {
                    push_cstr(&mut data, tag, item)?;
                }
                (offset, items.len())
            }
            (TagType::I18nString, TagValue::String(s)) => {
                let offset = data.len();
                push_cstr(&mut data, tag, s)?;
                (offset, 1)
            }
            (TagType::Binary, TagValue::Binary(b)) => {
                let offset = data.len();
                data.extend_from_slice(b);
                (offset, b.len())
            }
            (ty, TagValue::Number(values)) if ty.is_numeric() => {
                let size = ty.element_size().ok_or_else(mismatch)?;
                while data.len() % size != 0 {
                    data.push(0);
                }
                let offset = data.len();
                for value in values {
                    push_number(&mut data, tag, size, *value)?;
                }
                (offset, values.len())
            }
            _ => return Err(mismatch()),
        };

        index.push([
            tag.id(),
            tag_type as u32,
            to_u32(offset, tag)?,
            to_u32(count, tag)?,
        ]);
    }

    index.sort_by_key(|entry| entry[0]);

    let mut out = Vec::with_capacity(8 + index.len() * ENTRY_SIZE + data.len());
    out.extend_from_slice(&(index.len() as u32).to_be_bytes());
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    for entry in &index {
        for field in entry {
            out.extend_from_slice(&field.to_be_bytes());
        }
    }
    out.extend_from_slice(&data);
    Ok(out)
}

fn push_cstr(data: &mut Vec<u8>, tag: Tag, s: &[u8]) -> Result<()> {
    if s.contains(&0) {
        return Err(RepodataError::invalid_value(
            tag.name(),
            "string contains an embedded NUL",
        ));
    }
    data.extend_from_slice(s);
    data.push(0);
    Ok(())
}

fn push_number(data: &mut Vec<u8>, tag: Tag, size: usize, value: u64) -> Result<()> {
    let out_of_range =
        || RepodataError::invalid_value(tag.name(), format!("{value} does not fit in {size} bytes"));
    match size {
        1 => data.push(u8::try_from(value).map_err(|_| out_of_range())?),
        2 => data.extend_from_slice(&u16::try_from(value).map_err(|_| out_of_range())?.to_be_bytes()),
        4 => data.extend_from_slice(&u32::try_from(value).map_err(|_| out_of_range())?.to_be_bytes()),
        _ => data.extend_from_slice(&value.to_be_bytes()),
    }
    Ok(())
}

fn to_u32(value: usize, tag: Tag) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| RepodataError::invalid_value(tag.name(), "entry too large for a header"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HeaderMap {
        HeaderMap::new()
            .with_string(Tag::Name, "coreutils")
            .with_strings(Tag::Summary, ["GNU core utilities"])
            .with_numbers(Tag::FileModes, [0o40755, 0o100644])
            .with_numbers(Tag::DirIndexes, [0, 0])
            .with_strings(Tag::BaseNames, ["bin", "ls"])
            .with_binary(Tag::SigPgp, b"\x01\x02\x03")
    }

    #[test]
    fn test_encode_then_read_back() {
        let bytes = encode_blob(&sample()).unwrap();
        let blob = HeaderBlob::parse(&bytes).unwrap();

        assert_eq!(blob.entry_count(), 6);
        assert_eq!(blob.string(Tag::Name), Some(&b"coreutils"[..]));
        assert_eq!(blob.string(Tag::Summary), Some(&b"GNU core utilities"[..]));
        assert_eq!(blob.number_array(Tag::FileModes), Some(vec![0o40755, 0o100644]));
        assert_eq!(
            blob.string_array(Tag::BaseNames),
            Some(vec![&b"bin"[..], &b"ls"[..]])
        );
        assert_eq!(blob.binary(Tag::SigPgp), Some(&[1u8, 2, 3][..]));
        assert_eq!(blob.string(Tag::Version), None);
    }

    #[test]
    fn test_copy_blob_into_map() {
        let bytes = encode_blob(&sample()).unwrap();
        let blob = HeaderBlob::parse(&bytes).unwrap();
        assert_eq!(HeaderMap::from_store(&blob), sample());
    }

    #[test]
    fn test_magic_prefix_is_accepted() {
        let mut bytes = HEADER_MAGIC.to_vec();
        bytes.extend(encode_blob(&sample()).unwrap());
        let blob = HeaderBlob::parse(&bytes).unwrap();
        assert_eq!(blob.get_string(Tag::Name), b"coreutils");
    }

    #[test]
    fn test_truncated_blob_is_rejected() {
        let bytes = encode_blob(&sample()).unwrap();
        assert!(HeaderBlob::parse(&bytes[..bytes.len() - 1]).is_err());
        assert!(HeaderBlob::parse(&bytes[..6]).is_err());
        assert!(HeaderBlob::parse(&[]).is_err());
    }

    #[test]
    fn test_entry_overrunning_data_is_rejected() {
        // One Int32 entry claiming two elements in a four byte store.
        let mut bytes = Vec::new();
        for word in [1u32, 4, Tag::Epoch.id(), 4, 0, 2] {
            bytes.extend_from_slice(&word.to_be_bytes());
        }
        bytes.extend_from_slice(&[0, 0, 0, 1]);
        assert!(HeaderBlob::parse(&bytes).is_err());
    }

    #[test]
    fn test_unknown_tags_are_kept_but_unread() {
        let mut bytes = Vec::new();
        for word in [1u32, 4, 63, 7, 0, 4] {
            bytes.extend_from_slice(&word.to_be_bytes());
        }
        bytes.extend_from_slice(&[9, 9, 9, 9]);
        let blob = HeaderBlob::parse(&bytes).unwrap();
        assert_eq!(blob.entry_count(), 1);
        assert_eq!(blob.binary(Tag::SigGpg), None);
    }

    #[test]
    fn test_encode_rejects_type_mismatch() {
        let header = HeaderMap::new().with_string(Tag::Epoch, "1");
        assert!(encode_blob(&header).is_err());

        let header = HeaderMap::new().with_number(Tag::FileModes, 70_000);
        assert!(encode_blob(&header).is_err());

        let header = HeaderMap::new().with_string(Tag::Name, b"a\0b");
        assert!(encode_blob(&header).is_err());
    }
}
