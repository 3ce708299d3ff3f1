//! Owned in-memory header.

use super::{HeaderStore, Tag};
use indexmap::IndexMap;

/// A single header entry value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    /// Scalar string; raw bytes, not necessarily UTF-8.
    String(Vec<u8>),
    /// String array (also used for i18n tables).
    StringArray(Vec<Vec<u8>>),
    /// Numeric entry; headers store numbers as arrays even for scalars.
    Number(Vec<u64>),
    /// Opaque bytes.
    Binary(Vec<u8>),
}

impl TagValue {
    /// Short label used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::StringArray(_) => "string array",
            Self::Number(_) => "number",
            Self::Binary(_) => "binary",
        }
    }
}

/// Insertion-ordered map from tag to value.
///
/// Built with the `with_*` methods in tests and by [`HeaderDump`](super::HeaderDump)
/// when loading dump documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: IndexMap<Tag, TagValue>,
}

impl HeaderMap {
    /// Create an empty header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for the tag.
    pub fn insert(&mut self, tag: Tag, value: TagValue) -> Option<TagValue> {
        self.entries.insert(tag, value)
    }

    /// Remove a tag.
    pub fn remove(&mut self, tag: Tag) -> Option<TagValue> {
        self.entries.shift_remove(&tag)
    }

    #[must_use]
    pub fn get(&self, tag: Tag) -> Option<&TagValue> {
        self.entries.get(&tag)
    }

    #[must_use]
    pub fn contains(&self, tag: Tag) -> bool {
        self.entries.contains_key(&tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &TagValue)> {
        self.entries.iter().map(|(tag, value)| (*tag, value))
    }

    // ------------------------------------------------------------------------
    // Builder helpers
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn with_string(mut self, tag: Tag, value: impl AsRef<[u8]>) -> Self {
        self.insert(tag, TagValue::String(value.as_ref().to_vec()));
        self
    }

    #[must_use]
    pub fn with_strings<I, S>(mut self, tag: Tag, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let values = values.into_iter().map(|s| s.as_ref().to_vec()).collect();
        self.insert(tag, TagValue::StringArray(values));
        self
    }

    #[must_use]
    pub fn with_number(mut self, tag: Tag, value: u64) -> Self {
        self.insert(tag, TagValue::Number(vec![value]));
        self
    }

    #[must_use]
    pub fn with_numbers(mut self, tag: Tag, values: impl IntoIterator<Item = u64>) -> Self {
        self.insert(tag, TagValue::Number(values.into_iter().collect()));
        self
    }

    #[must_use]
    pub fn with_binary(mut self, tag: Tag, value: impl AsRef<[u8]>) -> Self {
        self.insert(tag, TagValue::Binary(value.as_ref().to_vec()));
        self
    }
}

impl HeaderMap {
    /// Copy every known tag out of another store, using each tag's storage
    /// type to pick the accessor.
    #[must_use]
    pub fn from_store(store: &impl HeaderStore) -> Self {
        use super::TagType;

        Tag::ALL
            .iter()
            .filter_map(|&tag| {
                let value = match tag.tag_type() {
                    TagType::String => TagValue::String(store.string(tag)?.to_vec()),
                    TagType::StringArray | TagType::I18nString => TagValue::StringArray(
                        store
                            .string_array(tag)?
                            .into_iter()
                            .map(<[u8]>::to_vec)
                            .collect(),
                    ),
                    TagType::Binary => TagValue::Binary(store.binary(tag)?.to_vec()),
                    ty if ty.is_numeric() => TagValue::Number(store.number_array(tag)?),
                    _ => return None,
                };
                Some((tag, value))
            })
            .collect()
    }
}

impl FromIterator<(Tag, TagValue)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (Tag, TagValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl HeaderStore for HeaderMap {
    fn string(&self, tag: Tag) -> Option<&[u8]> {
        match self.entries.get(&tag)? {
            TagValue::String(s) => Some(s),
            TagValue::StringArray(v) => v.first().map(Vec::as_slice),
            TagValue::Number(_) | TagValue::Binary(_) => None,
        }
    }

    fn number(&self, tag: Tag) -> Option<u64> {
        match self.entries.get(&tag)? {
            TagValue::Number(v) => v.first().copied(),
            _ => None,
        }
    }

    fn string_array(&self, tag: Tag) -> Option<Vec<&[u8]>> {
        match self.entries.get(&tag)? {
            TagValue::StringArray(v) => Some(v.iter().map(Vec::as_slice).collect()),
            TagValue::String(s) => Some(vec![s.as_slice()]),
            TagValue::Number(_) | TagValue::Binary(_) => None,
        }
    }

    fn number_array(&self, tag: Tag) -> Option<Vec<u64>> {
        match self.entries.get(&tag)? {
            TagValue::Number(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn binary(&self, tag: Tag) -> Option<&[u8]> {
        match self.entries.get(&tag)? {
            TagValue::Binary(b) => Some(b),
            _ => None,
        }
    }
}
