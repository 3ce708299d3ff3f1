//! JSON/YAML header dumps.
//!
//! A dump is a mapping from tag name to value:
//!
//! ```yaml
//! NAME: bash
//! EPOCH: 0
//! REQUIRENAME: [libc.so.6, /bin/sh]
//! REQUIREFLAGS: [0, 0]
//! CHANGELOGNAME: [{ hex: "4a6f73e9" }]
//! SIGGPG: { hex: "89021503" }
//! ```
//!
//! Strings that are not valid UTF-8 are written as `{ hex: ... }` objects, so
//! a dump carries header bytes through unchanged.

use super::{HeaderMap, Tag, TagType, TagValue};
use crate::error::{ErrorContext, RepodataError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single dumped value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DumpValue {
    Number(u64),
    Text(String),
    Bytes { hex: String },
    List(Vec<DumpValue>),
}

/// A header dump document keyed by tag name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderDump {
    pub tags: IndexMap<String, DumpValue>,
}

impl HeaderDump {
    /// Parse a JSON dump.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a YAML dump.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a dump, choosing JSON when the document starts with `{`.
    pub fn from_str_auto(content: &str) -> Result<Self> {
        if content.trim_start().starts_with('{') {
            Self::from_json(content)
        } else {
            Self::from_yaml(content)
        }
    }

    /// Parse a dump whose format is given by a file extension; anything
    /// other than `json`, `yaml` or `yml` is sniffed.
    pub fn from_str_with_extension(content: &str, ext: Option<&str>) -> Result<Self> {
        match ext.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Self::from_json(content),
            Some("yaml" | "yml") => Self::from_yaml(content),
            _ => Self::from_str_auto(content),
        }
    }

    /// Read a dump from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RepodataError::io(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());
        Self::from_str_with_extension(&content, ext)
            .with_context(|| format!("loading {}", path.display()))
    }

    /// Build a dump from a typed header.
    #[must_use]
    pub fn from_header(header: &HeaderMap) -> Self {
        let tags = header
            .iter()
            .map(|(tag, value)| {
                let dumped = match value {
                    TagValue::String(s) => text_value(s),
                    TagValue::StringArray(items) => {
                        DumpValue::List(items.iter().map(|s| text_value(s)).collect())
                    }
                    TagValue::Number(values) if values.len() == 1 => DumpValue::Number(values[0]),
                    TagValue::Number(values) => {
                        DumpValue::List(values.iter().copied().map(DumpValue::Number).collect())
                    }
                    TagValue::Binary(b) => DumpValue::Bytes { hex: encode_hex(b) },
                };
                (tag.name().to_string(), dumped)
            })
            .collect();
        Self { tags }
    }

    /// Convert into a typed header, checking every value against its tag's
    /// storage type.
    pub fn to_header(&self) -> Result<HeaderMap> {
        self.tags
            .iter()
            .map(|(name, value)| {
                let tag: Tag = name.parse()?;
                let value = convert(tag, value)?;
                Ok((tag, value))
            })
            .collect()
    }
}

fn convert(tag: Tag, value: &DumpValue) -> Result<TagValue> {
    let mismatch = |expected: &str| {
        RepodataError::invalid_value(tag.name(), format!("expected {expected}"))
    };

    match tag.tag_type() {
        TagType::String => text_bytes(tag, value)?
            .map(TagValue::String)
            .ok_or_else(|| mismatch("a string")),
        TagType::I18nString | TagType::StringArray => match value {
            DumpValue::List(items) => items
                .iter()
                .map(|item| text_bytes(tag, item)?.ok_or_else(|| mismatch("a list of strings")))
                .collect::<Result<Vec<_>>>()
                .map(TagValue::StringArray),
            other => text_bytes(tag, other)?
                .map(|s| TagValue::StringArray(vec![s]))
                .ok_or_else(|| mismatch("a string or list of strings")),
        },
        TagType::Binary => match value {
            DumpValue::Bytes { hex } => decode_hex(hex)
                .map(TagValue::Binary)
                .ok_or_else(|| mismatch("a hex string")),
            _ => Err(mismatch("a { hex: ... } object")),
        },
        ty if ty.is_numeric() => match value {
            DumpValue::Number(n) => Ok(TagValue::Number(vec![*n])),
            DumpValue::List(items) => items
                .iter()
                .map(|item| match item {
                    DumpValue::Number(n) => Ok(*n),
                    _ => Err(mismatch("a list of numbers")),
                })
                .collect::<Result<Vec<_>>>()
                .map(TagValue::Number),
            _ => Err(mismatch("a number or list of numbers")),
        },
        _ => Err(mismatch("a supported tag type")),
    }
}

/// Raw bytes of a string-ish dump value; `None` for numbers and lists.
fn text_bytes(tag: Tag, value: &DumpValue) -> Result<Option<Vec<u8>>> {
    match value {
        DumpValue::Text(s) => Ok(Some(s.as_bytes().to_vec())),
        DumpValue::Bytes { hex } => decode_hex(hex)
            .map(Some)
            .ok_or_else(|| RepodataError::invalid_value(tag.name(), "invalid hex string")),
        DumpValue::Number(_) | DumpValue::List(_) => Ok(None),
    }
}

fn text_value(bytes: &[u8]) -> DumpValue {
    match std::str::from_utf8(bytes) {
        Ok(s) => DumpValue::Text(s.to_string()),
        Err(_) => DumpValue::Bytes {
            hex: encode_hex(bytes),
        },
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.as_bytes();
    if hex.len() % 2 != 0 {
        return None;
    }
    hex.chunks_exact(2)
        .map(|pair| {
            let hi = char::from(pair[0]).to_digit(16)?;
            let lo = char::from(pair[1]).to_digit(16)?;
            u8::try_from(hi * 16 + lo).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HeaderStore;

    #[test]
    fn test_json_dump_to_header() {
        let dump = HeaderDump::from_json(
            r#"{
                "NAME": "bash",
                "EPOCH": 1,
                "SUMMARY": "The GNU Bourne Again shell",
                "REQUIRENAME": ["libc.so.6", "/bin/sh"],
                "REQUIREFLAGS": [0, 0],
                "SIGGPG": { "hex": "dead" }
            }"#,
        )
        .unwrap();
        let header = dump.to_header().unwrap();

        assert_eq!(header.get_string(Tag::Name), b"bash");
        assert_eq!(header.get_number(Tag::Epoch), 1);
        assert_eq!(header.get_string(Tag::Summary), b"The GNU Bourne Again shell");
        assert_eq!(header.string_array(Tag::RequireName).unwrap().len(), 2);
        assert_eq!(header.binary(Tag::SigGpg), Some(&[0xde, 0xad][..]));
    }

    #[test]
    fn test_yaml_dump_with_raw_bytes() {
        let dump = HeaderDump::from_yaml(
            "NAME: pkg\nCHANGELOGNAME:\n  - hex: \"4a6f73e9\"\n  - plain\n",
        )
        .unwrap();
        let header = dump.to_header().unwrap();
        let names = header.string_array(Tag::ChangelogName).unwrap();
        assert_eq!(names[0], &[0x4a, 0x6f, 0x73, 0xe9][..]);
        assert_eq!(names[1], b"plain");
    }

    #[test]
    fn test_type_errors_name_the_tag() {
        let dump = HeaderDump::from_json(r#"{"EPOCH": "seven"}"#).unwrap();
        let err = dump.to_header().unwrap_err();
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert!(source.unwrap().contains("EPOCH"));

        let dump = HeaderDump::from_json(r#"{"FROB": 1}"#).unwrap();
        assert!(dump.to_header().is_err());

        let dump = HeaderDump::from_json(r#"{"SIGPGP": {"hex": "abc"}}"#).unwrap();
        assert!(dump.to_header().is_err());
    }

    #[test]
    fn test_from_header_keeps_non_utf8_bytes() {
        let header = HeaderMap::new()
            .with_string(Tag::Name, "pkg")
            .with_strings(Tag::ChangelogName, [&b"Jos\xe9"[..]])
            .with_numbers(Tag::FileModes, [0o100644, 0o40755]);
        let dump = HeaderDump::from_header(&header);

        assert_eq!(dump.tags["NAME"], DumpValue::Text("pkg".to_string()));
        assert_eq!(
            dump.tags["CHANGELOGNAME"],
            DumpValue::List(vec![DumpValue::Bytes {
                hex: "4a6f73e9".to_string()
            }])
        );
        assert_eq!(dump.to_header().unwrap(), header);
    }

    #[test]
    fn test_auto_detection() {
        assert!(HeaderDump::from_str_auto("{\"NAME\": \"a\"}").is_ok());
        assert!(HeaderDump::from_str_auto("NAME: a\n").is_ok());
    }

    #[test]
    fn test_hex_helpers() {
        assert_eq!(encode_hex(&[0x00, 0xff, 0x10]), "00ff10");
        assert_eq!(decode_hex("00FF10"), Some(vec![0x00, 0xff, 0x10]));
        assert_eq!(decode_hex("0g"), None);
    }
}
