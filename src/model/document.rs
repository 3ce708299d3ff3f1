//! Serializable view of a [`PackageRecord`].
//!
//! Every string is passed through the text sanitizer on the way in, so a
//! document can be written as JSON or YAML, or fed to an XML emitter,
//! without further checks.

use super::{Comparison, DependencyKind, FileKind, PackageRecord};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One package, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecordDocument {
    pub name: String,
    pub arch: String,
    pub epoch: String,
    pub version: String,
    pub release: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    pub license: String,
    pub vendor: String,
    pub group: String,
    pub build_host: String,
    pub source_rpm: String,
    pub packager: String,
    pub build_time: u64,
    /// Build time as a calendar date, when representable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_date: Option<DateTime<Utc>>,
    pub installed_size: u64,
    pub archive_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_id: Option<String>,
    /// Sizes of the stored signature blobs, when loading them was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpg_signature_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pgp_signature_size: Option<usize>,
    #[serde(default)]
    pub files: Vec<FileDocument>,
    #[serde(default)]
    pub dependencies: Vec<DependencyListDocument>,
    #[serde(default)]
    pub changelog: Vec<ChangelogDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileDocument {
    pub path: String,
    pub kind: FileKind,
}

/// All dependencies of one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DependencyListDocument {
    pub kind: DependencyKind,
    pub entries: Vec<DependencyDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DependencyDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Comparison>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epoch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pre: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChangelogDocument {
    pub author: String,
    pub date: u64,
    pub text: String,
}

impl From<&PackageRecord> for RecordDocument {
    fn from(record: &PackageRecord) -> Self {
        let text = |s| record.text(s).into_owned();
        let text_opt = |s| record.text_opt(s).map(std::borrow::Cow::into_owned);

        let files = record
            .files()
            .iter()
            .map(|file| FileDocument {
                path: crate::xml::sanitize_text(&record.file_path(file)).into_owned(),
                kind: file.kind,
            })
            .collect();

        let dependencies = record
            .dependencies()
            .iter()
            .map(|(kind, deps)| DependencyListDocument {
                kind,
                entries: deps
                    .iter()
                    .map(|dep| DependencyDocument {
                        name: text(dep.name),
                        flags: dep.flags,
                        epoch: text_opt(dep.epoch),
                        version: text_opt(dep.version),
                        release: text_opt(dep.release),
                        pre: dep.pre,
                    })
                    .collect(),
            })
            .collect();

        let changelog = record
            .changelog()
            .iter()
            .map(|entry| ChangelogDocument {
                author: text(entry.author),
                date: entry.date,
                text: text(entry.text),
            })
            .collect();

        Self {
            name: text(record.name),
            arch: text(record.arch),
            epoch: text(record.epoch),
            version: text(record.version),
            release: text(record.release),
            summary: text(record.summary),
            description: text_opt(record.description),
            url: text(record.url),
            license: text(record.license),
            vendor: text(record.vendor),
            group: text(record.group),
            build_host: text(record.build_host),
            source_rpm: text(record.source_rpm),
            packager: text(record.packager),
            build_time: record.build_time(),
            build_date: i64::try_from(record.build_time())
                .ok()
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            installed_size: record.installed_size(),
            archive_size: record.archive_size(),
            header_id: text_opt(record.header_id),
            gpg_signature_size: record.gpg_signature().map(<[u8]>::len),
            pgp_signature_size: record.pgp_signature().map(<[u8]>::len),
            files,
            dependencies,
            changelog,
        }
    }
}

impl RecordDocument {
    /// Look up the entries of one dependency kind.
    #[must_use]
    pub fn dependencies_of(&self, kind: DependencyKind) -> &[DependencyDocument] {
        self.dependencies
            .iter()
            .find(|list| list.kind == kind)
            .map_or(&[][..], |list| list.entries.as_slice())
    }
}
