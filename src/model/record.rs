//! The normalized package record.

use super::{ChangelogEntry, Dependencies, PackageFile, PoolStr, StringPool};
use std::borrow::Cow;

/// Everything repository metadata needs to know about one package.
///
/// Built once by [`Extractor`](crate::normalize::Extractor) and immutable
/// afterwards. All text lives in the record's own [`StringPool`]; the byte
/// accessors return it as found in the header, [`PackageRecord::text`]
/// returns it sanitized for XML.
#[derive(Debug, Clone, Default)]
pub struct PackageRecord {
    pub(crate) pool: StringPool,

    pub(crate) name: PoolStr,
    pub(crate) arch: PoolStr,
    pub(crate) epoch: PoolStr,
    pub(crate) version: PoolStr,
    pub(crate) release: PoolStr,

    pub(crate) summary: PoolStr,
    pub(crate) description: Option<PoolStr>,
    pub(crate) url: PoolStr,
    pub(crate) license: PoolStr,
    pub(crate) vendor: PoolStr,
    pub(crate) group: PoolStr,
    pub(crate) build_host: PoolStr,
    pub(crate) source_rpm: PoolStr,
    pub(crate) packager: PoolStr,

    pub(crate) build_time: u64,
    pub(crate) installed_size: u64,
    pub(crate) archive_size: u64,

    pub(crate) header_id: Option<PoolStr>,
    pub(crate) gpg_signature: Option<Vec<u8>>,
    pub(crate) pgp_signature: Option<Vec<u8>>,

    pub(crate) files: Vec<PackageFile>,
    pub(crate) dependencies: Dependencies,
    pub(crate) changelog: Vec<ChangelogEntry>,
}

impl PackageRecord {
    /// Raw bytes behind a handle issued by this record.
    #[must_use]
    pub fn bytes(&self, s: PoolStr) -> &[u8] {
        self.pool.get(s)
    }

    /// Sanitized text behind a handle issued by this record.
    #[must_use]
    pub fn text(&self, s: PoolStr) -> Cow<'_, str> {
        self.pool.text(s)
    }

    /// Sanitized text of an optional handle.
    #[must_use]
    pub fn text_opt(&self, s: Option<PoolStr>) -> Option<Cow<'_, str>> {
        s.map(|s| self.text(s))
    }

    #[must_use]
    pub fn name(&self) -> &[u8] {
        self.bytes(self.name)
    }

    /// Architecture; `src` for source packages.
    #[must_use]
    pub fn arch(&self) -> &[u8] {
        self.bytes(self.arch)
    }

    /// Decimal epoch, `0` when the header has none.
    #[must_use]
    pub fn epoch(&self) -> &[u8] {
        self.bytes(self.epoch)
    }

    #[must_use]
    pub fn version(&self) -> &[u8] {
        self.bytes(self.version)
    }

    #[must_use]
    pub fn release(&self) -> &[u8] {
        self.bytes(self.release)
    }

    #[must_use]
    pub fn summary(&self) -> &[u8] {
        self.bytes(self.summary)
    }

    /// `None` when the header has no (or an empty) description.
    #[must_use]
    pub fn description(&self) -> Option<&[u8]> {
        self.description.map(|s| self.bytes(s))
    }

    #[must_use]
    pub fn url(&self) -> &[u8] {
        self.bytes(self.url)
    }

    #[must_use]
    pub fn license(&self) -> &[u8] {
        self.bytes(self.license)
    }

    #[must_use]
    pub fn vendor(&self) -> &[u8] {
        self.bytes(self.vendor)
    }

    #[must_use]
    pub fn group(&self) -> &[u8] {
        self.bytes(self.group)
    }

    #[must_use]
    pub fn build_host(&self) -> &[u8] {
        self.bytes(self.build_host)
    }

    #[must_use]
    pub fn source_rpm(&self) -> &[u8] {
        self.bytes(self.source_rpm)
    }

    #[must_use]
    pub fn packager(&self) -> &[u8] {
        self.bytes(self.packager)
    }

    #[must_use]
    pub const fn build_time(&self) -> u64 {
        self.build_time
    }

    #[must_use]
    pub const fn installed_size(&self) -> u64 {
        self.installed_size
    }

    #[must_use]
    pub const fn archive_size(&self) -> u64 {
        self.archive_size
    }

    /// Header id, only when loading it was requested.
    #[must_use]
    pub fn header_id(&self) -> Option<&[u8]> {
        self.header_id.map(|s| self.bytes(s))
    }

    #[must_use]
    pub fn gpg_signature(&self) -> Option<&[u8]> {
        self.gpg_signature.as_deref()
    }

    #[must_use]
    pub fn pgp_signature(&self) -> Option<&[u8]> {
        self.pgp_signature.as_deref()
    }

    /// Files in header order.
    #[must_use]
    pub fn files(&self) -> &[PackageFile] {
        &self.files
    }

    /// Full path of a file entry.
    #[must_use]
    pub fn file_path(&self, file: &PackageFile) -> Vec<u8> {
        [self.bytes(file.path), self.bytes(file.name)].concat()
    }

    #[must_use]
    pub const fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    /// Changelog in header order, at most the configured number of entries.
    #[must_use]
    pub fn changelog(&self) -> &[ChangelogEntry] {
        &self.changelog
    }

    /// `name-epoch:version-release.arch`
    #[must_use]
    pub fn nevra(&self) -> String {
        format_nevra(
            self.name(),
            self.epoch(),
            self.version(),
            self.release(),
            self.arch(),
        )
    }

    /// `name-version-release.arch`
    #[must_use]
    pub fn nvra(&self) -> String {
        format!(
            "{}-{}-{}.{}",
            self.text(self.name),
            self.text(self.version),
            self.text(self.release),
            self.text(self.arch)
        )
    }
}

/// `name-epoch:version-release.arch`, with an empty epoch rendered as `0`.
pub(crate) fn format_nevra(
    name: &[u8],
    epoch: &[u8],
    version: &[u8],
    release: &[u8],
    arch: &[u8],
) -> String {
    let epoch = if epoch.is_empty() { b"0".as_slice() } else { epoch };
    format!(
        "{}-{}:{}-{}.{}",
        String::from_utf8_lossy(name),
        String::from_utf8_lossy(epoch),
        String::from_utf8_lossy(version),
        String::from_utf8_lossy(release),
        String::from_utf8_lossy(arch)
    )
}
