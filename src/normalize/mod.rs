//! Header to [`PackageRecord`] normalization.
//!
//! [`Extractor`] reads a header through [`HeaderStore`] and produces an
//! immutable record: package identity and descriptive fields, the file
//! manifest, the eight dependency lists and a size-limited changelog.
//!
//! Extraction never fails. Missing tags read as empty or zero, malformed
//! entries are dropped with a warning.

mod changelog;
mod dependencies;
mod files;
mod primary;
mod registry;

pub use changelog::{make_times_unique, normalize_changelog, trim_author, ChangelogLimit};
pub use dependencies::{normalize_dependencies, DependencyContext};
pub use files::{build_file_manifest, FileManifest};
pub use primary::{PathClassifier, PrimaryPaths};
pub use registry::{relation_spec, RelationSpec, SourceRelation, PRE_FLAGS, RELATIONS, STRONG_FLAG};

use crate::config::DEFAULT_INTERPRETER_PREFIX;
use crate::header::{HeaderStore, Tag};
use crate::model::{format_nevra, PackageRecord, StringPool};

/// Knobs for a single extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub changelog_limit: ChangelogLimit,
    /// Load the header id into the record.
    pub load_header_id: bool,
    /// Load the GPG/PGP signature blobs into the record.
    pub load_signatures: bool,
    /// Requirements starting with this prefix collapse to the highest
    /// symbol version. Empty disables the collapse.
    pub interpreter_prefix: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            changelog_limit: ChangelogLimit::default(),
            load_header_id: false,
            load_signatures: false,
            interpreter_prefix: DEFAULT_INTERPRETER_PREFIX.to_string(),
        }
    }
}

/// Turns headers into package records.
///
/// The classifier decides which file paths count as primary; requirements
/// on primary paths the package ships itself are dropped.
#[derive(Debug, Clone, Default)]
pub struct Extractor<C = PrimaryPaths> {
    options: ExtractOptions,
    classifier: C,
}

impl Extractor<PrimaryPaths> {
    /// Extractor with the standard primary path rules.
    #[must_use]
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            classifier: PrimaryPaths::new(),
        }
    }
}

impl<C: PathClassifier> Extractor<C> {
    /// Extractor with a custom primary path classifier.
    #[must_use]
    pub fn with_classifier(options: ExtractOptions, classifier: C) -> Self {
        Self {
            options,
            classifier,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Build a record from a header.
    pub fn extract<H: HeaderStore + ?Sized>(&self, header: &H) -> PackageRecord {
        let mut pool = StringPool::with_capacity(4096);

        let arch = if header.get_number(Tag::SourcePackage) != 0 {
            &b"src"[..]
        } else {
            header.get_string(Tag::Arch)
        };
        let epoch = header.get_number(Tag::Epoch).to_string();

        let nevra = format_nevra(
            header.get_string(Tag::Name),
            epoch.as_bytes(),
            header.get_string(Tag::Version),
            header.get_string(Tag::Release),
            arch,
        );

        let manifest = build_file_manifest(header, &mut pool, &nevra);
        let ctx = DependencyContext {
            manifest: &manifest,
            classifier: &self.classifier,
            interpreter_prefix: self.options.interpreter_prefix.as_bytes(),
            nevra: &nevra,
        };
        let dependencies = normalize_dependencies(header, &ctx, &mut pool);
        let changelog = normalize_changelog(header, self.options.changelog_limit, &mut pool);

        let header_id = if self.options.load_header_id {
            pool.insert_opt(header.get_optional_string(Tag::HeaderId))
        } else {
            None
        };
        let (gpg_signature, pgp_signature) = if self.options.load_signatures {
            (
                header.binary(Tag::SigGpg).filter(|b| !b.is_empty()).map(<[u8]>::to_vec),
                header.binary(Tag::SigPgp).filter(|b| !b.is_empty()).map(<[u8]>::to_vec),
            )
        } else {
            (None, None)
        };

        tracing::debug!(
            "Extracted {}: {} files, {} dependencies, {} changelog entries",
            nevra,
            manifest.len(),
            dependencies.total(),
            changelog.len()
        );

        PackageRecord {
            name: pool.insert(header.get_string(Tag::Name)),
            arch: pool.insert(arch),
            epoch: pool.insert(epoch.as_bytes()),
            version: pool.insert(header.get_string(Tag::Version)),
            release: pool.insert(header.get_string(Tag::Release)),
            summary: pool.insert(header.get_string(Tag::Summary)),
            description: pool.insert_opt(header.get_optional_string(Tag::Description)),
            url: pool.insert(header.get_string(Tag::Url)),
            license: pool.insert(header.get_string(Tag::License)),
            vendor: pool.insert(header.get_string(Tag::Vendor)),
            group: pool.insert(header.get_string(Tag::Group)),
            build_host: pool.insert(header.get_string(Tag::BuildHost)),
            source_rpm: pool.insert(header.get_string(Tag::SourceRpm)),
            packager: pool.insert(header.get_string(Tag::Packager)),
            build_time: header.get_number(Tag::BuildTime),
            installed_size: header.get_number(Tag::Size),
            archive_size: header.get_number(Tag::ArchiveSize),
            header_id,
            gpg_signature,
            pgp_signature,
            files: manifest.files,
            dependencies,
            changelog,
            pool,
        }
    }
}

/// Extract a record with the standard primary path rules.
#[must_use]
pub fn package_from_header<H: HeaderStore + ?Sized>(
    header: &H,
    options: &ExtractOptions,
) -> PackageRecord {
    Extractor::new(options.clone()).extract(header)
}
