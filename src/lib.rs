//! **Repository metadata extraction from package headers.**
//!
//! `repodata-tools` turns a single package's raw metadata header into a
//! normalized [`PackageRecord`]: identity and descriptive fields, the file
//! manifest, eight deduplicated dependency lists and a size-limited
//! changelog. Records are then serialized as JSON/YAML documents or written
//! as `filelists` XML.
//!
//! ## Core Concepts & Modules
//!
//! - **[`header`]**: the [`HeaderStore`] trait every reader goes through, with
//!   two adapters: [`HeaderMap`] (in memory, loadable from a JSON/YAML
//!   [`HeaderDump`](header::HeaderDump)) and [`HeaderBlob`] (zero-copy binary
//!   reader).
//! - **[`normalize`]**: the [`Extractor`] and the file, dependency and
//!   changelog normalizers behind it.
//! - **[`version`]**: `rpmvercmp`, EVR parsing and the symbol-version
//!   comparator used to collapse interpreter requirements.
//! - **[`model`]**: [`PackageRecord`] with its string pool, and the
//!   serializable [`RecordDocument`].
//! - **[`xml`]**: the text sanitizer and the `filelists` writer.
//! - **[`pipeline`]**: file loading, parallel extraction and rendering.
//!
//! ## Getting Started
//!
//! ```
//! use repodata_tools::{package_from_header, ExtractOptions, HeaderMap, Tag};
//!
//! let header = HeaderMap::new()
//!     .with_string(Tag::Name, "bash")
//!     .with_string(Tag::Version, "5.2.26")
//!     .with_string(Tag::Release, "3.fc40")
//!     .with_string(Tag::Arch, "x86_64")
//!     .with_strings(Tag::RequireName, ["libc.so.6(GLIBC_2.3)", "libc.so.6(GLIBC_2.34)"])
//!     .with_numbers(Tag::RequireFlags, [0, 0])
//!     .with_strings(Tag::RequireVersion, ["", ""]);
//!
//! let record = package_from_header(&header, &ExtractOptions::default());
//! assert_eq!(record.nevra(), "bash-0:5.2.26-3.fc40.x86_64");
//! assert_eq!(record.dependencies().total(), 1);
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_excessive_bools,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod header;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod utils;
pub mod version;
pub mod xml;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset, ExtractConfig, OutputConfig};
pub use config::{ConfigError, Validatable};
pub use error::{ErrorContext, RepodataError, Result};
pub use header::{HeaderBlob, HeaderDump, HeaderMap, HeaderStore, Tag};
pub use model::{
    ChangelogEntry, Dependencies, Dependency, DependencyKind, FileKind, PackageFile,
    PackageRecord, RecordDocument,
};
pub use normalize::{package_from_header, ChangelogLimit, ExtractOptions, Extractor, PathClassifier, PrimaryPaths};
pub use pipeline::{extract_file, extract_many, render, ExtractedPackage, OutputFormat};
pub use version::{compare_dependency, rpmvercmp, DependencyOrder, Evr};
