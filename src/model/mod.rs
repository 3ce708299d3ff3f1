//! The normalized package record and its parts.
//!
//! A [`PackageRecord`] owns a [`StringPool`]; files, dependencies and
//! changelog entries refer into it with [`PoolStr`] handles.
//! [`RecordDocument`] is the owned, sanitized form used for serialization.

mod changelog;
mod dependency;
mod document;
mod file;
mod pool;
mod record;

pub use changelog::ChangelogEntry;
pub use dependency::{Comparison, Dependencies, Dependency, DependencyKind};
pub use document::{
    ChangelogDocument, DependencyDocument, DependencyListDocument, FileDocument, RecordDocument,
};
pub use file::{FileKind, PackageFile};
pub use pool::{PoolStr, StringPool};
pub use record::PackageRecord;
pub(crate) use record::format_nevra;
