//! Extraction pipeline: header files in, rendered metadata out.
//!
//! Each input file is either a binary header blob (starts with
//! [`HEADER_MAGIC`] or has a `.hdr` extension) or a JSON/YAML
//! [`HeaderDump`]. Files are extracted in parallel; records keep input order.

mod output;

pub use output::{write_output, OutputFormat, OutputTarget};

use crate::config::OutputConfig;
use crate::error::{EmitErrorKind, ErrorContext, HeaderErrorKind, RepodataError, Result};
use crate::header::{HeaderBlob, HeaderDump, HEADER_MAGIC};
use crate::model::{PackageRecord, RecordDocument};
use crate::normalize::{Extractor, PathClassifier};
use crate::utils::content_hash_hex;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One extracted input file.
#[derive(Debug, Clone)]
pub struct ExtractedPackage {
    pub path: PathBuf,
    /// Content hash of the input file.
    pub pkgid: String,
    pub record: PackageRecord,
}

/// How an input file is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Blob,
    Dump,
}

impl InputKind {
    /// Decide from the file's extension and leading bytes.
    #[must_use]
    pub fn detect(path: &Path, content: &[u8]) -> Self {
        let is_hdr = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("hdr"));
        if is_hdr || content.starts_with(&HEADER_MAGIC) {
            Self::Blob
        } else {
            Self::Dump
        }
    }
}

/// Read and extract a single header file.
pub fn extract_file<C: PathClassifier>(
    path: &Path,
    extractor: &Extractor<C>,
) -> Result<ExtractedPackage> {
    let content = std::fs::read(path).map_err(|e| RepodataError::io(path, e))?;
    let pkgid = content_hash_hex(&content);

    let record = match InputKind::detect(path, &content) {
        InputKind::Blob => {
            let blob = HeaderBlob::parse(&content)
                .with_context(|| format!("reading {}", path.display()))?;
            extractor.extract(&blob)
        }
        InputKind::Dump => {
            let text = std::str::from_utf8(&content).map_err(|_| {
                RepodataError::header(
                    format!("reading {}", path.display()),
                    HeaderErrorKind::UnknownFormat,
                )
            })?;
            let ext = path.extension().and_then(|e| e.to_str());
            let header = HeaderDump::from_str_with_extension(text, ext)
                .and_then(|dump| dump.to_header())
                .with_context(|| format!("loading {}", path.display()))?;
            extractor.extract(&header)
        }
    };

    tracing::info!("Extracted {} from {}", record.nevra(), path.display());

    Ok(ExtractedPackage {
        path: path.to_path_buf(),
        pkgid,
        record,
    })
}

/// Extract several files in parallel. Fails on the first unreadable file.
pub fn extract_many<C>(paths: &[PathBuf], extractor: &Extractor<C>) -> Result<Vec<ExtractedPackage>>
where
    C: PathClassifier + Sync,
{
    let packages: Vec<ExtractedPackage> = paths
        .par_iter()
        .map(|path| extract_file(path, extractor))
        .collect::<Result<_>>()?;

    warn_duplicates(&packages);
    Ok(packages)
}

/// Warn about inputs with identical content.
fn warn_duplicates(packages: &[ExtractedPackage]) {
    let mut seen: HashMap<&str, &Path> = HashMap::with_capacity(packages.len());
    for package in packages {
        if let Some(first) = seen.insert(&package.pkgid, &package.path) {
            tracing::warn!(
                "{} has the same content as {}",
                package.path.display(),
                first.display()
            );
        }
    }
}

/// Render extracted packages in the configured format.
pub fn render<C: PathClassifier>(
    packages: &[ExtractedPackage],
    output: &OutputConfig,
    classifier: &C,
) -> Result<String> {
    match output.format {
        OutputFormat::Json => {
            let docs: Vec<RecordDocument> =
                packages.iter().map(|p| RecordDocument::from(&p.record)).collect();
            serde_json::to_string_pretty(&docs).map_err(|e| {
                RepodataError::emit("rendering records", EmitErrorKind::Json(e.to_string()))
            })
        }
        OutputFormat::Yaml => {
            let docs: Vec<RecordDocument> =
                packages.iter().map(|p| RecordDocument::from(&p.record)).collect();
            serde_yaml::to_string(&docs).map_err(|e| {
                RepodataError::emit("rendering records", EmitErrorKind::Yaml(e.to_string()))
            })
        }
        OutputFormat::Filelists => crate::xml::filelists_document(
            packages.iter().map(|p| (p.pkgid.as_str(), &p.record)),
            output.primary_only.then_some(classifier),
        ),
    }
}
