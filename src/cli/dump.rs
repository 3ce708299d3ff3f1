//! Dump and encode command handlers.
//!
//! `dump` turns any readable header (blob or dump document) into a JSON or
//! YAML dump; `encode` turns a dump back into a binary blob.

use crate::header::{encode_blob, HeaderBlob, HeaderDump, HeaderMap};
use crate::pipeline::{write_output, InputKind, OutputTarget};
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Output format for header dumps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    #[default]
    Yaml,
    Json,
}

fn read_header(path: &Path) -> Result<HeaderMap> {
    let content =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let header = match InputKind::detect(path, &content) {
        InputKind::Blob => HeaderMap::from_store(&HeaderBlob::parse(&content)?),
        InputKind::Dump => HeaderDump::load(path)?.to_header()?,
    };
    Ok(header)
}

/// Run the dump command
pub fn run_dump(path: &Path, format: DumpFormat, output_file: Option<PathBuf>) -> Result<()> {
    let dump = HeaderDump::from_header(&read_header(path)?);
    let rendered = match format {
        DumpFormat::Yaml => serde_yaml::to_string(&dump).context("failed to serialize dump")?,
        DumpFormat::Json => {
            serde_json::to_string_pretty(&dump).context("failed to serialize dump")?
        }
    };
    write_output(&rendered, &OutputTarget::from_option(output_file))?;
    Ok(())
}

/// Run the encode command
pub fn run_encode(path: &Path, output_file: &Path) -> Result<()> {
    let header = read_header(path)?;
    let blob = encode_blob(&header)?;
    std::fs::write(output_file, blob)
        .with_context(|| format!("failed to write {}", output_file.display()))?;
    tracing::info!(
        "Encoded {} tags from {} into {}",
        header.len(),
        path.display(),
        output_file.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{HeaderStore, Tag};
    use tempfile::TempDir;

    #[test]
    fn test_encode_then_dump() {
        let tmp = TempDir::new().unwrap();
        let yaml = tmp.path().join("pkg.yaml");
        std::fs::write(&yaml, "NAME: pkg\nREQUIRENAME: [a, b]\nREQUIREFLAGS: [0, 8]\n").unwrap();
        let blob = tmp.path().join("pkg.hdr");
        run_encode(&yaml, &blob).unwrap();

        let header = read_header(&blob).unwrap();
        assert_eq!(header.get_string(Tag::Name), b"pkg");
        assert_eq!(header.number_array(Tag::RequireFlags), Some(vec![0, 8]));

        let out = tmp.path().join("pkg.json");
        run_dump(&blob, DumpFormat::Json, Some(out.clone())).unwrap();
        let dump = HeaderDump::load(&out).unwrap();
        assert_eq!(dump.to_header().unwrap(), header);
    }
}
