//! Pipeline, CLI handler and config file tests.

use repodata_tools::cli::{run_dump, run_encode, run_extract, DumpFormat};
use repodata_tools::config::{load_config_file, AppConfig};
use repodata_tools::header::{HeaderBlob, HeaderDump, HeaderStore, Tag};
use repodata_tools::model::RecordDocument;
use repodata_tools::normalize::{ExtractOptions, Extractor, PrimaryPaths};
use repodata_tools::pipeline::{extract_many, render, InputKind};
use repodata_tools::{OutputConfig, OutputFormat};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixtures() -> Vec<PathBuf> {
    vec![
        Path::new(FIXTURES_DIR).join("bash.yaml"),
        Path::new(FIXTURES_DIR).join("hello.src.json"),
    ]
}

fn output(format: OutputFormat) -> OutputConfig {
    OutputConfig {
        format,
        ..OutputConfig::default()
    }
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_extract_many_keeps_input_order() {
    let extractor = Extractor::new(ExtractOptions::default());
    let packages = extract_many(&fixtures(), &extractor).unwrap();

    let nevras: Vec<_> = packages.iter().map(|p| p.record.nevra()).collect();
    assert_eq!(nevras, vec!["bash-0:5.2.26-3.fc40.x86_64", "hello-2:2.12.1-4.fc40.src"]);
    assert_eq!(packages[0].pkgid.len(), 16);
    assert_ne!(packages[0].pkgid, packages[1].pkgid);
}

#[test]
fn test_extract_many_fails_on_missing_file() {
    let extractor = Extractor::new(ExtractOptions::default());
    let mut paths = fixtures();
    paths.push(PathBuf::from("/nonexistent/pkg.hdr"));
    assert!(extract_many(&paths, &extractor).is_err());
}

#[test]
fn test_render_json_and_yaml() {
    let extractor = Extractor::new(ExtractOptions::default());
    let packages = extract_many(&fixtures(), &extractor).unwrap();
    let classifier = PrimaryPaths::new();

    let json = render(&packages, &output(OutputFormat::Json), &classifier).unwrap();
    let docs: Vec<RecordDocument> = serde_json::from_str(&json).unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[1].arch, "src");

    let yaml = render(&packages, &output(OutputFormat::Yaml), &classifier).unwrap();
    let from_yaml: Vec<RecordDocument> = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(from_yaml, docs);
}

#[test]
fn test_render_filelists() {
    let extractor = Extractor::new(ExtractOptions::default());
    let packages = extract_many(&fixtures(), &extractor).unwrap();
    let classifier = PrimaryPaths::new();

    let xml = render(&packages, &output(OutputFormat::Filelists), &classifier).unwrap();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains(r#"packages="2""#));
    assert!(xml.contains(&format!(r#"pkgid="{}""#, packages[0].pkgid)));
    assert!(xml.contains(r#"<version epoch="0" ver="5.2.26" rel="3.fc40"/>"#));
    assert!(xml.contains("<file>/usr/share/doc/bash/README</file>"));
    assert!(!xml.contains("<file>/usr/share/doc/bash/</file>"));

    let primary = OutputConfig {
        primary_only: true,
        ..output(OutputFormat::Filelists)
    };
    let xml = render(&packages, &primary, &classifier).unwrap();
    assert!(xml.contains("<file>/usr/bin/bash</file>"));
    assert!(xml.contains("<file>/etc/skel/.bashrc</file>"));
    assert!(!xml.contains("README"));
}

// ============================================================================
// CLI handlers
// ============================================================================

#[test]
fn test_run_extract_to_file() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("records.json");
    let config = AppConfig::builder()
        .changelog_limit(-1)
        .output_file(Some(out.clone()))
        .build();

    run_extract(&fixtures(), &config).unwrap();

    let docs: Vec<RecordDocument> =
        serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(docs[0].changelog.len(), 3);
}

#[test]
fn test_dump_encode_extract_agree() {
    let tmp = TempDir::new().unwrap();
    let source = Path::new(FIXTURES_DIR).join("bash.yaml");
    let blob_path = tmp.path().join("bash.hdr");
    let dump_path = tmp.path().join("bash.json");

    run_encode(&source, &blob_path).unwrap();
    let bytes = std::fs::read(&blob_path).unwrap();
    assert_eq!(InputKind::detect(&blob_path, &bytes), InputKind::Blob);
    let blob = HeaderBlob::parse(&bytes).unwrap();
    assert_eq!(blob.get_string(Tag::Name), b"bash");

    run_dump(&blob_path, DumpFormat::Json, Some(dump_path.clone())).unwrap();
    let reloaded = HeaderDump::load(&dump_path).unwrap().to_header().unwrap();
    let original = HeaderDump::load(&source).unwrap().to_header().unwrap();
    assert_eq!(reloaded.get(Tag::RequireName), original.get(Tag::RequireName));
    assert_eq!(reloaded.get(Tag::ChangelogName), original.get(Tag::ChangelogName));

    let extractor = Extractor::new(ExtractOptions::default());
    let packages = extract_many(&[source, blob_path, dump_path], &extractor).unwrap();
    let docs: Vec<_> = packages.iter().map(|p| RecordDocument::from(&p.record)).collect();
    assert_eq!(docs[0], docs[1]);
    assert_eq!(docs[1], docs[2]);
}

// ============================================================================
// Config files
// ============================================================================

#[test]
fn test_config_file_drives_extraction() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join(".repodata-tools.yaml");
    std::fs::write(
        &config_path,
        "extract:\n  changelog_limit: 1\n  interpreter_prefix: \"\"\noutput:\n  format: yaml\n",
    )
    .unwrap();

    let config = load_config_file(&config_path).unwrap();
    assert_eq!(config.output.format, OutputFormat::Yaml);

    let extractor = config.extract.extractor().unwrap();
    let packages = extract_many(&fixtures()[..1], &extractor).unwrap();
    let doc = RecordDocument::from(&packages[0].record);

    assert_eq!(doc.changelog.len(), 1);
    // Without the collapse every libc requirement survives.
    let libc = doc
        .dependencies_of(repodata_tools::DependencyKind::Requires)
        .iter()
        .filter(|d| d.name.starts_with("libc.so.6"))
        .count();
    assert_eq!(libc, 4);
}

#[test]
fn test_cli_overrides_win_over_file() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("repodata-tools.yml");
    std::fs::write(&config_path, "extract:\n  changelog_limit: 3\n  load_header_id: true\n").unwrap();

    let overrides = AppConfig::builder().changelog_limit(5).build();
    let (config, loaded_from) = AppConfig::from_file_with_overrides(Some(&config_path), &overrides);

    assert_eq!(loaded_from.as_deref(), Some(config_path.as_path()));
    assert_eq!(config.extract.changelog_limit, 5);
    assert!(config.extract.load_header_id);
}
