//! Extract command handler.

use crate::config::{AppConfig, Validatable};
use crate::pipeline::{extract_many, render, write_output, OutputTarget};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Run the extract command
pub fn run_extract(paths: &[PathBuf], config: &AppConfig) -> Result<()> {
    if paths.is_empty() {
        bail!("no header files given");
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let list: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("invalid configuration:\n  {}", list.join("\n  "));
    }

    let classifier = config.extract.classifier()?;
    let extractor = config.extract.extractor()?;

    let packages = extract_many(paths, &extractor).context("extraction failed")?;
    tracing::info!("Extracted {} package(s)", packages.len());

    let rendered = render(&packages, &config.output, &classifier)?;
    write_output(&rendered, &OutputTarget::from_option(config.output.file.clone()))?;
    Ok(())
}
