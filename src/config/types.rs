//! Configuration types for repodata-tools.

use super::defaults::{DEFAULT_CHANGELOG_LIMIT, DEFAULT_INTERPRETER_PREFIX};
use crate::error::{RepodataError, Result};
use crate::normalize::{ChangelogLimit, ExtractOptions, Extractor, PrimaryPaths};
use crate::pipeline::OutputFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loaded from a config file and/or CLI arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// What to extract from each header
    pub extract: ExtractConfig,
    /// Where and how to write the result
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the changelog limit (`-1` for unlimited).
    pub const fn changelog_limit(mut self, limit: i64) -> Self {
        self.config.extract.changelog_limit = limit;
        self
    }

    /// Load the header id.
    pub const fn load_header_id(mut self, load: bool) -> Self {
        self.config.extract.load_header_id = load;
        self
    }

    /// Load signature blobs.
    pub const fn load_signatures(mut self, load: bool) -> Self {
        self.config.extract.load_signatures = load;
        self
    }

    /// Set the interpreter prefix; empty disables the collapse.
    pub fn interpreter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.extract.interpreter_prefix = prefix.into();
        self
    }

    /// Add a primary path pattern.
    pub fn primary_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.extract.primary_patterns.push(pattern.into());
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Only list primary files in file lists.
    pub const fn primary_only(mut self, primary_only: bool) -> Self {
        self.config.output.primary_only = primary_only;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Extraction Configuration
// ============================================================================

/// Extraction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExtractConfig {
    /// Changelog entries to keep per package; `-1` keeps all
    pub changelog_limit: i64,
    /// Load the header id into each record
    pub load_header_id: bool,
    /// Load GPG/PGP signature blobs into each record
    pub load_signatures: bool,
    /// Requirements starting with this prefix collapse to the one with the
    /// highest symbol version; empty disables the collapse
    pub interpreter_prefix: String,
    /// Extra regular expressions for primary paths, on top of the standard
    /// rules
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub primary_patterns: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            changelog_limit: DEFAULT_CHANGELOG_LIMIT,
            load_header_id: false,
            load_signatures: false,
            interpreter_prefix: DEFAULT_INTERPRETER_PREFIX.to_string(),
            primary_patterns: Vec::new(),
        }
    }
}

impl ExtractConfig {
    /// Options for a single extraction.
    #[must_use]
    pub fn to_options(&self) -> ExtractOptions {
        ExtractOptions {
            changelog_limit: ChangelogLimit::from_raw(self.changelog_limit),
            load_header_id: self.load_header_id,
            load_signatures: self.load_signatures,
            interpreter_prefix: self.interpreter_prefix.clone(),
        }
    }

    /// Primary path classifier with the configured extra patterns.
    pub fn classifier(&self) -> Result<PrimaryPaths> {
        PrimaryPaths::with_patterns(&self.primary_patterns)
            .map_err(|e| RepodataError::config(format!("invalid primary path pattern: {e}")))
    }

    /// Extractor for this configuration.
    pub fn extractor(&self) -> Result<Extractor> {
        Ok(Extractor::with_classifier(self.to_options(), self.classifier()?))
    }
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// List only primary files in file lists
    pub primary_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .changelog_limit(-1)
            .load_header_id(true)
            .interpreter_prefix("ld-linux")
            .primary_pattern("^/opt/")
            .output_format(OutputFormat::Filelists)
            .primary_only(true)
            .build();

        assert_eq!(config.extract.changelog_limit, -1);
        assert!(config.extract.load_header_id);
        assert!(!config.extract.load_signatures);
        assert_eq!(config.extract.primary_patterns, vec!["^/opt/"]);
        assert_eq!(config.output.format, OutputFormat::Filelists);
        assert!(config.output.primary_only);
    }

    #[test]
    fn test_to_options() {
        let options = ExtractConfig {
            changelog_limit: -1,
            interpreter_prefix: String::new(),
            ..ExtractConfig::default()
        }
        .to_options();

        assert_eq!(options.changelog_limit, ChangelogLimit::Unlimited);
        assert!(options.interpreter_prefix.is_empty());
        assert_eq!(ExtractConfig::default().to_options(), ExtractOptions::default());
    }

    #[test]
    fn test_classifier_uses_patterns() {
        use crate::normalize::PathClassifier;

        let config = AppConfig::builder().primary_pattern("^/opt/app/").build();
        let classifier = config.extract.classifier().unwrap();
        assert!(classifier.is_primary(b"/opt/app/data"));
        assert!(classifier.is_primary(b"/usr/bin/ls"));
        assert!(!classifier.is_primary(b"/usr/share/doc/README"));

        let broken = AppConfig::builder().primary_pattern("(").build();
        assert!(broken.extract.classifier().is_err());
    }

    #[test]
    fn test_yaml_defaults_fill_missing_fields() {
        let config: AppConfig = serde_yaml::from_str("extract:\n  load_signatures: true\n").unwrap();
        assert!(config.extract.load_signatures);
        assert_eq!(config.extract.changelog_limit, DEFAULT_CHANGELOG_LIMIT);
        assert_eq!(config.output, OutputConfig::default());
    }
}
