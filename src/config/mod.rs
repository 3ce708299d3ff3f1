//! Configuration for repodata-tools.
//!
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use repodata_tools::config::{AppConfig, ConfigPreset};
//!
//! let config = AppConfig::from_preset(ConfigPreset::Full);
//! assert_eq!(config.extract.changelog_limit, -1);
//!
//! let config = AppConfig::builder()
//!     .changelog_limit(5)
//!     .load_header_id(true)
//!     .build();
//! assert!(config.extract.load_header_id);
//! ```
//!
//! # Configuration File
//!
//! Place a `.repodata-tools.yaml` file in the working directory or
//! `~/.config/repodata-tools/`:
//!
//! ```yaml
//! extract:
//!   changelog_limit: -1
//!   load_signatures: true
//! output:
//!   format: filelists
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_CHANGELOG_LIMIT, DEFAULT_INTERPRETER_PREFIX};
pub use types::{AppConfig, AppConfigBuilder, ExtractConfig, OutputConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.repodata-tools.yaml` config files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

/// Generate a JSON Schema for the extracted record document.
#[must_use]
pub fn generate_record_schema() -> String {
    let schema = schemars::schema_for!(crate::model::RecordDocument);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
