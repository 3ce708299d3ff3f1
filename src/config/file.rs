//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".repodata-tools.yaml",
    ".repodata-tools.yml",
    "repodata-tools.yaml",
    "repodata-tools.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/repodata-tools/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path.filter(|p| p.exists()) {
        return Some(path.to_path_buf());
    }

    let cwd = std::env::current_dir().ok();
    let user_dir = dirs::config_dir().map(|dir| dir.join("repodata-tools"));
    let home = dirs::home_dir();

    [cwd, user_dir, home]
        .into_iter()
        .flatten()
        .find_map(|dir| find_config_in_dir(&dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so CLI arguments
    /// that were not given leave file settings alone.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.extract.changelog_limit != defaults.extract.changelog_limit {
            self.extract.changelog_limit = other.extract.changelog_limit;
        }
        if other.extract.load_header_id {
            self.extract.load_header_id = true;
        }
        if other.extract.load_signatures {
            self.extract.load_signatures = true;
        }
        if other.extract.interpreter_prefix != defaults.extract.interpreter_prefix {
            self.extract
                .interpreter_prefix
                .clone_from(&other.extract.interpreter_prefix);
        }
        self.extract
            .primary_patterns
            .extend(other.extract.primary_patterns.iter().cloned());

        if other.output.format != defaults.output.format {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.primary_only {
            self.output.primary_only = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# repodata-tools configuration
# Place this file at .repodata-tools.yaml in the working directory or ~/.config/repodata-tools/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# repodata-tools Configuration File
# ==================================
#
# Place it at:
#   - .repodata-tools.yaml in the working directory
#   - ~/.config/repodata-tools/repodata-tools.yaml for global config
#
# CLI arguments always override file settings.

# Extraction
extract:
  # Changelog entries kept per package (-1 keeps all)
  changelog_limit: 10
  # Copy the header id into each record
  load_header_id: false
  # Copy GPG/PGP signature blobs into each record
  load_signatures: false
  # Requirements with this prefix collapse to the highest symbol version.
  # An empty string disables the collapse.
  interpreter_prefix: libc.so.6
  # Extra regular expressions for primary paths
  # primary_patterns:
  #   - ^/opt/[^/]+/bin/

# Output
output:
  # Format: json, yaml, filelists
  format: json
  # Output file path (omit for stdout)
  # file: filelists.xml
  # List only primary files in file lists
  primary_only: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::OutputFormat;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".repodata-tools.yaml");
        std::fs::write(&config_path, "extract:\n  changelog_limit: 3\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
extract:
  changelog_limit: -1
  load_signatures: true
  primary_patterns: ['^/opt/']
output:
  format: filelists
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.extract.changelog_limit, -1);
        assert!(config.extract.load_signatures);
        assert_eq!(config.extract.primary_patterns, vec!["^/opt/"]);
        assert_eq!(config.output.format, OutputFormat::Filelists);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "extract: [unclosed\n").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder()
            .changelog_limit(3)
            .primary_pattern("^/srv/")
            .build();
        let overrides = AppConfig::builder()
            .load_header_id(true)
            .primary_pattern("^/opt/")
            .output_format(OutputFormat::Yaml)
            .build();

        base.merge(&overrides);

        assert_eq!(base.extract.changelog_limit, 3);
        assert!(base.extract.load_header_id);
        assert_eq!(base.extract.primary_patterns, vec!["^/srv/", "^/opt/"]);
        assert_eq!(base.output.format, OutputFormat::Yaml);
    }

    #[test]
    fn test_generated_configs_parse() {
        let example = generate_example_config();
        assert!(example.contains("extract:"));
        let parsed: AppConfig = serde_yaml::from_str(&example).unwrap();
        assert_eq!(parsed, AppConfig::default());

        let full: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(full, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "extract:\n  load_header_id: true").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
