//! Configuration validation for repodata-tools.

use super::types::{AppConfig, ExtractConfig, OutputConfig};
use crate::pipeline::OutputFormat;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.extract.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ExtractConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.changelog_limit < -1 {
            errors.push(ConfigError {
                field: "extract.changelog_limit".to_string(),
                message: format!(
                    "Changelog limit must be -1 (unlimited) or non-negative, got {}",
                    self.changelog_limit
                ),
            });
        }

        if self.interpreter_prefix.contains('(') {
            errors.push(ConfigError {
                field: "extract.interpreter_prefix".to_string(),
                message: format!(
                    "Interpreter prefix '{}' must not include a symbol version clause",
                    self.interpreter_prefix
                ),
            });
        }

        for (i, pattern) in self.primary_patterns.iter().enumerate() {
            if let Err(e) = regex::bytes::Regex::new(pattern) {
                errors.push(ConfigError {
                    field: format!("extract.primary_patterns[{i}]"),
                    message: format!("Invalid pattern '{pattern}': {e}"),
                });
            }
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError {
                        field: "output.file".to_string(),
                        message: format!(
                            "Parent directory does not exist: {}",
                            parent.display()
                        ),
                    });
                }
            }
        }

        if self.primary_only && self.format != OutputFormat::Filelists {
            errors.push(ConfigError {
                field: "output.primary_only".to_string(),
                message: format!(
                    "primary_only only applies to the filelists format, not {}",
                    self.format
                ),
            });
        }

        errors
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_changelog_limit_validation() {
        for limit in [-1, 0, 10, 5000] {
            let config = ExtractConfig {
                changelog_limit: limit,
                ..ExtractConfig::default()
            };
            assert!(config.is_valid(), "limit {limit}");
        }

        let invalid = ExtractConfig {
            changelog_limit: -2,
            ..ExtractConfig::default()
        };
        let errors = invalid.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "extract.changelog_limit");
    }

    #[test]
    fn test_interpreter_prefix_validation() {
        let empty = ExtractConfig {
            interpreter_prefix: String::new(),
            ..ExtractConfig::default()
        };
        assert!(empty.is_valid());

        let clause = ExtractConfig {
            interpreter_prefix: "libc.so.6(GLIBC_2.3)".to_string(),
            ..ExtractConfig::default()
        };
        assert!(!clause.is_valid());
    }

    #[test]
    fn test_primary_pattern_validation() {
        let config = ExtractConfig {
            primary_patterns: vec!["^/opt/".to_string(), "[".to_string()],
            ..ExtractConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "extract.primary_patterns[1]");
    }

    #[test]
    fn test_output_config_validation() {
        let valid = OutputConfig {
            file: Some(PathBuf::from("filelists.xml")),
            format: OutputFormat::Filelists,
            primary_only: true,
        };
        assert!(valid.is_valid());

        let missing_parent = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/out.json")),
            ..OutputConfig::default()
        };
        assert!(!missing_parent.is_valid());

        let primary_json = OutputConfig {
            primary_only: true,
            ..OutputConfig::default()
        };
        assert!(!primary_json.is_valid());
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError {
            field: "test_field".to_string(),
            message: "test error message".to_string(),
        };
        assert_eq!(error.to_string(), "test_field: test error message");
    }

    #[test]
    fn test_app_config_validation() {
        assert!(AppConfig::default().is_valid());

        let mut invalid = AppConfig::default();
        invalid.extract.changelog_limit = -5;
        invalid.output.primary_only = true;
        assert_eq!(invalid.validate().len(), 2);
    }
}
