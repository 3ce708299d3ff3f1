//! Unified error types for repodata-tools.
//!
//! Extraction itself never fails: absent tags fall back to defaults and
//! malformed dependencies are dropped with a warning. The errors here cover
//! the fallible edges around it: loading header dumps, reading configuration,
//! and writing metadata fragments.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for repodata-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RepodataError {
    /// Errors while loading or decoding a header
    #[error("Failed to load header: {context}")]
    Header {
        context: String,
        #[source]
        source: HeaderErrorKind,
    },

    /// Errors while emitting metadata documents
    #[error("Failed to emit metadata: {context}")]
    Emit {
        context: String,
        #[source]
        source: EmitErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific header error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HeaderErrorKind {
    #[error("Unknown header format - expected a header blob or a JSON/YAML dump")]
    UnknownFormat,

    #[error("Malformed header blob: {0}")]
    MalformedBlob(String),

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Unknown tag: {0}")]
    UnknownTag(String),

    #[error("Invalid value for tag '{tag}': {message}")]
    InvalidValue { tag: String, message: String },
}

/// Specific emit error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EmitErrorKind {
    #[error("XML writing failed: {0}")]
    Xml(String),

    #[error("JSON serialization failed: {0}")]
    Json(String),

    #[error("YAML serialization failed: {0}")]
    Yaml(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for repodata-tools operations
pub type Result<T> = std::result::Result<T, RepodataError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl RepodataError {
    /// Create a header error with context
    pub fn header(context: impl Into<String>, source: HeaderErrorKind) -> Self {
        Self::Header {
            context: context.into(),
            source,
        }
    }

    /// Create a header error for an unrecognized tag name
    pub fn unknown_tag(tag: impl Into<String>) -> Self {
        Self::header("resolving tag name", HeaderErrorKind::UnknownTag(tag.into()))
    }

    /// Create a header error for a malformed tag value
    pub fn invalid_value(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::header(
            "decoding tag value",
            HeaderErrorKind::InvalidValue {
                tag: tag.into(),
                message: message.into(),
            },
        )
    }

    /// Create a header error for a structurally invalid header blob
    pub fn malformed_blob(message: impl Into<String>) -> Self {
        Self::header("reading header blob", HeaderErrorKind::MalformedBlob(message.into()))
    }

    /// Create an emit error with context
    pub fn emit(context: impl Into<String>, source: EmitErrorKind) -> Self {
        Self::Emit {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for RepodataError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for RepodataError {
    fn from(err: serde_json::Error) -> Self {
        Self::header(
            "JSON deserialization",
            HeaderErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for RepodataError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::header(
            "YAML deserialization",
            HeaderErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained outermost first, so a failure deep inside a
/// dump load reads like `loading foo.json: decoding tag value`.
///
/// # Example
///
/// ```ignore
/// use repodata_tools::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<HeaderDump> {
///     let content = std::fs::read_to_string(path)
///         .context("reading header dump")?;
///
///     HeaderDump::from_json(&content)
///         .with_context(|| format!("parsing header dump {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    ///
    /// The context string is prepended to the error's existing context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<RepodataError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: RepodataError, new_ctx: &str) -> RepodataError {
    match err {
        RepodataError::Header {
            context: existing,
            source,
        } => RepodataError::Header {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RepodataError::Emit {
            context: existing,
            source,
        } => RepodataError::Emit {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RepodataError::Io {
            path,
            message,
            source,
        } => RepodataError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        RepodataError::Config(msg) => RepodataError::Config(chain_context(new_ctx, &msg)),
        RepodataError::Validation(msg) => {
            RepodataError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
