//! Default values and named presets.

use super::types::{AppConfig, ExtractConfig, OutputConfig};

/// Changelog entries kept per package unless configured otherwise.
pub const DEFAULT_CHANGELOG_LIMIT: i64 = 10;

/// Requirements starting with this prefix collapse to the highest symbol
/// version.
pub const DEFAULT_INTERPRETER_PREFIX: &str = "libc.so.6";

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Repository defaults: short changelog, no optional loads
    Default,
    /// Everything the header has: full changelog, header id and signatures
    Full,
    /// Smallest records: no changelog
    Minimal,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Full => "full",
            Self::Minimal => "minimal",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "repo" => Some(Self::Default),
            "full" | "all" => Some(Self::Full),
            "minimal" | "min" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Last 10 changelog entries, no header id or signatures",
            Self::Full => "Complete changelog plus header id and signature blobs",
            Self::Minimal => "No changelog, no optional fields",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Full, Self::Minimal]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Full => Self::full_preset(),
            ConfigPreset::Minimal => Self::minimal_preset(),
        }
    }

    /// Full preset.
    #[must_use]
    pub fn full_preset() -> Self {
        Self {
            extract: ExtractConfig {
                changelog_limit: -1,
                load_header_id: true,
                load_signatures: true,
                ..ExtractConfig::default()
            },
            output: OutputConfig::default(),
        }
    }

    /// Minimal preset.
    #[must_use]
    pub fn minimal_preset() -> Self {
        Self {
            extract: ExtractConfig {
                changelog_limit: 0,
                ..ExtractConfig::default()
            },
            output: OutputConfig::default(),
        }
    }
}
