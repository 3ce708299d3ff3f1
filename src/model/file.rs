//! Package file manifest entries.

use super::PoolStr;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What kind of filesystem entry a manifest entry is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    #[default]
    Plain,
    Dir,
    /// Listed in metadata but not shipped in the payload.
    Ghost,
}

impl FileKind {
    /// File-type bits of a mode word.
    pub const TYPE_MASK: u64 = 0o170_000;
    /// Directory file type.
    pub const DIRECTORY: u64 = 0o040_000;
    /// Ghost bit of a file flags word.
    pub const GHOST_FLAG: u64 = 1 << 6;

    /// Classify from mode and flags. A directory is reported as such even
    /// when it is also marked ghost.
    #[must_use]
    pub const fn from_mode_and_flags(mode: u64, flags: u64) -> Self {
        if mode & Self::TYPE_MASK == Self::DIRECTORY {
            Self::Dir
        } else if flags & Self::GHOST_FLAG != 0 {
            Self::Ghost
        } else {
            Self::Plain
        }
    }

    /// Value of the `type` attribute in file lists; empty for plain files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Dir => "dir",
            Self::Ghost => "ghost",
        }
    }
}

/// A file shipped (or claimed) by the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageFile {
    /// Base name.
    pub name: PoolStr,
    /// Directory part, including the trailing slash.
    pub path: PoolStr,
    pub kind: FileKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(FileKind::from_mode_and_flags(0o100_644, 0), FileKind::Plain);
        assert_eq!(FileKind::from_mode_and_flags(0o040_755, 0), FileKind::Dir);
        assert_eq!(FileKind::from_mode_and_flags(0o100_644, 1 << 6), FileKind::Ghost);
        assert_eq!(
            FileKind::from_mode_and_flags(0o040_755, 1 << 6),
            FileKind::Dir,
            "directory beats ghost"
        );
        // Symlinks share bits with directories but are not directories.
        assert_eq!(FileKind::from_mode_and_flags(0o120_777, 0), FileKind::Plain);
    }

    #[test]
    fn test_type_attribute() {
        assert_eq!(FileKind::Plain.as_str(), "");
        assert_eq!(FileKind::Dir.as_str(), "dir");
        assert_eq!(FileKind::Ghost.as_str(), "ghost");
    }
}
