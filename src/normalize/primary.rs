//! Which file paths belong in primary metadata.
//!
//! Resolvers answer file requirements like `/bin/sh` from primary metadata
//! alone, so the paths listed there (and therefore the requirements a
//! package can satisfy for itself without them appearing in its requires)
//! follow a fixed rule set.

use regex::bytes::RegexSet;

/// Decides whether a path is a canonical ("primary") path.
pub trait PathClassifier {
    fn is_primary(&self, path: &[u8]) -> bool;
}

impl<F> PathClassifier for F
where
    F: Fn(&[u8]) -> bool,
{
    fn is_primary(&self, path: &[u8]) -> bool {
        self(path)
    }
}

/// The standard rules: anything under `/etc/`, anything with `bin/` in it,
/// and `/usr/lib/sendmail`. Extra regular expressions can widen the set.
#[derive(Debug, Clone, Default)]
pub struct PrimaryPaths {
    extra: Option<RegexSet>,
}

impl PrimaryPaths {
    /// The standard rules only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard rules plus the given patterns.
    pub fn with_patterns<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = RegexSet::new(patterns)?;
        Ok(Self {
            extra: (!set.is_empty()).then_some(set),
        })
    }

    /// Whether the standard rules alone accept the path.
    #[must_use]
    pub fn is_standard_primary(path: &[u8]) -> bool {
        path.starts_with(b"/etc/")
            || path == b"/usr/lib/sendmail"
            || path.windows(4).any(|w| w == b"bin/")
    }
}

impl PathClassifier for PrimaryPaths {
    fn is_primary(&self, path: &[u8]) -> bool {
        Self::is_standard_primary(path)
            || self.extra.as_ref().is_some_and(|set| set.is_match(path))
    }
}
