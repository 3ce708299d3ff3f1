//! `epoch:version-release` parsing.

use std::fmt;

/// Epoch component of a parsed EVR string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Epoch<'a> {
    /// No epoch, or an empty one (`:1.0`).
    Absent,
    /// All-digit epoch.
    Numeric(&'a [u8]),
    /// An epoch containing anything but ASCII digits.
    Invalid,
}

/// Borrowed view of an `epoch:version-release` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evr<'a> {
    pub epoch: Epoch<'a>,
    pub version: Option<&'a [u8]>,
    pub release: Option<&'a [u8]>,
}

impl<'a> Evr<'a> {
    /// Split an EVR string.
    ///
    /// The epoch is whatever precedes the first `:`, the release whatever
    /// follows the last `-`. Empty input parses to all-absent fields.
    ///
    /// ```
    /// use repodata_tools::version::{Epoch, Evr};
    ///
    /// let evr = Evr::parse(b"7:1.2-3");
    /// assert_eq!(evr.epoch, Epoch::Numeric(b"7"));
    /// assert_eq!(evr.version, Some(&b"1.2"[..]));
    /// assert_eq!(evr.release, Some(&b"3"[..]));
    ///
    /// assert_eq!(Evr::parse(b"x:1.2-3").epoch, Epoch::Invalid);
    /// ```
    #[must_use]
    pub fn parse(s: &'a [u8]) -> Self {
        if s.is_empty() {
            return Self {
                epoch: Epoch::Absent,
                version: None,
                release: None,
            };
        }

        let (epoch, rest) = match s.iter().position(|&c| c == b':') {
            Some(colon) => {
                let raw = &s[..colon];
                let epoch = if raw.is_empty() {
                    Epoch::Absent
                } else if raw.iter().all(u8::is_ascii_digit) {
                    Epoch::Numeric(raw)
                } else {
                    Epoch::Invalid
                };
                (epoch, &s[colon + 1..])
            }
            None => (Epoch::Absent, s),
        };

        let (version, release) = match rest.iter().rposition(|&c| c == b'-') {
            Some(dash) => (&rest[..dash], Some(&rest[dash + 1..])),
            None => (rest, None),
        };

        Self {
            epoch,
            version: Some(version),
            release,
        }
    }

    /// `false` only when an epoch was present and not numeric.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !matches!(self.epoch, Epoch::Invalid)
    }

    /// The epoch as stored in a dependency: the digits when given, `0` when
    /// a version is present without one, absent for an empty string.
    #[must_use]
    pub fn epoch_or_default(&self) -> Option<&'a [u8]> {
        match (self.epoch, self.version) {
            (Epoch::Numeric(digits), _) => Some(digits),
            (Epoch::Absent, Some(_)) => Some(&b"0"[..]),
            _ => None,
        }
    }
}

impl fmt::Display for Evr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(epoch) = self.epoch_or_default() {
            write!(f, "{}:", String::from_utf8_lossy(epoch))?;
        }
        if let Some(version) = self.version {
            f.write_str(&String::from_utf8_lossy(version))?;
        }
        if let Some(release) = self.release {
            write!(f, "-{}", String::from_utf8_lossy(release))?;
        }
        Ok(())
    }
}
