//! Changelog entries.

use super::PoolStr;

/// One changelog entry. Dates are seconds since the epoch and unique within
/// a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub author: PoolStr,
    pub date: u64,
    pub text: PoolStr,
}
