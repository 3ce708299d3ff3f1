//! Changelog extraction.

use crate::header::{HeaderStore, Tag};
use crate::model::{ChangelogEntry, StringPool};
use std::collections::HashSet;

/// How many changelog entries to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangelogLimit {
    Unlimited,
    AtMost(usize),
}

impl ChangelogLimit {
    /// Interpret a configured limit: `-1` means unlimited, non-negative
    /// values are a cap, anything else keeps nothing.
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            -1 => Self::Unlimited,
            n => Self::AtMost(usize::try_from(n).unwrap_or(0)),
        }
    }

    #[must_use]
    pub const fn cap(self) -> usize {
        match self {
            Self::Unlimited => usize::MAX,
            Self::AtMost(n) => n,
        }
    }
}

impl Default for ChangelogLimit {
    fn default() -> Self {
        Self::AtMost(crate::config::DEFAULT_CHANGELOG_LIMIT as usize)
    }
}

/// Read up to `limit` changelog entries in header order.
///
/// The time, author and text arrays must all be present. Authors lose
/// trailing spaces (never the first character), and colliding timestamps are
/// bumped forward until every entry has its own.
pub fn normalize_changelog<H>(
    header: &H,
    limit: ChangelogLimit,
    pool: &mut StringPool,
) -> Vec<ChangelogEntry>
where
    H: HeaderStore + ?Sized,
{
    let (Some(times), Some(names), Some(texts)) = (
        header.number_array(Tag::ChangelogTime),
        header.string_array(Tag::ChangelogName),
        header.string_array(Tag::ChangelogText),
    ) else {
        return Vec::new();
    };

    let count = times
        .len()
        .min(names.len())
        .min(texts.len())
        .min(limit.cap());

    let mut dates = times[..count].to_vec();
    make_times_unique(&mut dates);

    dates
        .into_iter()
        .zip(names)
        .zip(texts)
        .map(|((date, author), text)| ChangelogEntry {
            author: pool.insert(trim_author(author)),
            date,
            text: pool.insert(text),
        })
        .collect()
}

/// Strip trailing spaces from an author line, keeping at least the first
/// byte.
#[must_use]
pub fn trim_author(author: &[u8]) -> &[u8] {
    let mut end = author.len();
    while end > 1 && author[end - 1] == b' ' {
        end -= 1;
    }
    &author[..end]
}

/// Give every entry a distinct timestamp without reordering.
///
/// Each timestamp already taken by an earlier entry is moved to the next
/// free second after it. Entries whose timestamps were distinct keep them.
pub fn make_times_unique(times: &mut [u64]) {
    let mut used = HashSet::with_capacity(times.len());
    for time in times.iter_mut() {
        let mut candidate = *time;
        while used.contains(&candidate) {
            candidate = candidate.wrapping_add(1);
        }
        used.insert(candidate);
        *time = candidate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HeaderMap;

    fn header(times: &[u64], authors: &[&str]) -> HeaderMap {
        let texts: Vec<String> = (0..times.len()).map(|i| format!("- change {i}")).collect();
        HeaderMap::new()
            .with_numbers(Tag::ChangelogTime, times.iter().copied())
            .with_strings(Tag::ChangelogName, authors)
            .with_strings(Tag::ChangelogText, &texts)
    }

    #[test]
    fn test_limit_from_raw() {
        assert_eq!(ChangelogLimit::from_raw(-1), ChangelogLimit::Unlimited);
        assert_eq!(ChangelogLimit::from_raw(0), ChangelogLimit::AtMost(0));
        assert_eq!(ChangelogLimit::from_raw(5), ChangelogLimit::AtMost(5));
        assert_eq!(ChangelogLimit::from_raw(-7), ChangelogLimit::AtMost(0));
    }

    #[test]
    fn test_colliding_times_are_bumped() {
        let mut times = vec![1000, 1000, 1001];
        make_times_unique(&mut times);
        assert_eq!(times, vec![1000, 1001, 1002]);

        let mut times = vec![1001, 1000, 1000];
        make_times_unique(&mut times);
        assert_eq!(times, vec![1001, 1000, 1002]);
    }

    #[test]
    fn test_trim_author() {
        assert_eq!(trim_author(b"Jane Doe <jane@example.com> - 1.0-1   "), b"Jane Doe <jane@example.com> - 1.0-1");
        assert_eq!(trim_author(b" "), b" ");
        assert_eq!(trim_author(b"   "), b" ");
        assert_eq!(trim_author(b""), b"");
    }

    #[test]
    fn test_limit_applies_in_header_order() {
        let header = header(&[3000, 2000, 1000], &["c ", "b", "a"]);
        let mut pool = StringPool::new();
        let entries = normalize_changelog(&header, ChangelogLimit::AtMost(2), &mut pool);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, 3000);
        assert_eq!(pool.get(entries[0].author), b"c");
        assert_eq!(pool.get(entries[1].text), b"- change 1");
    }

    #[test]
    fn test_zero_and_unlimited() {
        let header = header(&[1, 2, 3], &["a", "b", "c"]);
        let mut pool = StringPool::new();
        assert!(normalize_changelog(&header, ChangelogLimit::AtMost(0), &mut pool).is_empty());
        assert_eq!(
            normalize_changelog(&header, ChangelogLimit::Unlimited, &mut pool).len(),
            3
        );
    }

    #[test]
    fn test_missing_array_means_no_changelog() {
        let mut header = header(&[1], &["a"]);
        header.remove(Tag::ChangelogText);
        let mut pool = StringPool::new();
        assert!(normalize_changelog(&header, ChangelogLimit::Unlimited, &mut pool).is_empty());
    }
}
