//! Ordering of dependency names by their parenthesized symbol version.
//!
//! Interpreter requirements such as `libc.so.6(GLIBC_2.14)(64bit)` share a
//! prefix and differ only in the symbol-version clause. Only the highest one
//! is worth keeping in a package's requirement list.

use super::rpmvercmp;
use std::cmp::Ordering;

/// Result of comparing two dependency names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyOrder {
    Equal,
    FirstWins,
    SecondWins,
    /// Neither name has a closed clause.
    Malformed,
}

impl From<Ordering> for DependencyOrder {
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => Self::SecondWins,
            Ordering::Equal => Self::Equal,
            Ordering::Greater => Self::FirstWins,
        }
    }
}

/// Compare the symbol-version clauses of two dependency names.
///
/// Each name is scanned for its first `(...)` clause. A name that has a
/// clause beats one without; a closed clause beats an unclosed one; a
/// non-empty clause beats an empty one. When both clauses are present, the
/// text from the first digit up to the `)` is compared with [`rpmvercmp`];
/// a clause with a digit beats one without. When neither clause carries a
/// digit the comparison moves on to the next clause of each name, so
/// `ld.so(X)(Y_2)` ranks above plain `ld.so(X)`.
///
/// ```
/// use repodata_tools::version::{compare_dependency, DependencyOrder};
///
/// assert_eq!(
///     compare_dependency(b"libc.so.6(GLIBC_2.3)", b"libc.so.6(GLIBC_2.14)"),
///     DependencyOrder::SecondWins,
/// );
/// ```
#[must_use]
pub fn compare_dependency(first: &[u8], second: &[u8]) -> DependencyOrder {
    let (mut one, mut two) = (first, second);

    loop {
        let (open_one, open_two) = match (find(one, b'('), find(two, b'(')) {
            (None, None) => return DependencyOrder::Equal,
            (None, Some(_)) => return DependencyOrder::SecondWins,
            (Some(_), None) => return DependencyOrder::FirstWins,
            (Some(a), Some(b)) => (a, b),
        };
        let tail_one = &one[open_one + 1..];
        let tail_two = &two[open_two + 1..];

        let (close_one, close_two) = match (find(tail_one, b')'), find(tail_two, b')')) {
            (None, None) => return DependencyOrder::Malformed,
            (None, Some(_)) => return DependencyOrder::SecondWins,
            (Some(_), None) => return DependencyOrder::FirstWins,
            (Some(a), Some(b)) => (a, b),
        };
        let clause_one = &tail_one[..close_one];
        let clause_two = &tail_two[..close_two];

        match (clause_one.is_empty(), clause_two.is_empty()) {
            (true, true) => return DependencyOrder::Equal,
            (true, false) => return DependencyOrder::SecondWins,
            (false, true) => return DependencyOrder::FirstWins,
            (false, false) => {}
        }

        let digit_one = clause_one.iter().position(u8::is_ascii_digit);
        let digit_two = clause_two.iter().position(u8::is_ascii_digit);
        match (digit_one, digit_two) {
            (Some(a), Some(b)) => {
                return rpmvercmp(&clause_one[a..], &clause_two[b..]).into();
            }
            (Some(_), None) => return DependencyOrder::FirstWins,
            (None, Some(_)) => return DependencyOrder::SecondWins,
            (None, None) => {
                one = &tail_one[close_one + 1..];
                two = &tail_two[close_two + 1..];
            }
        }
    }
}

fn find(haystack: &[u8], needle: u8) -> Option<usize> {
    haystack.iter().position(|&c| c == needle)
}
