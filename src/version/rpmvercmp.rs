//! Segment-wise version string comparison.

use std::cmp::Ordering;

/// Compare two version strings the way package managers order them.
///
/// The strings are split into alternating runs of digits and letters;
/// anything else is a separator and only delimits runs. Rules, in order:
///
/// - `~` sorts before everything, including the end of the string
///   (`1.0~rc1 < 1.0`)
/// - `^` sorts after the end of the string but before any further segment
///   (`1.0 < 1.0^git1 < 1.0.1`)
/// - digit runs compare numerically, ignoring leading zeros
/// - letter runs compare bytewise
/// - a digit run beats a letter run in the same position
/// - if all shared segments are equal, the side with segments left wins
#[must_use]
pub fn rpmvercmp(a: &[u8], b: &[u8]) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let (mut one, mut two) = (a, b);
    loop {
        one = skip_separators(one);
        two = skip_separators(two);

        match (one.first() == Some(&b'~'), two.first() == Some(&b'~')) {
            (true, true) => {
                one = &one[1..];
                two = &two[1..];
                continue;
            }
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        match (one.first() == Some(&b'^'), two.first() == Some(&b'^')) {
            (true, true) => {
                one = &one[1..];
                two = &two[1..];
                continue;
            }
            (true, false) if two.is_empty() => return Ordering::Greater,
            (true, false) => return Ordering::Less,
            (false, true) if one.is_empty() => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        if one.is_empty() || two.is_empty() {
            break;
        }

        let numeric = one[0].is_ascii_digit();
        let (seg_one, rest_one) = split_run(one, numeric);
        let (seg_two, rest_two) = split_run(two, numeric);

        // Segments of different classes: numbers are newer.
        if seg_two.is_empty() {
            return if numeric {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let ord = if numeric {
            compare_numeric(seg_one, seg_two)
        } else {
            seg_one.cmp(seg_two)
        };
        if ord != Ordering::Equal {
            return ord;
        }

        one = rest_one;
        two = rest_two;
    }

    match (one.is_empty(), two.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, _) => Ordering::Greater,
    }
}

fn skip_separators(s: &[u8]) -> &[u8] {
    let start = s
        .iter()
        .position(|&c| c.is_ascii_alphanumeric() || c == b'~' || c == b'^')
        .unwrap_or(s.len());
    &s[start..]
}

/// Split off the leading run of digits (or letters).
fn split_run(s: &[u8], numeric: bool) -> (&[u8], &[u8]) {
    let end = s
        .iter()
        .position(|c| {
            if numeric {
                !c.is_ascii_digit()
            } else {
                !c.is_ascii_alphabetic()
            }
        })
        .unwrap_or(s.len());
    s.split_at(end)
}

fn compare_numeric(a: &[u8], b: &[u8]) -> Ordering {
    let a = trim_leading_zeros(a);
    let b = trim_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn trim_leading_zeros(s: &[u8]) -> &[u8] {
    let start = s.iter().position(|&c| c != b'0').unwrap_or(s.len());
    &s[start..]
}
