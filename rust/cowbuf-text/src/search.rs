//! Sub-sequence search over code units.
//!
//! Positions follow the clamp convention of the array layer: searching
//! forward from a position past the end finds nothing, searching backward
//! from a position past the end starts at the end. An empty needle matches at
//! every position, including the length of the haystack.

use crate::case_conversions::CodeUnitCase;
use crate::comparison::CaseSensitivity;
use crate::kmp::KMPSearch;

/// Returns the index of the first occurrence of `needle` in `haystack` at or
/// after `from`.
pub fn index_of<T: CodeUnitCase>(
    haystack: &[T],
    needle: &[T],
    from: usize,
    cs: CaseSensitivity,
) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(from);
    }
    if needle.len() > haystack.len() - from {
        return None;
    }
    KMPSearch::new_with_pattern(needle, cs)
        .search(haystack[from..].iter().copied())
        .map(|start| start + from)
}

/// Returns the index of the last occurrence of `needle` in `haystack` that
/// starts at or before `from` (the end of the haystack if `None`).
pub fn last_index_of<T: CodeUnitCase>(
    haystack: &[T],
    needle: &[T],
    from: Option<usize>,
    cs: CaseSensitivity,
) -> Option<usize> {
    let from = from.map_or(haystack.len(), |from| from.min(haystack.len()));
    if needle.is_empty() {
        return Some(from);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    let last_start = from.min(haystack.len() - needle.len());
    let window = &haystack[..last_start + needle.len()];

    // Matching the reversed needle against the reversed window finds the
    // rightmost match first.
    let mut kmp = KMPSearch::new(cs);
    kmp.set_pattern(needle.iter().rev().copied());
    kmp.search(window.iter().rev().copied())
        .map(|reversed_start| last_start - reversed_start)
}

/// Counts the (possibly overlapping) occurrences of `needle` in `haystack`.
/// An empty needle occurs `haystack.len() + 1` times.
pub fn count<T: CodeUnitCase>(haystack: &[T], needle: &[T], cs: CaseSensitivity) -> usize {
    if needle.is_empty() {
        return haystack.len() + 1;
    }
    if needle.len() > haystack.len() {
        return 0;
    }
    let mut found = 0;
    KMPSearch::new_with_pattern(needle, cs).search_all(haystack.iter().copied(), |_| {
        found += 1;
        false
    });
    found
}

/// States whether `needle` occurs in `haystack`.
#[inline]
pub fn contains<T: CodeUnitCase>(haystack: &[T], needle: &[T], cs: CaseSensitivity) -> bool {
    index_of(haystack, needle, 0, cs).is_some()
}
