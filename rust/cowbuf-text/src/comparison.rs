//! Ordinal comparison of code unit sequences.

use std::cmp::Ordering;

use itertools::{EitherOrBoth, Itertools};

use crate::case_conversions::CodeUnitCase;

/// Whether comparisons and searches distinguish upper and lower case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

/// Orders two code unit sequences by unit value (not by locale collation).
/// Case-insensitive ordering compares case-folded units.
pub fn compare<T: CodeUnitCase>(s1: &[T], s2: &[T], cs: CaseSensitivity) -> Ordering {
    match cs {
        CaseSensitivity::Sensitive => s1.cmp(s2),
        CaseSensitivity::Insensitive => {
            for eob in s1
                .iter()
                .map(|u| u.fold_case())
                .zip_longest(s2.iter().map(|u| u.fold_case()))
            {
                match eob {
                    EitherOrBoth::Both(u1, u2) => match u1.cmp(&u2) {
                        Ordering::Equal => continue,
                        unequal => return unequal,
                    },
                    EitherOrBoth::Left(_) => return Ordering::Greater,
                    EitherOrBoth::Right(_) => return Ordering::Less,
                }
            }
            Ordering::Equal
        }
    }
}

/// States whether two code unit sequences are equal.
#[inline]
pub fn equals<T: CodeUnitCase>(s1: &[T], s2: &[T], cs: CaseSensitivity) -> bool {
    s1.len() == s2.len() && compare(s1, s2, cs) == Ordering::Equal
}

/// States whether `prefix` is a prefix of `s`.
#[inline]
pub fn is_prefix<T: CodeUnitCase>(prefix: &[T], s: &[T], cs: CaseSensitivity) -> bool {
    if prefix.len() > s.len() {
        return false;
    }
    equals(prefix, &s[..prefix.len()], cs)
}

/// States whether `suffix` is a suffix of `s`.
#[inline]
pub fn is_suffix<T: CodeUnitCase>(suffix: &[T], s: &[T], cs: CaseSensitivity) -> bool {
    for eob in suffix.iter().rev().zip_longest(s.iter().rev()) {
        match eob {
            EitherOrBoth::Both(u1, u2) => {
                if !unit_eq(*u1, *u2, cs) {
                    return false;
                }
            }
            EitherOrBoth::Left(_) => return false, // s is exhausted
            EitherOrBoth::Right(_) => return true, // s is longer than suffix
        }
    }
    true
}

#[inline]
pub(crate) fn unit_eq<T: CodeUnitCase>(u1: T, u2: T, cs: CaseSensitivity) -> bool {
    match cs {
        CaseSensitivity::Sensitive => u1 == u2,
        CaseSensitivity::Insensitive => u1.fold_case() == u2.fold_case(),
    }
}
