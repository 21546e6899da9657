//! Knuth-Morris-Pratt search over code unit sequences.

use crate::case_conversions::CodeUnitCase;
use crate::comparison::CaseSensitivity;

/// Implementation of Knuth-Morris-Pratt algorithm for sub-sequence search over
/// code units.
/// https://en.wikipedia.org/wiki/Knuth%E2%80%93Morris%E2%80%93Pratt_algorithm
pub struct KMPSearch<T> {
    pattern: Vec<T>,
    case_sensitivity: CaseSensitivity,
    lps: Vec<usize>,
}

impl<T: CodeUnitCase> KMPSearch<T> {
    pub fn new(case_sensitivity: CaseSensitivity) -> Self {
        KMPSearch {
            pattern: Vec::new(),
            case_sensitivity,
            lps: Vec::new(),
        }
    }

    pub fn new_with_pattern(pattern: &[T], case_sensitivity: CaseSensitivity) -> Self {
        let mut kmp = Self::new(case_sensitivity);
        kmp.set_pattern(pattern.iter().copied());
        kmp
    }

    pub fn set_pattern(&mut self, pattern: impl IntoIterator<Item = T>) {
        self.pattern.clear();
        let cs = self.case_sensitivity;
        self.pattern
            .extend(pattern.into_iter().map(|unit| Self::map_unit(cs, unit)));
        self.build_lps_table();
    }

    #[inline]
    fn map_unit(cs: CaseSensitivity, unit: T) -> T {
        match cs {
            CaseSensitivity::Sensitive => unit,
            CaseSensitivity::Insensitive => unit.fold_case(),
        }
    }

    /// Pre-builds the longest proper suffix table based on the pattern.
    fn build_lps_table(&mut self) {
        let pattern_len = self.pattern.len();
        self.lps.clear();
        self.lps.resize(pattern_len, 0);

        let mut i = 1usize;
        let mut j = 0usize;
        while i < pattern_len {
            if self.pattern[i] == self.pattern[j] {
                self.lps[i] = j + 1;
                i += 1;
                j += 1;
            } else if j != 0 {
                j = self.lps[j - 1];
            } else {
                self.lps[i] = 0;
                i += 1;
            }
        }
    }

    /// Searches for the first pattern appearance in `text` and returns its
    /// start index.
    pub fn search(&self, text: impl IntoIterator<Item = T>) -> Option<usize> {
        let mut result = None;
        self.search_all(text, |start| {
            result = Some(start);
            true
        });
        result
    }

    /// Searches for all (possibly overlapping) pattern appearances in `text`.
    /// The collector is called with the start index of every match found. The
    /// search continues until the collector signals to stop by returning true,
    /// or until the end of the text.
    ///
    /// An empty pattern matches once, at index 0.
    pub fn search_all<F>(&self, text: impl IntoIterator<Item = T>, mut collector: F)
    where
        F: FnMut(usize) -> bool,
    {
        let pattern_len = self.pattern.len();
        if pattern_len == 0 {
            collector(0);
            return;
        }
        let mut j = 0usize;
        for (i, unit) in text.into_iter().enumerate() {
            let unit = Self::map_unit(self.case_sensitivity, unit);
            while j > 0 && self.pattern[j] != unit {
                j = self.lps[j - 1];
            }
            if self.pattern[j] == unit {
                j += 1;
            }
            if j == pattern_len {
                if collector(i + 1 - pattern_len) {
                    return;
                }
                j = self.lps[j - 1];
            }
        }
    }
}
