//! Knuth-Morris-Pratt pattern matching
//!
//! A [`Pattern`] precomputes the failure table for a needle once, in
//! O(m). Scanning a haystack is then O(n) with no backtracking: each
//! haystack byte is fed to a [`PatternState`] exactly once.
//!
//! `table[i]` is the length of the longest proper prefix of
//! `needle[..=i]` that is also a suffix of it. On a mismatch after `k`
//! matched bytes the scan falls back to `table[k - 1]` matched bytes
//! instead of re-reading the haystack.

use crate::memory::View;

/// A needle with its KMP failure table
#[derive(Clone, Debug)]
pub struct Pattern<'p> {
    needle: View<'p>,
    table: Vec<usize>,
}

impl<'p> Pattern<'p> {
    /// Build the failure table for `needle`
    pub fn new(needle: impl Into<View<'p>>) -> Self {
        let needle = needle.into();
        Self {
            needle,
            table: failure_table(needle.as_bytes()),
        }
    }

    pub fn needle(&self) -> View<'p> {
        self.needle
    }

    pub fn len(&self) -> usize {
        self.needle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Index of the first occurrence in `haystack`.
    ///
    /// An empty needle trivially occurs at index 0.
    pub fn position_in(&self, haystack: View<'_>) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }

        let mut state = PatternState::new();
        for (i, &byte) in haystack.as_bytes().iter().enumerate() {
            if state.advance(byte, self) {
                return Some(i + 1 - self.len());
            }
        }
        None
    }

    /// View over the first occurrence in `haystack`.
    ///
    /// Returns the zero-length view at the end of `haystack` if the needle
    /// is empty or does not occur.
    pub fn find_in<'h>(&self, haystack: View<'h>) -> View<'h> {
        if self.is_empty() {
            return haystack.empty_at_end();
        }

        match self.position_in(haystack) {
            Some(start) => View::new(&haystack.as_bytes()[start..start + self.len()]),
            None => haystack.empty_at_end(),
        }
    }
}

fn failure_table(needle: &[u8]) -> Vec<usize> {
    let mut table = vec![0usize; needle.len()];
    let mut border = 0;

    for i in 1..needle.len() {
        while border > 0 && needle[i] != needle[border] {
            border = table[border - 1];
        }
        if needle[i] == needle[border] {
            border += 1;
        }
        table[i] = border;
    }

    table
}

/// Streaming match state: how much of the needle the bytes seen so far end with
#[derive(Clone, Debug, Default)]
pub struct PatternState {
    /// Length of the matched needle prefix (0 = not matching)
    matched: usize,
}

impl PatternState {
    pub fn new() -> Self {
        Self { matched: 0 }
    }

    /// Feed one byte; returns true when the needle has just been completed.
    ///
    /// After a full match the next call continues from the needle's
    /// longest border, so overlapping occurrences are reported too. Call
    /// [`reset`](Self::reset) to skip them.
    pub fn advance(&mut self, byte: u8, pattern: &Pattern<'_>) -> bool {
        let needle = pattern.needle.as_bytes();
        if needle.is_empty() {
            return true;
        }

        if self.matched == needle.len() {
            self.matched = pattern.table[self.matched - 1];
        }

        while self.matched > 0 && needle[self.matched] != byte {
            self.matched = pattern.table[self.matched - 1];
        }

        if needle[self.matched] == byte {
            self.matched += 1;
        }

        self.matched == needle.len()
    }

    /// Check if the pattern has been fully matched
    pub fn is_match(&self, pattern: &Pattern<'_>) -> bool {
        self.matched >= pattern.len()
    }

    /// Length of the needle prefix matched so far
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// Reset the state
    pub fn reset(&mut self) {
        self.matched = 0;
    }
}
