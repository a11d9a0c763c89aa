//! Equality and substring queries over views
//!
//! None of these mutate or copy their inputs. Results are sub-views of the
//! haystack; "not found" is the zero-length view at the haystack's end.

use super::pattern::Pattern;
use crate::memory::View;
use std::iter::FusedIterator;

/// Byte-exact equality, short-circuiting on length and on the first mismatch
pub fn matches(a: View<'_>, b: View<'_>) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.as_bytes()
        .iter()
        .zip(b.as_bytes())
        .all(|(x, y)| x == y)
}

/// First occurrence of `needle` in `haystack`.
///
/// Returns the zero-length view at the end of `haystack` when `needle` is
/// empty or absent.
pub fn find_first<'h>(haystack: View<'h>, needle: View<'_>) -> View<'h> {
    Pattern::new(needle).find_in(haystack)
}

/// Whether `needle` occurs in `haystack`; always true for an empty needle
pub fn contains(haystack: View<'_>, needle: View<'_>) -> bool {
    if needle.is_empty() {
        return true;
    }
    !find_first(haystack, needle).is_empty()
}

/// Non-overlapping occurrences of `needle`, left to right.
///
/// An empty needle yields nothing.
pub fn find_all<'h, 'p>(haystack: View<'h>, needle: View<'p>) -> FindAll<'h, 'p> {
    FindAll {
        haystack,
        pattern: Pattern::new(needle),
        cursor: 0,
    }
}

/// Number of non-overlapping occurrences of `needle` in `haystack`
pub fn count(haystack: View<'_>, needle: View<'_>) -> usize {
    find_all(haystack, needle).count()
}

/// Iterator returned by [`find_all`]
#[derive(Clone, Debug)]
pub struct FindAll<'h, 'p> {
    haystack: View<'h>,
    pattern: Pattern<'p>,
    cursor: usize,
}

impl<'h> Iterator for FindAll<'h, '_> {
    type Item = View<'h>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.haystack.as_bytes();
        if self.pattern.is_empty() || self.cursor >= bytes.len() {
            self.cursor = bytes.len();
            return None;
        }

        let rest = View::new(&bytes[self.cursor..]);
        match self.pattern.position_in(rest) {
            Some(offset) => {
                let start = self.cursor + offset;
                let end = start + self.pattern.len();
                self.cursor = end;
                Some(View::new(&bytes[start..end]))
            }
            None => {
                self.cursor = bytes.len();
                None
            }
        }
    }
}

impl FusedIterator for FindAll<'_, '_> {}
