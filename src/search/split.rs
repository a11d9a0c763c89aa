//! Delimiter splitting
//!
//! [`Split`] cuts a view at each occurrence of a separator and yields the
//! pieces in between, lazily and without copying. The state is the
//! unconsumed tail of the text; each step searches only that tail, so no
//! byte is read twice.
//!
//! Edge cases:
//! - leading, repeated or trailing separators yield empty pieces
//! - text without the separator yields itself once
//! - empty text yields one empty piece
//! - an empty separator does not split: the whole text is yielded once

use super::pattern::Pattern;
use crate::memory::View;
use std::iter::FusedIterator;

/// Lazy, forward-only sequence of the pieces of `text` between separators
#[derive(Clone, Debug)]
pub struct Split<'a, 'p> {
    /// Unconsumed tail; `None` once the last piece has been yielded
    rest: Option<View<'a>>,
    separator: Pattern<'p>,
}

/// Split `text` at every occurrence of `separator`.
///
/// Yields `1 + count(text, separator)` pieces; joining them with the
/// separator gives back `text`.
pub fn split<'a, 'p>(text: View<'a>, separator: View<'p>) -> Split<'a, 'p> {
    Split {
        rest: Some(text),
        separator: Pattern::new(separator),
    }
}

impl<'a> Split<'a, '_> {
    /// Part of the text not yet yielded, or `None` once exhausted
    pub fn remainder(&self) -> Option<View<'a>> {
        self.rest
    }
}

impl<'a> Iterator for Split<'a, '_> {
    type Item = View<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;

        if self.separator.is_empty() {
            self.rest = None;
            return Some(rest);
        }

        let bytes = rest.as_bytes();
        match self.separator.position_in(rest) {
            Some(start) => {
                self.rest = Some(View::new(&bytes[start + self.separator.len()..]));
                Some(View::new(&bytes[..start]))
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.rest {
            None => (0, Some(0)),
            Some(rest) => {
                let upper = if self.separator.is_empty() {
                    1
                } else {
                    1 + rest.len() / self.separator.len()
                };
                (1, Some(upper))
            }
        }
    }
}

impl FusedIterator for Split<'_, '_> {}
