//! Borrowed byte views
//!
//! A [`View`] is a non-owning window onto bytes that live somewhere else:
//! a literal, another view, or a [`Buffer`]. It is `Copy`, never allocates,
//! and the borrow checker keeps it from outliving its source. A buffer
//! cannot be appended to or freed while a view of it is alive.

use super::allocator::Allocator;
use super::buffer::Buffer;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::slice::SliceIndex;

/// Immutable, non-owning reference to a contiguous byte range
#[derive(Clone, Copy, Default)]
pub struct View<'a> {
    bytes: &'a [u8],
}

impl<'a> View<'a> {
    /// View over raw bytes
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Zero-copy view over a buffer's current contents
    pub fn from_buffer<A: Allocator>(buffer: &'a Buffer<A>) -> Self {
        Self::new(buffer.as_bytes())
    }

    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The viewed bytes, with the lifetime of the source
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Address of the first byte
    pub fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    /// Address one past the last byte
    pub fn end_ptr(&self) -> *const u8 {
        self.bytes.as_ptr_range().end
    }

    /// Sub-range of this view, or `None` if out of bounds
    pub fn get<R>(&self, range: R) -> Option<View<'a>>
    where
        R: SliceIndex<[u8], Output = [u8]>,
    {
        self.bytes.get(range).map(View::new)
    }

    /// Zero-length view positioned at the end of this one.
    ///
    /// Search operations return this when nothing was matched.
    pub fn empty_at_end(&self) -> View<'a> {
        View::new(&self.bytes[self.bytes.len()..])
    }

    /// Position of this view inside `parent`, if it lies entirely within it
    pub fn offset_in(&self, parent: View<'_>) -> Option<usize> {
        let start = self.as_ptr() as usize;
        let offset = start.checked_sub(parent.as_ptr() as usize)?;
        let end = offset.checked_add(self.len())?;
        (end <= parent.len()).then_some(offset)
    }
}

/// Convert anything view-like into a [`View`]
pub fn view_of<'a>(source: impl Into<View<'a>>) -> View<'a> {
    source.into()
}

/// Zero-copy view over a buffer; invalid once the buffer changes
pub fn view_from_buffer<A: Allocator>(buffer: &Buffer<A>) -> View<'_> {
    View::from_buffer(buffer)
}

impl<'a> From<&'a [u8]> for View<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        View::new(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for View<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        View::new(bytes)
    }
}

impl<'a> From<&'a str> for View<'a> {
    fn from(s: &'a str) -> Self {
        View::new(s.as_bytes())
    }
}

impl<'a> From<&'a Vec<u8>> for View<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        View::new(bytes)
    }
}

impl<'a, A: Allocator> From<&'a Buffer<A>> for View<'a> {
    fn from(buffer: &'a Buffer<A>) -> Self {
        View::from_buffer(buffer)
    }
}

impl AsRef<[u8]> for View<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl PartialEq for View<'_> {
    fn eq(&self, other: &Self) -> bool {
        crate::search::matches(*self, *other)
    }
}

impl Eq for View<'_> {}

impl PartialEq<[u8]> for View<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        crate::search::matches(*self, View::new(other))
    }
}

impl PartialEq<&[u8]> for View<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        crate::search::matches(*self, View::new(other))
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for View<'_> {
    fn eq(&self, other: &&[u8; N]) -> bool {
        crate::search::matches(*self, View::new(*other))
    }
}

impl PartialEq<&str> for View<'_> {
    fn eq(&self, other: &&str) -> bool {
        crate::search::matches(*self, View::from(*other))
    }
}

impl Hash for View<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b\"")?;
        for &b in self.bytes {
            write!(f, "{}", std::ascii::escape_default(b))?;
        }
        write!(f, "\"")
    }
}
