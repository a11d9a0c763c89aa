//! Allocation-aware byte strings
//!
//! Raw byte handling with no encoding assumptions:
//! - [`View`]: borrowed, `Copy` window onto bytes; never allocates
//! - [`Buffer`]: owned, growable bytes whose storage goes through an [`Allocator`]
//! - [`matches`], [`find_first`], [`contains`]: equality and KMP substring search
//! - [`split`]: lazy iterator over the pieces between separators
//!
//! Views borrow from whatever they were made from, so a buffer cannot be
//! freed or grown while a view of it is still in use.
//!
//! ```
//! use bytestr::{contains, split, view_of, Buffer, SystemAllocator};
//!
//! let mut buf = Buffer::copy_from("hello", SystemAllocator)?;
//! buf.append(" world")?;
//! assert!(contains(buf.as_view(), view_of("o w")));
//!
//! let words: Vec<_> = split(buf.as_view(), view_of(" ")).collect();
//! assert_eq!(words.len(), 2);
//! # Ok::<(), bytestr::AllocError>(())
//! ```

pub mod config;
pub mod memory;
pub mod search;
pub mod telemetry;

pub use config::{BufferConfig, ConfigError};
pub use memory::{
    view_from_buffer, view_of, AllocError, AllocStats, Allocator, Buffer, CountingAllocator,
    GrowthPolicy, SystemAllocator, View,
};
pub use search::{contains, count, find_all, find_first, matches, split, Pattern, Split};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_round_trip() {
        for s in ["", "a", "test", "some simple sentence for testing"] {
            let buf = Buffer::copy_from(s, SystemAllocator).unwrap();
            assert!(matches(buf.as_view(), view_of(s)));
            buf.free();
        }
    }

    #[test]
    fn test_buffer_from_view() {
        let s = Buffer::copy_from(view_of("test"), SystemAllocator).unwrap();
        assert_eq!(s.len(), 4);
        assert_eq!(s.as_bytes(), b"test");
    }

    #[test]
    fn test_view_of_buffer_shares_storage() {
        let s = Buffer::copy_from("test", SystemAllocator).unwrap();
        let v = view_of(&s);
        assert_eq!(v.len(), s.len());
        assert_eq!(v.as_ptr(), s.as_bytes().as_ptr());
    }

    #[test]
    fn test_hello_world() {
        let mut s = Buffer::copy_from(view_of("hello"), SystemAllocator).unwrap();
        s.append(view_of(" world")).unwrap();
        assert_eq!(s.len(), 11);
        assert!(s.capacity() >= 11);
        assert!(matches(s.as_view(), view_of("hello world")));
    }

    #[test]
    fn test_find_first_scenarios() {
        let a = view_of("tesettingsre");
        assert!(find_first(a, view_of("test")).is_empty());
        assert!(matches(find_first(a, view_of("setting")), view_of("setting")));
    }

    #[test]
    fn test_contains_scenarios() {
        let a = view_of("tesettingsere");
        assert!(!contains(a, view_of("test")));
        assert!(contains(a, view_of("setting")));
        assert!(contains(a, view_of("ser")));
    }

    #[test]
    fn test_split_sentence() {
        let words: Vec<View<'_>> =
            split(view_of("some simple sentence for testing"), view_of(" ")).collect();
        assert_eq!(words.len(), 5);
        assert_eq!(words[0], "some");
        assert_eq!(words[4], "testing");
    }

    #[test]
    fn test_search_buffer_contents() {
        let config = BufferConfig::from_bytes(br#"{"growth": "doubling"}"#).unwrap();
        let mut buf = config.new_buffer().unwrap();
        for word in ["alpha", ",", "beta", ",", "gamma"] {
            buf.append(word).unwrap();
        }

        assert_eq!(count(buf.as_view(), view_of(",")), 2);
        let last = split(buf.as_view(), view_of(",")).last().unwrap();
        assert_eq!(last, "gamma");
    }

    #[test]
    fn test_shared_counting_allocator() {
        let alloc = CountingAllocator::new();
        {
            let a = Buffer::copy_from("one", &alloc).unwrap();
            let mut b = Buffer::copy_from(a.as_view(), &alloc).unwrap();
            b.append(" two").unwrap();
            assert_eq!(b.as_bytes(), b"one two");
            a.free();
        }

        let stats = alloc.stats();
        assert_eq!(stats.allocations, 2);
        assert_eq!(stats.reallocations, 1);
        assert_eq!(stats.live_blocks(), 0);
    }
}
