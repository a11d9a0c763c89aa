//! Search module: equality, substring search and splitting over views
//!
//! Substring search is Knuth-Morris-Pratt: linear in haystack plus needle,
//! no backtracking over the haystack. Every result is a sub-view of the
//! input, never a copy.

pub mod matcher;
pub mod pattern;
pub mod split;

pub use matcher::{contains, count, find_all, find_first, matches, FindAll};
pub use pattern::{Pattern, PatternState};
pub use split::{split, Split};
