//! Memory module: borrowed views and owned buffers
//!
//! - `View` borrows bytes and never allocates
//! - `Buffer` owns bytes and grows through a pluggable `Allocator`

pub mod allocator;
pub mod buffer;
pub mod view;

pub use allocator::{AllocError, AllocStats, Allocator, CountingAllocator, SystemAllocator};
pub use buffer::{Buffer, GrowthPolicy};
pub use view::{view_from_buffer, view_of, View};
