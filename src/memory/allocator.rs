//! Allocation strategies for owned buffers
//!
//! A [`Buffer`](super::Buffer) never grows or frees its storage on its own.
//! Every allocate, grow and release goes through one `resize` call on an
//! [`Allocator`], so callers can swap the strategy without touching the
//! buffer code.
//!
//! Resize semantics:
//! - an unallocated block (capacity 0) is allocated
//! - `size == 0` releases the block and leaves it unallocated
//! - otherwise the block is resized, keeping its contents

use log::warn;
use serde::Serialize;
use std::cell::Cell;

/// Pluggable resize/free capability used by [`Buffer`](super::Buffer).
pub trait Allocator {
    /// Resize `block` so it can hold at least `size` bytes.
    ///
    /// On error the block must be left exactly as it was.
    fn resize(&self, block: &mut Vec<u8>, size: usize) -> Result<(), AllocError>;
}

impl<A: Allocator + ?Sized> Allocator for &A {
    fn resize(&self, block: &mut Vec<u8>, size: usize) -> Result<(), AllocError> {
        (**self).resize(block, size)
    }
}

/// Default allocator backed by the global heap.
///
/// Growth uses fallible reservation, so running out of memory is reported
/// as [`AllocError::OutOfMemory`] instead of aborting the process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemAllocator;

impl Allocator for SystemAllocator {
    fn resize(&self, block: &mut Vec<u8>, size: usize) -> Result<(), AllocError> {
        if size == 0 {
            // Drop the old storage, leave an unallocated block behind
            *block = Vec::new();
            return Ok(());
        }

        if size > block.capacity() {
            let additional = size - block.len();
            block.try_reserve_exact(additional).map_err(|e| {
                warn!("Failed to reserve {} bytes: {}", size, e);
                AllocError::OutOfMemory { requested: size }
            })?;
        } else {
            block.truncate(size);
            block.shrink_to(size);
        }

        Ok(())
    }
}

/// Allocator wrapper that records what its inner allocator was asked to do.
///
/// Counters use `Cell`, so a single instance is meant to be shared by
/// reference (`&CountingAllocator`) between buffers on one thread.
#[derive(Debug, Default)]
pub struct CountingAllocator<A = SystemAllocator> {
    inner: A,
    allocations: Cell<usize>,
    reallocations: Cell<usize>,
    releases: Cell<usize>,
    failures: Cell<usize>,
    bytes_requested: Cell<usize>,
}

impl CountingAllocator<SystemAllocator> {
    /// Count calls made to the system allocator
    pub fn new() -> Self {
        Self::wrap(SystemAllocator)
    }
}

impl<A: Allocator> CountingAllocator<A> {
    /// Count calls made to `inner`
    pub fn wrap(inner: A) -> Self {
        Self {
            inner,
            allocations: Cell::new(0),
            reallocations: Cell::new(0),
            releases: Cell::new(0),
            failures: Cell::new(0),
            bytes_requested: Cell::new(0),
        }
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> AllocStats {
        AllocStats {
            allocations: self.allocations.get(),
            reallocations: self.reallocations.get(),
            releases: self.releases.get(),
            failures: self.failures.get(),
            bytes_requested: self.bytes_requested.get(),
        }
    }

    /// Get the wrapped allocator
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

fn bump(counter: &Cell<usize>, by: usize) {
    counter.set(counter.get().saturating_add(by));
}

impl<A: Allocator> Allocator for CountingAllocator<A> {
    fn resize(&self, block: &mut Vec<u8>, size: usize) -> Result<(), AllocError> {
        let was_allocated = block.capacity() > 0;

        if let Err(e) = self.inner.resize(block, size) {
            bump(&self.failures, 1);
            return Err(e);
        }

        match (was_allocated, size) {
            (false, 0) => {}
            (true, 0) => bump(&self.releases, 1),
            (false, _) => {
                bump(&self.allocations, 1);
                bump(&self.bytes_requested, size);
            }
            (true, _) => {
                bump(&self.reallocations, 1);
                bump(&self.bytes_requested, size);
            }
        }

        Ok(())
    }
}

/// Counters collected by [`CountingAllocator`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AllocStats {
    /// Blocks allocated from nothing
    pub allocations: usize,
    /// Existing blocks resized
    pub reallocations: usize,
    /// Blocks handed back
    pub releases: usize,
    /// Resize requests the inner allocator refused
    pub failures: usize,
    /// Sum of all non-zero sizes requested
    pub bytes_requested: usize,
}

impl AllocStats {
    /// Blocks allocated and not yet released
    pub fn live_blocks(&self) -> usize {
        self.allocations.saturating_sub(self.releases)
    }
}

/// Allocation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// The allocator could not provide the requested size
    OutOfMemory { requested: usize },
    /// The requested size does not fit in `usize`
    CapacityOverflow,
}

impl std::fmt::Display for AllocError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocError::OutOfMemory { requested } => {
                write!(f, "Out of memory: cannot allocate {} bytes", requested)
            }
            AllocError::CapacityOverflow => write!(f, "Capacity overflow"),
        }
    }
}

impl std::error::Error for AllocError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_from_nothing() {
        let mut block = Vec::new();
        SystemAllocator.resize(&mut block, 16).unwrap();
        assert!(block.capacity() >= 16);
        assert!(block.is_empty());
    }

    #[test]
    fn test_grow_keeps_contents() {
        let mut block = Vec::new();
        SystemAllocator.resize(&mut block, 4).unwrap();
        block.extend_from_slice(b"test");

        SystemAllocator.resize(&mut block, 64).unwrap();
        assert!(block.capacity() >= 64);
        assert_eq!(block, b"test");
    }

    #[test]
    fn test_release() {
        let mut block = Vec::new();
        SystemAllocator.resize(&mut block, 8).unwrap();
        SystemAllocator.resize(&mut block, 0).unwrap();
        assert_eq!(block.capacity(), 0);
    }

    #[test]
    fn test_shrink_truncates() {
        let mut block = b"hello world".to_vec();
        SystemAllocator.resize(&mut block, 5).unwrap();
        assert_eq!(block, b"hello");
    }

    #[test]
    fn test_out_of_memory() {
        let mut block = Vec::new();
        let result = SystemAllocator.resize(&mut block, usize::MAX);
        assert!(matches!(result, Err(AllocError::OutOfMemory { .. })));
        assert_eq!(block.capacity(), 0);
    }

    #[test]
    fn test_counting() {
        let alloc = CountingAllocator::new();
        let mut block = Vec::new();

        alloc.resize(&mut block, 8).unwrap();
        alloc.resize(&mut block, 32).unwrap();
        alloc.resize(&mut block, 0).unwrap();
        // Releasing an unallocated block is not counted
        alloc.resize(&mut block, 0).unwrap();

        let stats = alloc.stats();
        assert_eq!(stats.allocations, 1);
        assert_eq!(stats.reallocations, 1);
        assert_eq!(stats.releases, 1);
        assert_eq!(stats.bytes_requested, 40);
        assert_eq!(stats.live_blocks(), 0);
    }

    #[test]
    fn test_counting_failure() {
        let alloc = CountingAllocator::new();
        let mut block = Vec::new();

        assert!(alloc.resize(&mut block, usize::MAX).is_err());
        assert_eq!(alloc.stats().failures, 1);
        assert_eq!(alloc.stats().allocations, 0);
    }

    #[test]
    fn test_stats_serialization() {
        let stats = AllocStats {
            allocations: 2,
            ..Default::default()
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"allocations\":2"));
    }
}
