//! Owned, growable byte buffer
//!
//! Storage is obtained from, grown through and handed back to an
//! [`Allocator`]. The buffer tracks the capacity it asked for, which is
//! always at least its length.
//!
//! Growth is exact by default: an append that does not fit reallocates to
//! exactly the new length. That keeps peak memory minimal at the cost of
//! quadratic copying for long runs of tiny appends. [`GrowthPolicy::Doubling`]
//! trades memory for amortized O(1) appends; contents are the same either way.

use super::allocator::{AllocError, Allocator, SystemAllocator};
use super::view::View;
use crate::telemetry::{AllocEvent, AllocEventType};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a buffer picks its new capacity when an append does not fit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthPolicy {
    /// Grow to exactly the required size
    #[default]
    Exact,
    /// Grow to at least twice the current capacity
    Doubling,
}

impl GrowthPolicy {
    /// Capacity to request when `required` bytes no longer fit in `current`
    pub fn next_capacity(self, current: usize, required: usize) -> usize {
        match self {
            GrowthPolicy::Exact => required,
            GrowthPolicy::Doubling => required.max(current.saturating_mul(2)),
        }
    }
}

/// Owning byte sequence with allocator-managed storage
pub struct Buffer<A: Allocator = SystemAllocator> {
    /// Initialized bytes; `data.len()` is the buffer length
    data: Vec<u8>,
    /// Capacity last requested from the allocator
    capacity: usize,
    allocator: A,
    growth: GrowthPolicy,
}

impl Buffer<SystemAllocator> {
    /// Empty buffer on the system allocator
    pub fn new() -> Self {
        Self::new_in(SystemAllocator)
    }
}

impl Default for Buffer<SystemAllocator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Allocator> Buffer<A> {
    /// Empty buffer; nothing is allocated until the first append
    pub fn new_in(allocator: A) -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
            allocator,
            growth: GrowthPolicy::default(),
        }
    }

    /// Empty buffer with `capacity` bytes reserved up front
    pub fn with_capacity_in(capacity: usize, allocator: A) -> Result<Self, AllocError> {
        let mut buffer = Self::new_in(allocator);
        if capacity > 0 {
            buffer.reallocate(capacity)?;
        }
        Ok(buffer)
    }

    /// Copy a view's bytes into freshly allocated storage.
    ///
    /// The new buffer's capacity equals the view's length.
    pub fn copy_from<'v>(view: impl Into<View<'v>>, allocator: A) -> Result<Self, AllocError> {
        let view = view.into();
        let mut buffer = Self::with_capacity_in(view.len(), allocator)?;
        buffer.data.extend_from_slice(view.as_bytes());

        debug!("Copied {} bytes into new buffer", buffer.len());
        Ok(buffer)
    }

    /// Use `policy` for future growth
    pub fn with_growth_policy(mut self, policy: GrowthPolicy) -> Self {
        self.growth = policy;
        self
    }

    /// Append a view's bytes, growing the storage if they do not fit.
    ///
    /// Growth may move the storage; the borrow checker already guarantees
    /// no view of this buffer is alive across the call.
    pub fn append<'v>(&mut self, view: impl Into<View<'v>>) -> Result<(), AllocError> {
        let view = view.into();
        let required = self
            .len()
            .checked_add(view.len())
            .ok_or(AllocError::CapacityOverflow)?;

        if self.capacity < required {
            let new_capacity = self.growth.next_capacity(self.capacity, required);
            self.reallocate(new_capacity)?;
        }

        self.data.extend_from_slice(view.as_bytes());
        debug_assert!(self.capacity >= self.data.len());
        Ok(())
    }

    /// Release the storage back to the allocator.
    ///
    /// Consumes the buffer, so neither it nor any view of it can be used
    /// afterwards. Dropping a buffer releases it the same way.
    pub fn free(mut self) {
        self.release();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes reserved from the allocator
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Zero-copy view over the current contents
    pub fn as_view(&self) -> View<'_> {
        View::from_buffer(self)
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    pub fn growth_policy(&self) -> GrowthPolicy {
        self.growth
    }

    fn reallocate(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        let event_type = if self.capacity == 0 {
            AllocEventType::Allocate
        } else {
            AllocEventType::Grow
        };

        if let Err(e) = self.allocator.resize(&mut self.data, new_capacity) {
            AllocEvent::new(AllocEventType::Failure)
                .with_sizes(self.capacity, new_capacity, self.len())
                .with_reason(&e.to_string())
                .emit();
            return Err(e);
        }

        AllocEvent::new(event_type)
            .with_sizes(self.capacity, new_capacity, self.len())
            .emit();
        self.capacity = new_capacity;
        Ok(())
    }

    fn release(&mut self) {
        if self.capacity == 0 && self.data.capacity() == 0 {
            return;
        }

        let previous = self.capacity;
        let length = self.len();
        match self.allocator.resize(&mut self.data, 0) {
            Ok(()) => {
                AllocEvent::new(AllocEventType::Release)
                    .with_sizes(previous, 0, length)
                    .emit();
            }
            Err(e) => {
                AllocEvent::new(AllocEventType::Failure)
                    .with_sizes(previous, 0, length)
                    .with_reason(&e.to_string())
                    .emit();
            }
        }

        // Whatever the allocator did, this buffer no longer owns storage
        self.data = Vec::new();
        self.capacity = 0;
    }
}

impl<A: Allocator> Drop for Buffer<A> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<A: Allocator> AsRef<[u8]> for Buffer<A> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<A: Allocator> fmt::Debug for Buffer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("length", &self.len())
            .field("capacity", &self.capacity)
            .field("data", &self.as_view())
            .finish()
    }
}
