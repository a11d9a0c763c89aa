//! Telemetry Module
//!
//! Buffers report allocator activity as structured log records. Each
//! record is serialized to JSON and handed to the `log` facade, so any
//! installed logger can collect it. Nothing is serialized unless the
//! record's level is enabled.

use log::{log_enabled, trace, warn, Level};
use serde::Serialize;

/// Allocation event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocEventType {
    /// First storage for a buffer
    Allocate,
    /// Existing storage resized
    Grow,
    /// Storage handed back to the allocator
    Release,
    /// The allocator refused a request
    Failure,
}

impl AllocEventType {
    fn level(self) -> Level {
        match self {
            AllocEventType::Failure => Level::Warn,
            _ => Level::Trace,
        }
    }
}

/// Allocation event for logging
#[derive(Debug, Clone, Serialize)]
pub struct AllocEvent {
    /// Event type
    pub event_type: AllocEventType,
    /// Capacity before the request
    pub previous_capacity: usize,
    /// Capacity requested (0 for a release)
    pub requested: usize,
    /// Buffer length at the time of the request
    pub length: usize,
    /// Failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AllocEvent {
    /// Create a new allocation event
    pub fn new(event_type: AllocEventType) -> Self {
        Self {
            event_type,
            previous_capacity: 0,
            requested: 0,
            length: 0,
            reason: None,
        }
    }

    /// Set capacity before, capacity requested and current length
    pub fn with_sizes(mut self, previous_capacity: usize, requested: usize, length: usize) -> Self {
        self.previous_capacity = previous_capacity;
        self.requested = requested;
        self.length = length;
        self
    }

    /// Set reason
    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }

    /// Log the event
    pub fn emit(&self) {
        if !log_enabled!(self.event_type.level()) {
            return;
        }

        match serde_json::to_string(self) {
            Ok(json) => match self.event_type {
                AllocEventType::Failure => warn!("[BYTESTR-ALLOC] {}", json),
                _ => trace!("[BYTESTR-ALLOC] {}", json),
            },
            Err(e) => {
                warn!("Failed to serialize allocation event: {}", e);
            }
        }
    }
}
