//! Buffer configuration
//!
//! Buffers are configured from JSON bytes handed over by the embedding
//! application. Every field has a default, so `{}` is a valid config.

use crate::memory::{AllocError, Allocator, Buffer, GrowthPolicy, SystemAllocator};
use serde::{Deserialize, Serialize};

/// How new buffers are created and grown
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct BufferConfig {
    /// Growth policy for appends that do not fit
    #[serde(default)]
    pub growth: GrowthPolicy,

    /// Bytes reserved when a buffer is created
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
}

fn default_initial_capacity() -> usize {
    0 // allocate lazily on first append
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            growth: GrowthPolicy::default(),
            initial_capacity: default_initial_capacity(),
        }
    }
}

impl BufferConfig {
    /// Parse configuration from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config_str = std::str::from_utf8(bytes)
            .map_err(|e| ConfigError::InvalidUtf8(e.to_string()))?;

        serde_json::from_str(config_str)
            .map_err(|e| ConfigError::InvalidJson(e.to_string()))
    }

    /// Create an empty buffer on `allocator` following this configuration
    pub fn new_buffer_in<A: Allocator>(&self, allocator: A) -> Result<Buffer<A>, AllocError> {
        Ok(Buffer::with_capacity_in(self.initial_capacity, allocator)?
            .with_growth_policy(self.growth))
    }

    /// Create an empty buffer on the system allocator
    pub fn new_buffer(&self) -> Result<Buffer<SystemAllocator>, AllocError> {
        self.new_buffer_in(SystemAllocator)
    }
}

/// Configuration parsing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidUtf8(String),
    InvalidJson(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidUtf8(e) => write!(f, "Invalid UTF-8: {}", e),
            ConfigError::InvalidJson(e) => write!(f, "Invalid JSON: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::CountingAllocator;

    #[test]
    fn test_default_config() {
        let config = BufferConfig::default();
        assert_eq!(config.growth, GrowthPolicy::Exact);
        assert_eq!(config.initial_capacity, 0);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = BufferConfig::from_bytes(b"{}").unwrap();
        assert_eq!(config, BufferConfig::default());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{"growth": "doubling", "initial_capacity": 1024}"#;
        let config = BufferConfig::from_bytes(json.as_bytes()).unwrap();
        assert_eq!(config.growth, GrowthPolicy::Doubling);
        assert_eq!(config.initial_capacity, 1024);
    }

    #[test]
    fn test_invalid_json() {
        let result = BufferConfig::from_bytes(br#"{"growth": "tripling"}"#);
        assert!(matches!(result, Err(ConfigError::InvalidJson(_))));
    }

    #[test]
    fn test_invalid_utf8() {
        let result = BufferConfig::from_bytes(&[0xFF, 0xFE]);
        assert!(matches!(result, Err(ConfigError::InvalidUtf8(_))));
    }

    #[test]
    fn test_new_buffer_follows_config() {
        let alloc = CountingAllocator::new();
        let config = BufferConfig {
            growth: GrowthPolicy::Doubling,
            initial_capacity: 4,
        };

        let mut buf = config.new_buffer_in(&alloc).unwrap();
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.growth_policy(), GrowthPolicy::Doubling);

        buf.append("hello").unwrap();
        assert_eq!(buf.capacity(), 8);
        assert_eq!(alloc.stats().allocations, 1);
        assert_eq!(alloc.stats().reallocations, 1);
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvalidJson("expected value".to_string());
        assert_eq!(err.to_string(), "Invalid JSON: expected value");
    }
}
