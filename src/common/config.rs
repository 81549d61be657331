//! Chunk allocation configuration

use crate::common::constants::{MAX_VECTOR_SIZE, STANDARD_VECTOR_SIZE};
use crate::common::error::{DuckChunkError, DuckChunkResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings that control how data chunks are allocated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Number of rows every vector of a chunk is allocated for
    pub vector_size: usize,
}

impl ChunkConfig {
    /// Create a configuration with a custom vector size
    pub fn with_vector_size(vector_size: usize) -> DuckChunkResult<Self> {
        let config = Self { vector_size };
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> DuckChunkResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            DuckChunkError::InvalidParameter(format!(
                "cannot read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&text)
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(text: &str) -> DuckChunkResult<Self> {
        let config: ChunkConfig = serde_json::from_str(text)
            .map_err(|e| DuckChunkError::InvalidParameter(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> DuckChunkResult<()> {
        if self.vector_size == 0 || self.vector_size > MAX_VECTOR_SIZE {
            return Err(DuckChunkError::InvalidParameter(format!(
                "vector_size must be between 1 and {}, got {}",
                MAX_VECTOR_SIZE, self.vector_size
            )));
        }
        Ok(())
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        ChunkConfig {
            vector_size: STANDARD_VECTOR_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChunkConfig::default();
        assert_eq!(config.vector_size, STANDARD_VECTOR_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(ChunkConfig::with_vector_size(0).is_err());
        assert!(ChunkConfig::with_vector_size(MAX_VECTOR_SIZE + 1).is_err());
        assert_eq!(ChunkConfig::with_vector_size(16).unwrap().vector_size, 16);
    }

    #[test]
    fn test_config_from_json() {
        assert_eq!(
            ChunkConfig::from_json_str(r#"{"vector_size": 64}"#).unwrap(),
            ChunkConfig { vector_size: 64 }
        );
        assert_eq!(
            ChunkConfig::from_json_str("{}").unwrap(),
            ChunkConfig::default()
        );
        assert!(ChunkConfig::from_json_str(r#"{"vector_size": 0}"#).is_err());
        assert!(ChunkConfig::from_json_str("not json").is_err());
    }
}
