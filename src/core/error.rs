//! Error types for the composition engine

use thiserror::Error;
use wilderness_bridge::TerrainBridgeError;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Bridge(#[from] TerrainBridgeError),

    #[error("Spatial store error: {0}")]
    Store(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Error {
    /// Whether the terrain engine was the cause (maps to service-unavailable)
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::Bridge(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_errors_are_unavailable() {
        let err: Error = TerrainBridgeError::new("connection refused").into();
        assert!(err.is_unavailable());
        assert_eq!(err.to_string(), "terrain bridge error: connection refused");

        assert!(!Error::Store("index offline".into()).is_unavailable());
        assert!(!Error::InvalidRequest("radius".into()).is_unavailable());
    }
}
