//! The single error kind surfaced by the terrain bridge

use thiserror::Error;

/// Any failure talking to the terrain engine.
///
/// Connection failures, timeouts, malformed replies, `success: false`
/// envelopes and locally rejected arguments all share this type. The message
/// is the only thing that tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("terrain bridge error: {message}")]
pub struct TerrainBridgeError {
    message: String,
}

impl TerrainBridgeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for TerrainBridgeError {
    fn from(e: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", e))
    }
}

impl From<serde_json::Error> for TerrainBridgeError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("malformed JSON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_preserved() {
        let err = TerrainBridgeError::new("engine exploded");
        assert_eq!(err.message(), "engine exploded");
        assert_eq!(err.to_string(), "terrain bridge error: engine exploded");
    }

    #[test]
    fn test_json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: TerrainBridgeError = parse.into();
        assert!(err.message().starts_with("malformed JSON"));
    }
}
