//! Connection settings for the terrain engine

use std::time::Duration;

use crate::DEFAULT_PORT;

/// Where the terrain engine listens and how long to wait for it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeConfig {
    pub host: String,
    pub port: u16,
    /// Applies separately to connecting, writing the request and reading the reply
    pub timeout: Duration,
    /// Longest reply line accepted, newline included
    pub max_reply_bytes: u64,
}

/// Comfortably above a full 1000-coordinate batch reply
pub const DEFAULT_MAX_REPLY_BYTES: u64 = 1024 * 1024;

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(5),
            max_reply_bytes: DEFAULT_MAX_REPLY_BYTES,
        }
    }
}

impl BridgeConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_reply_bytes(mut self, max_reply_bytes: u64) -> Self {
        self.max_reply_bytes = max_reply_bytes;
        self
    }

    /// Defaults overridden by `WILDERNESS_BRIDGE_HOST`, `WILDERNESS_BRIDGE_PORT`
    /// and `WILDERNESS_BRIDGE_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup("WILDERNESS_BRIDGE_HOST") {
            config.host = host;
        }
        if let Some(raw) = lookup("WILDERNESS_BRIDGE_PORT") {
            match raw.parse() {
                Ok(port) => config.port = port,
                Err(_) => log::warn!("Ignoring invalid WILDERNESS_BRIDGE_PORT {:?}", raw),
            }
        }
        if let Some(raw) = lookup("WILDERNESS_BRIDGE_TIMEOUT_MS") {
            match raw.parse() {
                Ok(ms) => config.timeout = Duration::from_millis(ms),
                Err(_) => log::warn!("Ignoring invalid WILDERNESS_BRIDGE_TIMEOUT_MS {:?}", raw),
            }
        }
        config
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.address(), "127.0.0.1:8182");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_reply_bytes, 1024 * 1024);
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("WILDERNESS_BRIDGE_HOST", "terrain.local"),
            ("WILDERNESS_BRIDGE_PORT", "9000"),
            ("WILDERNESS_BRIDGE_TIMEOUT_MS", "250"),
        ]
        .into_iter()
        .collect();
        let config = BridgeConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.address(), "terrain.local:9000");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = BridgeConfig::from_lookup(|k| match k {
            "WILDERNESS_BRIDGE_PORT" => Some("not-a-port".into()),
            "WILDERNESS_BRIDGE_TIMEOUT_MS" => Some("-1".into()),
            _ => None,
        });
        assert_eq!(config, BridgeConfig::default());
    }
}
