//! Migration configuration.

use serde::Deserialize;

/// Key the completion marker is stored under.
pub const DEFAULT_MARKER_KEY: &str = "shards-registered";

/// Configuration for the shard registration backfill.
///
/// Deserializes from a `[shard_migration]`-style table in the node config;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Marker store key recording that the backfill has run.
    pub marker_key: String,

    /// Capacity of the registration result channel.
    ///
    /// Dispatch stalls when this many results are waiting to be drained.
    pub result_buffer: usize,

    /// Wait for every registration result before writing the marker.
    ///
    /// When disabled the drain task is detached and the marker is written
    /// as soon as dispatch finishes; failures reported after that point are
    /// only logged.
    pub await_drain: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            marker_key: DEFAULT_MARKER_KEY.to_string(),
            result_buffer: 32,
            await_drain: true,
        }
    }
}

impl MigrationConfig {
    /// Create a config with a custom result channel capacity.
    pub fn with_result_buffer(result_buffer: usize) -> Self {
        Self {
            result_buffer,
            ..Default::default()
        }
    }

    /// Create a config that does not wait for the drain task.
    pub fn detached_drain() -> Self {
        Self {
            await_drain: false,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MigrationConfig::default();
        assert_eq!(config.marker_key, "shards-registered");
        assert_eq!(config.result_buffer, 32);
        assert!(config.await_drain);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: MigrationConfig = toml::from_str("result_buffer = 4").unwrap();
        assert_eq!(config.result_buffer, 4);
        assert_eq!(config.marker_key, DEFAULT_MARKER_KEY);
        assert!(config.await_drain);

        let config: MigrationConfig = toml::from_str("await_drain = false").unwrap();
        assert_eq!(config, MigrationConfig::detached_drain());
    }
}
