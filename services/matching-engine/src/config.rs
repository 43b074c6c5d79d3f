//! Engine configuration

use serde::{Deserialize, Serialize};
use types::errors::ConfigError;

/// Largest accepted starting sequence; leaves 2^63 arrivals and trades of
/// headroom before either counter could wrap.
pub const MAX_STARTING_SEQUENCE: u64 = i64::MAX as u64;

/// Configuration for the matching engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Arrival sequence given to the first admitted order.
    pub starting_order_sequence: u64,
    /// Sequence (and trade id) of the first trade.
    pub starting_trade_sequence: u64,
    /// Book used by NEW requests that carry no symbol.
    pub default_symbol: String,
    /// Levels per side returned by `snapshot` when asked for depth 0.
    pub snapshot_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_order_sequence: 1,
            starting_trade_sequence: 1,
            default_symbol: "DEFAULT".to_string(),
            snapshot_depth: 10,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_symbol.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "default_symbol".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        for (field, value) in [
            ("starting_order_sequence", self.starting_order_sequence),
            ("starting_trade_sequence", self.starting_trade_sequence),
        ] {
            if value > MAX_STARTING_SEQUENCE {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("must not exceed {}", MAX_STARTING_SEQUENCE),
                });
            }
        }
        if self.snapshot_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "snapshot_depth".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
