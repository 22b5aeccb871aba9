//! AI configuration handling.
//!
//! Seats are configured with a small JSON object. Standard fields are typed;
//! anything else is kept in `custom` for the AI that wants it.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Standard configuration for AI players.
///
/// ```json
/// {"seed": 12345, "think_aloud": true}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// RNG seed for reproducible decisions. Ignored by deterministic AIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(flatten)]
    pub custom: serde_json::Map<String, JsonValue>,
}

impl AiConfig {
    /// Parse a seat config; malformed input yields an empty config.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        config
            .and_then(|json| serde_json::from_value(json.clone()).ok())
            .unwrap_or_default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            custom: serde_json::Map::new(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            seed: None,
            custom: serde_json::Map::new(),
        }
    }
}
