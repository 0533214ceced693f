//! Curve construction defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::key::TangentMode;

/// Defaults applied when a curve is built from config or text records.
/// Keep this minimal; the engine itself has no tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial key-store capacity.
    pub initial_capacity: usize,
    /// Auto-tangent flag for curves created through [`Curve::with_config`](crate::Curve::with_config).
    pub auto_tangents: bool,
    /// Mode given to `time value` records, and substituted when a
    /// `time value mode` record names a manual mode.
    pub implicit_mode: TangentMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 4,
            auto_tangents: false,
            implicit_mode: TangentMode::SmoothClamped,
        }
    }
}

impl Config {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_json::from_str(s)?;
        // A manual implicit mode would make 2-field records ambiguous on save.
        if config.implicit_mode.is_manual() {
            log::warn!(
                "implicit_mode {} is manual; using {}",
                config.implicit_mode,
                TangentMode::SmoothClamped
            );
            config.implicit_mode = TangentMode::SmoothClamped;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "auto_tangents": true }"#).unwrap();
        assert!(config.auto_tangents);
        assert_eq!(config.initial_capacity, 4);
        assert_eq!(config.implicit_mode, TangentMode::SmoothClamped);
    }

    #[test]
    fn manual_implicit_mode_is_replaced() {
        let config = Config::from_json(r#"{ "implicit_mode": "ManualEqual" }"#).unwrap();
        assert_eq!(config.implicit_mode, TangentMode::SmoothClamped);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Config::from_json("{ not json").is_err());
    }
}
