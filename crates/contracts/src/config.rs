//! Contract enforcement configuration.
//!
//! The default is strict: every violation fails the call. `Warn` reports
//! violations through the decorator's hook and lets the call proceed;
//! `Off` skips checking entirely.
//!
//! Configuration comes from JSON or from the environment:
//!
//! | Variable               | Values                     | Default  |
//! |------------------------|----------------------------|----------|
//! | `PLEDGE_ENFORCEMENT`   | `strict`, `warn`, `off`    | `strict` |
//! | `PLEDGE_CHECK_RETURNS` | `true`, `false`, `1`, `0`  | `true`   |

use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub const ENFORCEMENT_VAR: &str = "PLEDGE_ENFORCEMENT";
pub const CHECK_RETURNS_VAR: &str = "PLEDGE_CHECK_RETURNS";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

/// What happens when a contract is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforcement {
    /// Fail the call.
    #[default]
    Strict,
    /// Report and continue.
    Warn,
    /// Do not check.
    Off,
}

impl FromStr for Enforcement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Enforcement::Strict),
            "warn" => Ok(Enforcement::Warn),
            "off" => Ok(Enforcement::Off),
            _ => Err(ConfigError::InvalidValue {
                key: ENFORCEMENT_VAR.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Settings shared by every decorator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub enforcement: Enforcement,
    /// Whether `returns` contracts are checked.
    pub check_returns: bool,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            enforcement: Enforcement::Strict,
            check_returns: true,
        }
    }
}

impl ContractConfig {
    /// Parse a JSON document; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENFORCEMENT_VAR) {
            config.enforcement = value.parse()?;
        }
        if let Some(value) = lookup(CHECK_RETURNS_VAR) {
            config.check_returns = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: CHECK_RETURNS_VAR.to_string(),
                        value,
                    })
                }
            };
        }
        Ok(config)
    }

    /// The process-wide default, read from the environment on first use.
    ///
    /// An invalid environment falls back to the strict default.
    pub fn global() -> &'static ContractConfig {
        static GLOBAL: OnceLock<ContractConfig> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            Self::from_env().unwrap_or_else(|err| {
                warn!(error = %err, "ignoring invalid contract configuration");
                Self::default()
            })
        })
    }

    pub fn checks_enabled(&self) -> bool {
        self.enforcement != Enforcement::Off
    }

    pub fn returns_enabled(&self) -> bool {
        self.checks_enabled() && self.check_returns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_is_strict() {
        let config = ContractConfig::default();
        assert_eq!(config.enforcement, Enforcement::Strict);
        assert!(config.check_returns);
        assert!(config.returns_enabled());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ContractConfig::from_json(r#"{"enforcement": "warn"}"#).unwrap();
        assert_eq!(config.enforcement, Enforcement::Warn);
        assert!(config.check_returns);
    }

    #[test]
    fn test_from_json_rejects_unknown_mode() {
        let err = ContractConfig::from_json(r#"{"enforcement": "loud"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_from_lookup() {
        let config =
            ContractConfig::from_lookup(lookup(&[(ENFORCEMENT_VAR, "OFF"), (CHECK_RETURNS_VAR, "0")]))
                .unwrap();
        assert_eq!(config.enforcement, Enforcement::Off);
        assert!(!config.check_returns);
        assert!(!config.checks_enabled());
    }

    #[test]
    fn test_from_lookup_invalid() {
        let err = ContractConfig::from_lookup(lookup(&[(CHECK_RETURNS_VAR, "maybe")])).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref key, .. } if key == CHECK_RETURNS_VAR)
        );
    }

    #[test]
    fn test_off_disables_returns() {
        let config = ContractConfig {
            enforcement: Enforcement::Off,
            check_returns: true,
        };
        assert!(!config.returns_enabled());
    }

    #[test]
    fn test_roundtrip_names() {
        let json = serde_json::to_string(&ContractConfig::default()).unwrap();
        assert_eq!(json, r#"{"enforcement":"strict","check_returns":true}"#);
    }
}
