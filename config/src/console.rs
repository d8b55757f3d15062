//! Console settings with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::ConfigError;

/// Tuning knobs for the console.
///
/// Can be loaded from a TOML file via [`ConsoleConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so an
/// empty file is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Name of the token module published under the root account.
    #[serde(default = "default_coin_module")]
    pub coin_module: String,

    /// How long to wait for a submitted transaction to reach finality.
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,

    /// Delay between confirmation polls.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Upper bound on concurrent balance queries when listing accounts.
    #[serde(default = "default_balance_workers")]
    pub balance_workers: usize,

    /// Gas ceiling attached to every transaction.
    #[serde(default = "default_max_gas_amount")]
    pub max_gas_amount: u64,

    #[serde(default = "default_gas_unit_price")]
    pub gas_unit_price: u64,

    /// Seconds from submission until the node may drop the transaction.
    #[serde(default = "default_expiration_ttl_secs")]
    pub expiration_ttl_secs: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_coin_module() -> String {
    "MooCoin".to_string()
}

fn default_confirmation_timeout_secs() -> u64 {
    30
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_balance_workers() -> usize {
    10
}

fn default_max_gas_amount() -> u64 {
    100_000
}

fn default_gas_unit_price() -> u64 {
    100
}

fn default_expiration_ttl_secs() -> u64 {
    600
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ConsoleConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ConsoleConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|e| ConfigError::ConsoleConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load the nearest `moo.toml` above `start`, or defaults when there is none.
    pub fn discover(start: &Path) -> Result<Self, ConfigError> {
        match crate::find_console_config(start) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using console config");
                Self::from_toml_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Worker count clamped to at least one.
    pub fn balance_workers(&self) -> usize {
        self.balance_workers.max(1)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            coin_module: default_coin_module(),
            confirmation_timeout_secs: default_confirmation_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            balance_workers: default_balance_workers(),
            max_gas_amount: default_max_gas_amount(),
            gas_unit_price: default_gas_unit_price(),
            expiration_ttl_secs: default_expiration_ttl_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = ConsoleConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.coin_module, "MooCoin");
        assert_eq!(config.balance_workers, 10);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            coin_module = "BarnCoin"
            poll_interval_ms = 50
        "#;
        let config = ConsoleConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.coin_module, "BarnCoin");
        assert_eq!(config.poll_interval(), Duration::from_millis(50));
        assert_eq!(config.confirmation_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn zero_workers_clamps_to_one() {
        let config = ConsoleConfig {
            balance_workers: 0,
            ..ConsoleConfig::default()
        };
        assert_eq!(config.balance_workers(), 1);
    }

    #[test]
    fn missing_file_returns_config_error() {
        let err = ConsoleConfig::from_toml_file(Path::new("/nonexistent/moo.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ConsoleConfig { .. }));
    }

    #[test]
    fn discover_reads_nearest_file() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(tmp.path().join("moo.toml"), "balance_workers = 3\n").unwrap();

        let config = ConsoleConfig::discover(&nested).unwrap();
        assert_eq!(config.balance_workers, 3);
    }
}
