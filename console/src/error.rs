use std::path::PathBuf;

use moo_client::{FaucetError, LedgerError};
use moo_config::{ConfigError, SETTINGS_DIR};
use moo_types::{AccountAddress, MooError};
use moo_wallet_core::KeystoreError;
use thiserror::Error;

/// Everything a console operation can fail with.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("no {} directory found in {} or any parent directory", SETTINGS_DIR, start.display())]
    SettingsNotFound { start: PathBuf },

    #[error("cannot read settings document {}: {reason}", path.display())]
    SettingsUnreadable { path: PathBuf, reason: String },

    #[error("profile '{0}' does not exist or is empty")]
    ProfileNotFound(String),

    #[error("profile '{profile}' is invalid: {reason}")]
    InvalidProfile { profile: String, reason: String },

    #[error("root key of profile '{profile}' is invalid: {source}")]
    InvalidRootKey {
        profile: String,
        #[source]
        source: MooError,
    },

    #[error("account '{0}' not found")]
    AccountNotFound(String),

    #[error("account '{0}' already exists")]
    AccountAlreadyExists(String),

    #[error("'{0}' is a reserved account name")]
    ReservedName(String),

    #[error("invalid account name '{name}': {reason}")]
    InvalidAccountName { name: String, reason: &'static str },

    #[error("{operation} transaction failed: {source}")]
    TransactionFailed {
        operation: &'static str,
        #[source]
        source: LedgerError,
    },

    #[error("funding account '{account}' ({address}) failed: {source}")]
    FundingFailed {
        account: String,
        address: AccountAddress,
        #[source]
        source: FaucetError,
    },

    #[error("balance query for account '{account}' failed: {source}")]
    BalanceQuery {
        account: String,
        #[source]
        source: LedgerError,
    },

    #[error(transparent)]
    Keystore(KeystoreError),

    #[error("cannot set up client for {url}: {reason}")]
    Client { url: String, reason: String },

    #[error(transparent)]
    Config(ConfigError),
}

impl From<ConfigError> for ConsoleError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::SettingsUnreadable { path, reason } => {
                Self::SettingsUnreadable { path, reason }
            }
            ConfigError::ProfileNotFound(profile) => Self::ProfileNotFound(profile),
            ConfigError::MissingField { profile, field } => Self::InvalidProfile {
                profile,
                reason: format!("{field} is missing or empty"),
            },
            ConfigError::InvalidProfile { profile, reason } => {
                Self::InvalidProfile { profile, reason }
            }
            other @ ConfigError::ConsoleConfig { .. } => Self::Config(other),
        }
    }
}

impl From<KeystoreError> for ConsoleError {
    fn from(e: KeystoreError) -> Self {
        match e {
            KeystoreError::ReservedName(name) => Self::ReservedName(name),
            KeystoreError::AlreadyExists(name) => Self::AccountAlreadyExists(name),
            KeystoreError::InvalidName { name, reason } => Self::InvalidAccountName { name, reason },
            other => Self::Keystore(other),
        }
    }
}
