use std::time::Duration;

use async_trait::async_trait;
use moo_config::ConsoleConfig;
use moo_transactions::{EntryFunction, EntryFunctionPayload};
use moo_types::{AccountAddress, TxHash};
use moo_wallet_core::Account;

use crate::error::LedgerError;

/// What the console needs from a ledger node.
///
/// Submission returns as soon as the node has accepted the transaction;
/// finality is a separate [`LedgerClient::await_confirmation`] step so the
/// caller can report that it is waiting.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Submit a JSON entry-function payload signed by `signer`.
    async fn submit(
        &self,
        signer: &Account,
        payload: &EntryFunctionPayload,
    ) -> Result<TxHash, LedgerError>;

    /// Submit a BCS-encoded entry function signed by `signer`.
    async fn submit_bcs(
        &self,
        signer: &Account,
        function: EntryFunction,
    ) -> Result<TxHash, LedgerError>;

    /// Block until `hash` is committed. A committed but failed transaction
    /// is an error, as is not seeing it committed before the deadline.
    async fn await_confirmation(&self, hash: &TxHash) -> Result<(), LedgerError>;

    /// Native coin balance of `address`.
    async fn balance(&self, address: AccountAddress) -> Result<u64, LedgerError>;
}

/// Gas, expiry and confirmation parameters for submitted transactions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitOptions {
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub expiration_ttl: Duration,
    pub confirmation_timeout: Duration,
    pub poll_interval: Duration,
}

impl From<&ConsoleConfig> for SubmitOptions {
    fn from(config: &ConsoleConfig) -> Self {
        Self {
            max_gas_amount: config.max_gas_amount,
            gas_unit_price: config.gas_unit_price,
            expiration_ttl: Duration::from_secs(config.expiration_ttl_secs),
            confirmation_timeout: config.confirmation_timeout(),
            poll_interval: config.poll_interval(),
        }
    }
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self::from(&ConsoleConfig::default())
    }
}
