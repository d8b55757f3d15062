use std::time::Duration;

use moo_transactions::TransactionError;
use moo_types::TxHash;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("request to node failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("node returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("transaction {hash} was not confirmed within {timeout:?}")]
    Timeout { hash: TxHash, timeout: Duration },

    #[error("transaction {hash} failed: {vm_status}")]
    Rejected { hash: TxHash, vm_status: String },

    #[error("invalid node response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Encoding(#[from] TransactionError),
}

#[derive(Debug, Error)]
pub enum FaucetError {
    #[error("request to faucet failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("faucet returned HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid faucet response: {0}")]
    InvalidResponse(String),

    #[error("funding transaction not confirmed: {0}")]
    Confirmation(#[source] LedgerError),
}
