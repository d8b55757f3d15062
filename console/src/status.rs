use moo_types::TxHash;
use tracing::info;

/// Receives progress while the console blocks on confirmations.
pub trait StatusSink: Send + Sync {
    fn waiting(&self, operation: &str, hash: &TxHash);
    fn done(&self, operation: &str, hash: &TxHash);
}

/// Reports progress through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingStatus;

impl StatusSink for TracingStatus {
    fn waiting(&self, operation: &str, hash: &TxHash) {
        info!(operation, %hash, "waiting for transaction");
    }

    fn done(&self, operation: &str, hash: &TxHash) {
        info!(operation, %hash, "transaction done");
    }
}
