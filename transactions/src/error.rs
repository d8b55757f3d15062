use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("BCS encoding failed: {0}")]
    Encoding(#[from] bcs::Error),
}
