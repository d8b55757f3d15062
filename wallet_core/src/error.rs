use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeystoreError {
    #[error("name '{0}' is reserved")]
    ReservedName(String),

    #[error("account '{0}' already exists")]
    AlreadyExists(String),

    #[error("invalid account name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("key file {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KeystoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure of [`crate::KeyStore::create`]: either the keystore refused the
/// name or could not persist, or the on-chain creation callback failed.
#[derive(Debug, Error)]
pub enum CreateError<E> {
    #[error(transparent)]
    Keystore(#[from] KeystoreError),

    #[error("on-chain account creation failed: {0}")]
    OnChain(E),
}
