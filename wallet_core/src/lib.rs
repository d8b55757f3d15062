//! Wallet core library for the moo console.
//!
//! Provides what the console needs to manage identities:
//! - Accounts (Ed25519 key pair + derived address)
//! - Key files (`<name>.json`, one per named account)
//! - The profile-scoped [`KeyStore`] with its reserved `root` identity

pub mod account;
pub mod error;
pub mod key_file;
pub mod keystore;

pub use account::{Account, AccountRef, ROOT_ACCOUNT};
pub use error::{CreateError, KeystoreError};
pub use key_file::{load_key_file, save_key_file};
pub use keystore::{KeyStore, KEYS_DIR};
