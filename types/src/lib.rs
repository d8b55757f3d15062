//! Fundamental types for the moo console.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account addresses, Ed25519 key material and transaction hashes.

pub mod address;
pub mod error;
pub mod hash;
pub mod keys;

pub use address::AccountAddress;
pub use error::MooError;
pub use hash::TxHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
