//! Account address derivation from public keys.
//!
//! Address = SHA3-256(public_key || scheme), where the scheme byte for a
//! single Ed25519 key is `0x00`.

use moo_types::{AccountAddress, PublicKey};

/// Authentication scheme byte for single-signer Ed25519 accounts.
const ED25519_SCHEME: u8 = 0x00;

/// Derive the account address controlled by a public key.
pub fn derive_address(public_key: &PublicKey) -> AccountAddress {
    let digest = crate::sha3_256_multi(&[public_key.as_bytes(), &[ED25519_SCHEME]]);
    AccountAddress::new(digest)
}
