//! Accounts: an Ed25519 key pair and the address it controls.

use std::fmt;

use moo_crypto::{derive_address, generate_keypair, keypair_from_private, sign_message};
use moo_types::{AccountAddress, KeyPair, PrivateKey, PublicKey, Signature};

/// Name that always resolves to the profile's root account.
pub const ROOT_ACCOUNT: &str = "root";

/// A signing identity.
pub struct Account {
    keys: KeyPair,
    address: AccountAddress,
}

impl Account {
    /// Fresh random identity.
    pub fn generate() -> Self {
        Self::from_keys(generate_keypair())
    }

    pub fn from_private_key(private: PrivateKey) -> Self {
        Self::from_keys(keypair_from_private(private))
    }

    fn from_keys(keys: KeyPair) -> Self {
        let address = derive_address(&keys.public);
        Self { keys, address }
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.keys.public
    }

    pub fn keys(&self) -> &KeyPair {
        &self.keys
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        sign_message(message, &self.keys.private)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// How a user-supplied account name resolves.
///
/// `root` is virtual: it comes from the profile settings and never has a
/// key file. Every other name refers to a persisted entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountRef<'a> {
    Root,
    Named(&'a str),
}

impl<'a> AccountRef<'a> {
    pub fn parse(name: &'a str) -> Self {
        if name == ROOT_ACCOUNT {
            Self::Root
        } else {
            Self::Named(name)
        }
    }
}
