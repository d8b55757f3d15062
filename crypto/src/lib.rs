//! Cryptographic primitives for the moo console.
//!
//! - **Ed25519** for signing and signature verification
//! - **SHA3-256** for address derivation and signing-message prefixes
//! - Address derivation with the single-key Ed25519 scheme byte

pub mod address;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::derive_address;
pub use hash::{sha3_256, sha3_256_multi};
pub use keys::{
    generate_keypair, keypair_from_private, keypair_from_seed, parse_private_key,
    public_from_private,
};
pub use sign::{domain_separated, sign_message, verify_signature};
