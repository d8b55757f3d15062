//! Ed25519 key generation and private-key text decoding.

use ed25519_dalek::SigningKey;
use moo_types::{KeyPair, MooError, PrivateKey, PublicKey};
use rand::rngs::OsRng;

/// AIP-80 style prefix some tools put in front of Ed25519 private keys.
const ED25519_PRIVATE_PREFIX: &str = "ed25519-priv-";

/// Generate a new Ed25519 key pair from a secure random source.
pub fn generate_keypair() -> KeyPair {
    let signing_key = SigningKey::generate(&mut OsRng);
    let verifying_key = signing_key.verifying_key();
    KeyPair {
        public: PublicKey(verifying_key.to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Derive the public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    let signing_key = SigningKey::from_bytes(&private.0);
    let verifying_key = signing_key.verifying_key();
    PublicKey(verifying_key.to_bytes())
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> KeyPair {
    let public = public_from_private(&private);
    KeyPair { public, private }
}

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    keypair_from_private(PrivateKey(*seed))
}

/// Decode a private key as written in settings documents and key files.
///
/// Accepts `0x<64 hex>`, bare `<64 hex>` and `ed25519-priv-0x<64 hex>`.
pub fn parse_private_key(text: &str) -> Result<PrivateKey, MooError> {
    let trimmed = text.trim();
    let without_scheme = trimmed
        .strip_prefix(ED25519_PRIVATE_PREFIX)
        .unwrap_or(trimmed);
    let digits = without_scheme
        .strip_prefix("0x")
        .unwrap_or(without_scheme);

    let mut bytes = [0u8; 32];
    hex::decode_to_slice(digits, &mut bytes).map_err(|e| {
        MooError::InvalidKey(format!("expected 32 hex-encoded bytes: {e}"))
    })?;
    Ok(PrivateKey(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_valid_keypair() {
        let kp = generate_keypair();
        assert_ne!(kp.public.0, [0u8; 32]);
        assert_ne!(kp.private.0, [0u8; 32]);
    }

    #[test]
    fn public_from_private_is_deterministic() {
        let kp = generate_keypair();
        let pub2 = public_from_private(&kp.private);
        assert_eq!(kp.public.0, pub2.0);
    }

    #[test]
    fn keypair_from_private_roundtrip() {
        let kp1 = generate_keypair();
        let kp2 = keypair_from_private(PrivateKey(kp1.private.0));
        assert_eq!(kp1.public.0, kp2.public.0);
    }

    #[test]
    fn different_seeds_produce_different_keys() {
        let kp1 = keypair_from_seed(&[1u8; 32]);
        let kp2 = keypair_from_seed(&[2u8; 32]);
        assert_ne!(kp1.public.0, kp2.public.0);
    }

    #[test]
    fn parse_accepts_all_spellings() {
        let hex_key = "11".repeat(32);
        for text in [
            format!("0x{hex_key}"),
            hex_key.clone(),
            format!("ed25519-priv-0x{hex_key}"),
            format!("  0x{hex_key}\n"),
        ] {
            let key = parse_private_key(&text).unwrap();
            assert_eq!(key.0, [0x11; 32], "failed for {text:?}");
        }
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(parse_private_key("0x1234").is_err());
        assert!(parse_private_key(&format!("0x{}", "11".repeat(33))).is_err());
        assert!(parse_private_key("not a key").is_err());
    }

    #[test]
    fn hex_literal_round_trips_through_parse() {
        let kp = generate_keypair();
        let parsed = parse_private_key(&kp.private.to_hex_literal()).unwrap();
        assert_eq!(parsed.0, kp.private.0);
    }
}
