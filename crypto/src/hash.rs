//! SHA3-256 hashing.

use tiny_keccak::{Hasher, Sha3};

/// Compute SHA3-256 of the input.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    sha3_256_multi(&[data])
}

/// Compute SHA3-256 over the concatenation of several slices without
/// allocating the joined buffer.
pub fn sha3_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha3::v256();
    for part in parts {
        hasher.update(part);
    }
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}
