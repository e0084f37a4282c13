//! Hash primitives for the address pipelines.

use bitcoin::hashes::{Hash, hash160, ripemd160, sha256};
use tiny_keccak::{Hasher, Keccak};

pub fn sha256(data: &[u8]) -> [u8; 32] {
    sha256::Hash::hash(data).to_byte_array()
}

pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    ripemd160::Hash::hash(data).to_byte_array()
}

/// RIPEMD-160 of SHA-256.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    hash160::Hash::hash(data).to_byte_array()
}

/// Keccak-256 with the original (pre-SHA-3) padding. Ethereum addresses
/// depend on this exact variant; NIST SHA3-256 produces different digests
/// with no error signal anywhere.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut out = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut out);
    out
}
