//! Key-space partitioning: random 30-byte prefix, exhaustive 16-bit suffix.

use bitcoin::secp256k1::constants::CURVE_ORDER;
use num_bigint::BigUint;
use rand::RngCore;

pub const PREFIX_BYTES: usize = 30;
pub const SUFFIX_COUNT: u32 = 1 << 16;

/// High-order 30 bytes of a candidate block. A prefix fixes a block of
/// 65536 consecutive scalars, all of which stay inside [1, N-1].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Prefix([u8; PREFIX_BYTES]);

impl Prefix {
    pub fn as_bytes(&self) -> &[u8; PREFIX_BYTES] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Uniform rejection sampler over admissible prefixes.
pub struct PrefixSampler {
    max: BigUint,
}

impl PrefixSampler {
    pub fn new() -> Self {
        // Largest prefix whose whole block fits: prefix * 2^16 + 0xffff < N.
        // The all-zero prefix is rejected too, its suffix 0 composes to the
        // scalar 0.
        let order = BigUint::from_bytes_be(&CURVE_ORDER);
        let max = (order - BigUint::from(SUFFIX_COUNT)) >> 16;
        Self { max }
    }

    pub fn sample<R: RngCore>(&self, rng: &mut R) -> Prefix {
        let mut buf = [0u8; PREFIX_BYTES];
        loop {
            rng.fill_bytes(&mut buf);
            let value = BigUint::from_bytes_be(&buf);
            if value != BigUint::from(0u32) && value <= self.max {
                return Prefix(buf);
            }
        }
    }
}

impl Default for PrefixSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Big-endian concatenation `prefix || suffix`.
pub fn compose(prefix: &Prefix, suffix: u16) -> [u8; 32] {
    let mut candidate = [0u8; 32];
    candidate[..PREFIX_BYTES].copy_from_slice(prefix.as_bytes());
    candidate[PREFIX_BYTES..].copy_from_slice(&suffix.to_be_bytes());
    candidate
}

/// All 65536 candidates of one block, ascending.
pub fn candidates(prefix: Prefix) -> impl Iterator<Item = [u8; 32]> {
    (0..=u16::MAX).map(move |suffix| compose(&prefix, suffix))
}
