//! Private-key scalar validation.

use bitcoin::secp256k1::SecretKey;
use bitcoin::secp256k1::constants::CURVE_ORDER;
use num_bigint::BigUint;

use crate::error::{Error, Result};

/// A validated secp256k1 private key: 32 big-endian bytes with
/// `1 <= value < N`. Constructed per candidate and discarded after one
/// derivation.
#[derive(Clone)]
pub struct PrivateScalar {
    bytes: [u8; 32],
    key: SecretKey,
}

impl PrivateScalar {
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self> {
        let value = BigUint::from_bytes_be(&bytes);
        let order = BigUint::from_bytes_be(&CURVE_ORDER);
        if value == BigUint::from(0u32) || value >= order {
            return Err(Error::InvalidScalar);
        }
        let key = SecretKey::from_slice(&bytes).map_err(|_| Error::InvalidScalar)?;
        Ok(Self { bytes, key })
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.key
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_one() -> [u8; 32] {
        let mut b = [0u8; 32];
        b[31] = 1;
        b
    }

    #[test]
    fn rejects_zero() {
        assert!(matches!(
            PrivateScalar::from_bytes([0u8; 32]),
            Err(Error::InvalidScalar)
        ));
    }

    #[test]
    fn rejects_curve_order_and_above() {
        assert!(PrivateScalar::from_bytes(CURVE_ORDER).is_err());
        assert!(PrivateScalar::from_bytes([0xff; 32]).is_err());
    }

    #[test]
    fn accepts_order_minus_one() {
        let order = BigUint::from_bytes_be(&CURVE_ORDER);
        let max = order - BigUint::from(1u32);
        let raw = max.to_bytes_be();
        let mut bytes = [0u8; 32];
        bytes[32 - raw.len()..].copy_from_slice(&raw);
        assert!(PrivateScalar::from_bytes(bytes).is_ok());
    }

    #[test]
    fn accepts_one_and_round_trips() {
        let scalar = PrivateScalar::from_bytes(scalar_one()).unwrap();
        assert_eq!(scalar.as_bytes(), &scalar_one());
        assert_eq!(
            scalar.to_hex(),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
    }
}
