//! Public-key derivation: one scalar multiplication, three serializations.

use bitcoin::secp256k1::{All, PublicKey, Secp256k1};

use crate::scalar::PrivateScalar;

/// The curve point for a private scalar, with its compressed (33-byte),
/// uncompressed (65-byte) and x-only (32-byte, Taproot) encodings.
pub struct PublicPoint {
    inner: PublicKey,
}

impl PublicPoint {
    pub fn derive(secp: &Secp256k1<All>, scalar: &PrivateScalar) -> Self {
        Self {
            inner: PublicKey::from_secret_key(secp, scalar.secret_key()),
        }
    }

    /// Parity-prefixed x coordinate (0x02/0x03).
    pub fn compressed(&self) -> [u8; 33] {
        self.inner.serialize()
    }

    /// 0x04 || x || y.
    pub fn uncompressed(&self) -> [u8; 65] {
        self.inner.serialize_uncompressed()
    }

    /// Compressed encoding with the parity byte dropped.
    pub fn x_only(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.serialize()[1..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn point_of(bytes: [u8; 32]) -> PublicPoint {
        let secp = Secp256k1::new();
        let scalar = PrivateScalar::from_bytes(bytes).unwrap();
        PublicPoint::derive(&secp, &scalar)
    }

    #[test]
    fn generator_point_serializations() {
        let mut one = [0u8; 32];
        one[31] = 1;
        let point = point_of(one);

        // Scalar 1 yields the generator point itself.
        assert_eq!(
            point.compressed(),
            hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
        );
        assert_eq!(
            point.uncompressed(),
            hex!(
                "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
                "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
            )
        );
        assert_eq!(
            point.x_only(),
            hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
        );
    }

    #[test]
    fn serializations_agree_on_coordinates() {
        let mut k = [0u8; 32];
        k[31] = 0x2a;
        let point = point_of(k);
        // x coordinate must be identical across all three forms.
        assert_eq!(point.compressed()[1..], point.uncompressed()[1..33]);
        assert_eq!(point.x_only()[..], point.compressed()[1..]);
    }

    #[test]
    fn derivation_is_deterministic() {
        let mut k = [0u8; 32];
        k[0] = 0x11;
        k[31] = 0x99;
        assert_eq!(point_of(k).compressed(), point_of(k).compressed());
        assert_eq!(point_of(k).uncompressed(), point_of(k).uncompressed());
    }
}
