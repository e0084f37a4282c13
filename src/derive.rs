//! Full address bundle for one private key.

use bitcoin::secp256k1::{All, Secp256k1};

use crate::encode;
use crate::error::Result;
use crate::keys::PublicPoint;
use crate::scalar::PrivateScalar;

/// One labeled address. The label names chain, script type and compression
/// variant; the order of a bundle is fixed and only matters for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressRecord {
    pub label: &'static str,
    pub address: String,
}

pub const BUNDLE_SIZE: usize = 11;

/// Derives all eleven labeled addresses for one scalar. Every bundle is
/// complete regardless of what the caller ends up comparing; any one entry
/// could be the match.
///
/// Both Ethereum labels carry the same canonical address: the account address
/// is a function of the curve point alone, independent of the serialization
/// the key was handed around in. The second label is display redundancy.
pub fn derive_all(secp: &Secp256k1<All>, scalar: &PrivateScalar) -> Result<Vec<AddressRecord>> {
    let point = PublicPoint::derive(secp, scalar);
    let compressed = point.compressed();
    let uncompressed = point.uncompressed();
    let eth = encode::ethereum(&uncompressed)?;

    let mut bundle = Vec::with_capacity(BUNDLE_SIZE);
    let mut push = |label, address| bundle.push(AddressRecord { label, address });

    push("bitcoin p2pkh compressed", encode::p2pkh(&compressed)?);
    push("bitcoin p2pkh uncompressed", encode::p2pkh(&uncompressed)?);
    push("bitcoin p2wpkh compressed", encode::p2wpkh(&compressed)?);
    push("bitcoin p2wpkh uncompressed", encode::p2wpkh(&uncompressed)?);
    push(
        "bitcoin p2sh(p2pkh) compressed",
        encode::p2sh_p2pkh(&compressed)?,
    );
    push(
        "bitcoin p2sh(p2pkh) uncompressed",
        encode::p2sh_p2pkh(&uncompressed)?,
    );
    push(
        "bitcoin p2sh(p2wpkh) compressed",
        encode::p2sh_p2wpkh(&compressed)?,
    );
    push(
        "bitcoin p2sh(p2wpkh) uncompressed",
        encode::p2sh_p2wpkh(&uncompressed)?,
    );
    push("bitcoin p2tr compressed", encode::p2tr(&point.x_only())?);
    push("ethereum uncompressed", eth.clone());
    push("ethereum compressed", eth);

    Ok(bundle)
}
