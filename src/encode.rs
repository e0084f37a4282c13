//! Address encoders: public key (or hash) in, address text out.
//!
//! These mirror the exact derivation chains the scanner matches against,
//! including two deliberately non-standard ones:
//!
//! - the "p2wpkh uncompressed" label runs the witness-v0 chain over the
//!   65-byte serialization even though consensus P2WPKH only admits
//!   compressed keys;
//! - the p2tr encoder uses the raw x-only key as the witness program with
//!   no BIP-341 tap-tweak, i.e. the address of the untweaked internal key.
//!
//! Both are kept as-is so derived addresses line up with target lists built
//! under the same convention.

use bitcoin::{Address, KnownHrp, WitnessProgram, WitnessVersion, base58};

use crate::error::{Error, Result};
use crate::hashes::{hash160, keccak256};

const VERSION_P2PKH: u8 = 0x00;
const VERSION_P2SH: u8 = 0x05;

/// `Base58Encode(version || payload || SHA256d(version || payload)[..4])`.
pub fn base58check(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len());
    data.push(version);
    data.extend_from_slice(payload);
    base58::encode_check(&data)
}

fn check_pubkey(pubkey: &[u8]) -> Result<()> {
    match pubkey.len() {
        33 | 65 => Ok(()),
        _ => Err(Error::Encoding("public key must be 33 or 65 bytes")),
    }
}

fn segwit(version: WitnessVersion, program: &[u8]) -> Result<String> {
    let program = WitnessProgram::new(version, program)
        .map_err(|_| Error::Encoding("bad witness program length"))?;
    Ok(Address::from_witness_program(program, KnownHrp::Mainnet).to_string())
}

/// Base58Check(0x00, hash160(pubkey)).
pub fn p2pkh(pubkey: &[u8]) -> Result<String> {
    check_pubkey(pubkey)?;
    Ok(base58check(VERSION_P2PKH, &hash160(pubkey)))
}

/// P2SH wrapping a classic pay-to-pubkey-hash redeem script:
/// `OP_DUP OP_HASH160 <h160> OP_EQUALVERIFY OP_CHECKSIG`.
pub fn p2sh_p2pkh(pubkey: &[u8]) -> Result<String> {
    check_pubkey(pubkey)?;
    let h160 = hash160(pubkey);
    let mut redeem = Vec::with_capacity(25);
    redeem.extend_from_slice(&[0x76, 0xa9, 0x14]);
    redeem.extend_from_slice(&h160);
    redeem.extend_from_slice(&[0x88, 0xac]);
    Ok(base58check(VERSION_P2SH, &hash160(&redeem)))
}

/// Native segwit v0, program = hash160 of the given serialization.
pub fn p2wpkh(pubkey: &[u8]) -> Result<String> {
    check_pubkey(pubkey)?;
    segwit(WitnessVersion::V0, &hash160(pubkey))
}

/// P2SH wrapping a v0 witness program: redeem script `00 14 <h160>`.
pub fn p2sh_p2wpkh(pubkey: &[u8]) -> Result<String> {
    check_pubkey(pubkey)?;
    let h160 = hash160(pubkey);
    let mut redeem = Vec::with_capacity(22);
    redeem.extend_from_slice(&[0x00, 0x14]);
    redeem.extend_from_slice(&h160);
    Ok(base58check(VERSION_P2SH, &hash160(&redeem)))
}

/// Segwit v1 (Bech32m) over the untweaked x-only key.
pub fn p2tr(x_only: &[u8; 32]) -> Result<String> {
    segwit(WitnessVersion::V1, x_only)
}

/// Keccak-256 of the uncompressed point (sans the 0x04 byte), last 20 bytes,
/// EIP-55 checksum-cased hex with a 0x prefix.
pub fn ethereum(uncompressed: &[u8; 65]) -> Result<String> {
    if uncompressed[0] != 0x04 {
        return Err(Error::Encoding("uncompressed key must start with 0x04"));
    }
    let digest = keccak256(&uncompressed[1..]);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&digest[12..]);
    Ok(eip55(&addr))
}

fn eip55(addr: &[u8; 20]) -> String {
    let lower = hex::encode(addr);
    let digest = keccak256(lower.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (digest[i / 2] >> (4 * (1 - i % 2))) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
