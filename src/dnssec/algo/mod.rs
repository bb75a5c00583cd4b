//! Per-algorithm-family signature backends (spec §4.8 algorithm table),
//! one module per family matching the teacher's
//! `src/dns/rdata/sec/algo/rsa_sha1.rs` layout, plus a `verify`/`sign`
//! dispatcher keyed on the RRSIG/DNSKEY algorithm number.

pub mod ecdsa;
pub mod eddsa;
pub mod rsa;

use crate::error::DnssecError;
use crate::rdata::dnssec::Dnskey;

pub const RSAMD5: u8 = 1;
pub const DSA: u8 = 3;
pub const RSASHA1: u8 = 5;
pub const DSANSEC3SHA1: u8 = 6;
pub const RSASHA1NSEC3SHA1: u8 = 7;
pub const RSASHA256: u8 = 8;
pub const RSASHA512: u8 = 10;
pub const ECCGOST: u8 = 12;
pub const ECDSAP256SHA256: u8 = 13;
pub const ECDSAP384SHA384: u8 = 14;
pub const ED25519: u8 = 15;
pub const ED448: u8 = 16;

/// Verify `signature` over `data` using the DNSKEY's public key bytes,
/// dispatching on `dnskey.algorithm` (spec §4.8 algorithm table).
pub fn verify(dnskey: &Dnskey, data: &[u8], signature: &[u8]) -> Result<(), DnssecError> {
    match dnskey.algorithm {
        RSASHA1 | RSASHA1NSEC3SHA1 => {
            let key = rsa::decode_public_key(&dnskey.public_key)?;
            rsa::verify_sha1(&key, data, signature)
        }
        RSASHA256 => {
            let key = rsa::decode_public_key(&dnskey.public_key)?;
            rsa::verify_sha256(&key, data, signature)
        }
        RSASHA512 => {
            let key = rsa::decode_public_key(&dnskey.public_key)?;
            rsa::verify_sha512(&key, data, signature)
        }
        ECDSAP256SHA256 => {
            let key = ecdsa::decode_p256_public_key(&dnskey.public_key)?;
            ecdsa::verify_p256(&key, data, signature)
        }
        ECDSAP384SHA384 => {
            let key = ecdsa::decode_p384_public_key(&dnskey.public_key)?;
            ecdsa::verify_p384(&key, data, signature)
        }
        ED25519 => {
            let key = eddsa::decode_public_key(&dnskey.public_key)?;
            eddsa::verify(&key, data, signature)
        }
        other => Err(DnssecError::UnsupportedAlgorithm(other)),
    }
}
