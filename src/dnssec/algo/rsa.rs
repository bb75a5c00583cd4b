//! RSA (algorithms 5/7/8/10): PKCS#1 v1.5 signatures over SHA-1/256/512
//! (spec §4.8 algorithm table). DNSKEY key bytes are a 1-octet exponent
//! length (or `0` plus a 2-octet extended length) followed by the
//! exponent, then the modulus (spec §4.8).

use crate::error::DnssecError;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

/// Decode the RFC 3110 public key wire format into an `RsaPublicKey`.
pub fn decode_public_key(bytes: &[u8]) -> Result<RsaPublicKey, DnssecError> {
    if bytes.is_empty() {
        return Err(DnssecError::AlgorithmKeyMismatch);
    }
    let (exp_len, offset) = if bytes[0] == 0 {
        let len_bytes = bytes.get(1..3).ok_or(DnssecError::AlgorithmKeyMismatch)?;
        (u16::from_be_bytes([len_bytes[0], len_bytes[1]]) as usize, 3usize)
    } else {
        (bytes[0] as usize, 1usize)
    };
    let e = bytes
        .get(offset..offset + exp_len)
        .ok_or(DnssecError::AlgorithmKeyMismatch)?;
    let n = bytes.get(offset + exp_len..).ok_or(DnssecError::AlgorithmKeyMismatch)?;
    if n.is_empty() {
        return Err(DnssecError::AlgorithmKeyMismatch);
    }
    RsaPublicKey::new(BigUint::from_bytes_be(n), BigUint::from_bytes_be(e))
        .map_err(|_| DnssecError::AlgorithmKeyMismatch)
}

/// Inverse of [`decode_public_key`]: the RFC 3110 wire form of a public
/// key, used when publishing a freshly generated DNSKEY.
pub fn encode_public_key(key: &RsaPublicKey) -> Vec<u8> {
    let e = key.e().to_bytes_be();
    let n = key.n().to_bytes_be();
    let mut out = Vec::with_capacity(3 + e.len() + n.len());
    if e.len() <= 255 {
        out.push(e.len() as u8);
    } else {
        out.push(0);
        out.extend_from_slice(&(e.len() as u16).to_be_bytes());
    }
    out.extend_from_slice(&e);
    out.extend_from_slice(&n);
    out
}

macro_rules! rsa_family {
    ($sign_fn:ident, $verify_fn:ident, $digest:ty) => {
        pub fn $sign_fn(key: &RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>, DnssecError> {
            let signing_key = SigningKey::<$digest>::new(key.clone());
            let sig = signing_key
                .try_sign(data)
                .map_err(|_| DnssecError::ValidationFailure)?;
            Ok(sig.to_vec())
        }

        pub fn $verify_fn(key: &RsaPublicKey, data: &[u8], signature: &[u8]) -> Result<(), DnssecError> {
            let verifying_key = VerifyingKey::<$digest>::new(key.clone());
            let sig = Signature::try_from(signature).map_err(|_| DnssecError::ValidationFailure)?;
            verifying_key
                .verify(data, &sig)
                .map_err(|_| DnssecError::ValidationFailure)
        }
    };
}

rsa_family!(sign_sha1, verify_sha1, Sha1);
rsa_family!(sign_sha256, verify_sha256, Sha256);
rsa_family!(sign_sha512, verify_sha512, Sha512);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsa_key_wire_round_trip_small_exponent() {
        let mut rng = rand::thread_rng();
        let key = RsaPrivateKey::new(&mut rng, 1024).unwrap();
        let pubkey = RsaPublicKey::from(&key);
        let encoded = encode_public_key(&pubkey);
        let decoded = decode_public_key(&encoded).unwrap();
        assert_eq!(decoded.n(), pubkey.n());
        assert_eq!(decoded.e(), pubkey.e());
    }

    #[test]
    fn sha256_sign_then_verify_round_trips() {
        let mut rng = rand::thread_rng();
        let key = RsaPrivateKey::new(&mut rng, 1024).unwrap();
        let pubkey = RsaPublicKey::from(&key);
        let data = b"dnssec rrset canonical bytes";
        let sig = sign_sha256(&key, data).unwrap();
        assert!(verify_sha256(&pubkey, data, &sig).is_ok());
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let mut rng = rand::thread_rng();
        let key = RsaPrivateKey::new(&mut rng, 1024).unwrap();
        let pubkey = RsaPublicKey::from(&key);
        let data = b"dnssec rrset canonical bytes";
        let mut sig = sign_sha256(&key, data).unwrap();
        sig[0] ^= 0xFF;
        assert!(verify_sha256(&pubkey, data, &sig).is_err());
    }
}
