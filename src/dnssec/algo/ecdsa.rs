//! ECDSA P-256/P-384 (algorithms 13/14): fixed-width `r || s` signatures
//! over SHA-256/SHA-384 respectively (spec §4.8 algorithm table).
//! DNSKEY key bytes are the public point's `x || y`, fixed-width, with
//! no leading type-tag octet (unlike TLS/X9.62 encodings).

use crate::error::DnssecError;
use p256::ecdsa::{Signature as P256Signature, SigningKey as P256SigningKey, VerifyingKey as P256VerifyingKey};
use p256::EncodedPoint as P256Point;
use p384::ecdsa::{Signature as P384Signature, SigningKey as P384SigningKey, VerifyingKey as P384VerifyingKey};
use p384::EncodedPoint as P384Point;
use signature::{Signer, Verifier};

fn p256_point_from_xy(bytes: &[u8]) -> Result<P256Point, DnssecError> {
    if bytes.len() != 64 {
        return Err(DnssecError::AlgorithmKeyMismatch);
    }
    Ok(P256Point::from_affine_coordinates(
        bytes[..32].into(),
        bytes[32..].into(),
        false,
    ))
}

fn p384_point_from_xy(bytes: &[u8]) -> Result<P384Point, DnssecError> {
    if bytes.len() != 96 {
        return Err(DnssecError::AlgorithmKeyMismatch);
    }
    Ok(P384Point::from_affine_coordinates(
        bytes[..48].into(),
        bytes[48..].into(),
        false,
    ))
}

pub fn decode_p256_public_key(bytes: &[u8]) -> Result<P256VerifyingKey, DnssecError> {
    let point = p256_point_from_xy(bytes)?;
    P256VerifyingKey::from_encoded_point(&point).map_err(|_| DnssecError::AlgorithmKeyMismatch)
}

pub fn decode_p384_public_key(bytes: &[u8]) -> Result<P384VerifyingKey, DnssecError> {
    let point = p384_point_from_xy(bytes)?;
    P384VerifyingKey::from_encoded_point(&point).map_err(|_| DnssecError::AlgorithmKeyMismatch)
}

/// `x || y`, the inverse of [`decode_p256_public_key`].
pub fn encode_p256_public_key(key: &P256VerifyingKey) -> Vec<u8> {
    let point = key.to_encoded_point(false);
    let mut out = Vec::with_capacity(64);
    out.extend_from_slice(point.x().expect("uncompressed point has x"));
    out.extend_from_slice(point.y().expect("uncompressed point has y"));
    out
}

pub fn encode_p384_public_key(key: &P384VerifyingKey) -> Vec<u8> {
    let point = key.to_encoded_point(false);
    let mut out = Vec::with_capacity(96);
    out.extend_from_slice(point.x().expect("uncompressed point has x"));
    out.extend_from_slice(point.y().expect("uncompressed point has y"));
    out
}

pub fn sign_p256(key: &P256SigningKey, data: &[u8]) -> Vec<u8> {
    let sig: P256Signature = key.sign(data);
    sig.to_bytes().to_vec()
}

pub fn verify_p256(key: &P256VerifyingKey, data: &[u8], signature: &[u8]) -> Result<(), DnssecError> {
    let sig = P256Signature::try_from(signature).map_err(|_| DnssecError::ValidationFailure)?;
    key.verify(data, &sig).map_err(|_| DnssecError::ValidationFailure)
}

pub fn sign_p384(key: &P384SigningKey, data: &[u8]) -> Vec<u8> {
    let sig: P384Signature = key.sign(data);
    sig.to_bytes().to_vec()
}

pub fn verify_p384(key: &P384VerifyingKey, data: &[u8], signature: &[u8]) -> Result<(), DnssecError> {
    let sig = P384Signature::try_from(signature).map_err(|_| DnssecError::ValidationFailure)?;
    key.verify(data, &sig).map_err(|_| DnssecError::ValidationFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn p256_sign_then_verify_round_trips() {
        let key = P256SigningKey::random(&mut OsRng);
        let verifying = P256VerifyingKey::from(&key);
        let data = b"dnssec rrset canonical bytes";
        let sig = sign_p256(&key, data);
        assert!(verify_p256(&verifying, data, &sig).is_ok());
    }

    #[test]
    fn p256_key_wire_round_trip() {
        let key = P256SigningKey::random(&mut OsRng);
        let verifying = P256VerifyingKey::from(&key);
        let encoded = encode_p256_public_key(&verifying);
        assert_eq!(encoded.len(), 64);
        let decoded = decode_p256_public_key(&encoded).unwrap();
        assert_eq!(decoded, verifying);
    }

    #[test]
    fn p384_sign_then_verify_round_trips() {
        let key = P384SigningKey::random(&mut OsRng);
        let verifying = P384VerifyingKey::from(&key);
        let data = b"dnssec rrset canonical bytes";
        let sig = sign_p384(&key, data);
        assert!(verify_p384(&verifying, data, &sig).is_ok());
    }
}
