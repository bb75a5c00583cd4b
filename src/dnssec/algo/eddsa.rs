//! Ed25519 (algorithm 15): raw 64-byte signatures, raw 32-byte public
//! keys, no intermediate hash exposed to the DNSSEC layer (the curve's
//! own SHA-512 prehashing is internal to the scheme). Ed448 (algorithm
//! 16) has no actively maintained RustCrypto-family crate and is left
//! unsupported (DESIGN.md open-question log).

use crate::error::DnssecError;
use ed25519_dalek::{Signature, SigningKey, VerifyingKey, Signer, Verifier};

pub fn decode_public_key(bytes: &[u8]) -> Result<VerifyingKey, DnssecError> {
    let arr: [u8; 32] = bytes.try_into().map_err(|_| DnssecError::AlgorithmKeyMismatch)?;
    VerifyingKey::from_bytes(&arr).map_err(|_| DnssecError::AlgorithmKeyMismatch)
}

pub fn encode_public_key(key: &VerifyingKey) -> Vec<u8> {
    key.to_bytes().to_vec()
}

pub fn sign(key: &SigningKey, data: &[u8]) -> Vec<u8> {
    key.sign(data).to_bytes().to_vec()
}

pub fn verify(key: &VerifyingKey, data: &[u8], signature: &[u8]) -> Result<(), DnssecError> {
    let arr: [u8; 64] = signature.try_into().map_err(|_| DnssecError::ValidationFailure)?;
    let sig = Signature::from_bytes(&arr);
    key.verify_strict(data, &sig)
        .map_err(|_| DnssecError::ValidationFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn sign_then_verify_round_trips() {
        let key = SigningKey::generate(&mut OsRng);
        let verifying = key.verifying_key();
        let data = b"dnssec rrset canonical bytes";
        let sig = sign(&key, data);
        assert!(verify(&verifying, data, &sig).is_ok());
    }

    #[test]
    fn key_wire_round_trip() {
        let key = SigningKey::generate(&mut OsRng);
        let verifying = key.verifying_key();
        let encoded = encode_public_key(&verifying);
        assert_eq!(encoded.len(), 32);
        let decoded = decode_public_key(&encoded).unwrap();
        assert_eq!(decoded, verifying);
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let key = SigningKey::generate(&mut OsRng);
        let verifying = key.verifying_key();
        let data = b"dnssec rrset canonical bytes";
        let mut sig = sign(&key, data);
        sig[0] ^= 0xFF;
        assert!(verify(&verifying, data, &sig).is_err());
    }
}
