//! A signing key: the public [`Dnskey`] record plus whichever private
//! key material matches its algorithm. [`sign`] validates nothing by
//! itself — callers gate algorithm choice through [`super::Policy`]
//! before reaching here.

use super::algo;
use crate::error::DnssecError;
use crate::rdata::dnssec::{Dnskey, FLAG_SECURE_ENTRY_POINT, FLAG_ZONE_KEY, PROTOCOL_DNSSEC};

/// Private key material for one of the supported algorithm families.
pub enum KeyMaterial {
    RsaSha1(rsa::RsaPrivateKey),
    RsaSha256(rsa::RsaPrivateKey),
    RsaSha512(rsa::RsaPrivateKey),
    EcdsaP256(p256::ecdsa::SigningKey),
    EcdsaP384(p384::ecdsa::SigningKey),
    Ed25519(ed25519_dalek::SigningKey),
}

impl KeyMaterial {
    pub fn algorithm(&self) -> u8 {
        match self {
            KeyMaterial::RsaSha1(_) => algo::RSASHA1,
            KeyMaterial::RsaSha256(_) => algo::RSASHA256,
            KeyMaterial::RsaSha512(_) => algo::RSASHA512,
            KeyMaterial::EcdsaP256(_) => algo::ECDSAP256SHA256,
            KeyMaterial::EcdsaP384(_) => algo::ECDSAP384SHA384,
            KeyMaterial::Ed25519(_) => algo::ED25519,
        }
    }

    fn public_key_bytes(&self) -> Vec<u8> {
        match self {
            KeyMaterial::RsaSha1(k) | KeyMaterial::RsaSha256(k) | KeyMaterial::RsaSha512(k) => {
                algo::rsa::encode_public_key(&rsa::RsaPublicKey::from(k))
            }
            KeyMaterial::EcdsaP256(k) => algo::ecdsa::encode_p256_public_key(&k.verifying_key()),
            KeyMaterial::EcdsaP384(k) => algo::ecdsa::encode_p384_public_key(&k.verifying_key()),
            KeyMaterial::Ed25519(k) => algo::eddsa::encode_public_key(&k.verifying_key()),
        }
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, DnssecError> {
        match self {
            KeyMaterial::RsaSha1(k) => algo::rsa::sign_sha1(k, data),
            KeyMaterial::RsaSha256(k) => algo::rsa::sign_sha256(k, data),
            KeyMaterial::RsaSha512(k) => algo::rsa::sign_sha512(k, data),
            KeyMaterial::EcdsaP256(k) => Ok(algo::ecdsa::sign_p256(k, data)),
            KeyMaterial::EcdsaP384(k) => Ok(algo::ecdsa::sign_p384(k, data)),
            KeyMaterial::Ed25519(k) => Ok(algo::eddsa::sign(k, data)),
        }
    }
}

/// A DNSSEC key pair: public [`Dnskey`] rdata plus the private material
/// needed to produce RRSIGs over it.
pub struct SigningKey {
    pub dnskey: Dnskey,
    material: KeyMaterial,
}

impl SigningKey {
    /// Wrap `material` into a key, setting the DNSKEY `ZONE` flag
    /// always and the `SEP` flag iff `is_sep` (spec §4.8 "Zone signing":
    /// SEP-flagged keys are KSKs).
    pub fn new(material: KeyMaterial, is_sep: bool) -> Self {
        let mut flags = FLAG_ZONE_KEY;
        if is_sep {
            flags |= FLAG_SECURE_ENTRY_POINT;
        }
        let dnskey = Dnskey {
            flags,
            protocol: PROTOCOL_DNSSEC,
            algorithm: material.algorithm(),
            public_key: material.public_key_bytes(),
        };
        SigningKey { dnskey, material }
    }

    pub fn algorithm(&self) -> u8 {
        self.material.algorithm()
    }

    pub fn is_sep(&self) -> bool {
        self.dnskey.is_secure_entry_point()
    }

    pub fn key_tag(&self) -> u16 {
        self.dnskey.key_tag()
    }

    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>, DnssecError> {
        self.material.sign(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ed25519_key_tag_matches_dnskey_key_tag() {
        use rand::rngs::OsRng;
        let priv_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let key = SigningKey::new(KeyMaterial::Ed25519(priv_key), false);
        assert_eq!(key.key_tag(), key.dnskey.key_tag());
    }

    #[test]
    fn sep_flag_marks_a_ksk() {
        use rand::rngs::OsRng;
        let priv_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let ksk = SigningKey::new(KeyMaterial::Ed25519(priv_key), true);
        assert!(ksk.is_sep());
        assert!(ksk.dnskey.is_zone_key());
    }
}
