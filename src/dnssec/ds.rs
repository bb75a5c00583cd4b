//! `make_ds` (spec §4.8): derive a DS (or CDS) digest from a DNSKEY,
//! the way a parent/child exchange a delegation-signer record.

use super::policy::Policy;
use crate::error::DnssecError;
use crate::name::Name;
use crate::rdata::dnssec::{Dnskey, Ds, DIGEST_SHA1, DIGEST_SHA256, DIGEST_SHA384};

/// `owner | dnskey_rdata` canonicalized, hashed per `digest_type`
/// (RFC 4034 §5.1.4). `validating` picks [`Policy::can_validate_ds`]
/// over [`Policy::can_create_ds`] for the policy gate: a parent
/// creating its own DS uses the stricter "create" gate, a resolver
/// checking one it received uses "validate".
pub fn make_ds(
    owner: &Name,
    dnskey: &Dnskey,
    digest_type: u8,
    policy: &Policy,
    validating: bool,
) -> Result<Ds, DnssecError> {
    let allowed = if validating {
        policy.can_validate_ds(digest_type)
    } else {
        policy.can_create_ds(digest_type)
    };
    if !allowed {
        return Err(DnssecError::DeniedByPolicy(digest_type));
    }

    let mut input = Vec::new();
    input.extend_from_slice(owner.canonical_bytes());
    dnskey.to_canonical(&mut input);

    let digest = match digest_type {
        DIGEST_SHA1 => {
            use sha1::{Digest, Sha1};
            Sha1::digest(&input).to_vec()
        }
        DIGEST_SHA256 => {
            use sha2::{Digest, Sha256};
            Sha256::digest(&input).to_vec()
        }
        DIGEST_SHA384 => {
            use sha2::{Digest, Sha384};
            Sha384::digest(&input).to_vec()
        }
        other => return Err(DnssecError::UnsupportedAlgorithm(other)),
    };

    Ok(Ds {
        key_tag: dnskey.key_tag(),
        algorithm: dnskey.algorithm,
        digest_type,
        digest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dnssec::key::{KeyMaterial, SigningKey};

    fn a_key() -> SigningKey {
        use rand::rngs::OsRng;
        let priv_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        SigningKey::new(KeyMaterial::Ed25519(priv_key), true)
    }

    #[test]
    fn ds_key_tag_and_algorithm_match_the_source_dnskey() {
        let key = a_key();
        let owner = Name::from_text("example.").unwrap();
        let ds = make_ds(&owner, &key.dnskey, DIGEST_SHA256, &Policy::default(), false).unwrap();
        assert_eq!(ds.key_tag, key.dnskey.key_tag());
        assert_eq!(ds.algorithm, key.dnskey.algorithm);
        assert_eq!(ds.digest.len(), 32);
    }

    #[test]
    fn sha1_digest_is_denied_by_default_policy() {
        let key = a_key();
        let owner = Name::from_text("example.").unwrap();
        assert_eq!(
            make_ds(&owner, &key.dnskey, DIGEST_SHA1, &Policy::default(), false),
            Err(DnssecError::DeniedByPolicy(DIGEST_SHA1))
        );
    }

    #[test]
    fn different_owners_produce_different_digests() {
        let key = a_key();
        let a = make_ds(&Name::from_text("a.example.").unwrap(), &key.dnskey, DIGEST_SHA256, &Policy::default(), false).unwrap();
        let b = make_ds(&Name::from_text("b.example.").unwrap(), &key.dnskey, DIGEST_SHA256, &Policy::default(), false).unwrap();
        assert_ne!(a.digest, b.digest);
    }
}
