//! `sign` (spec §4.8): produce an RRSIG over one rdataset with a given
//! key, the inverse of [`super::validate::validate_rrsig`].

use super::canonical::signed_data;
use super::key::SigningKey;
use super::policy::Policy;
use super::validate::validate_rrsig;
use crate::error::DnssecError;
use crate::name::Name;
use crate::rdata::dnssec::Rrsig;
use crate::rrset::Rdataset;

/// The RFC 4034 §3.1.3 `labels` field: the owner name's label count,
/// not counting the root, and not counting a leading wildcard label.
fn signed_labels(owner: &Name) -> u8 {
    let mut n = owner.label_count();
    if owner.labels().next() == Some(b"*".as_slice()) {
        n -= 1;
    }
    n as u8
}

/// Sign `rdataset` (owned by `owner`/`rdclass`) with `key`, producing
/// an RRSIG valid over `[inception, expiration]` (POSIX seconds).
/// Denied by [`Policy::can_sign`] before any cryptography runs (spec
/// §4.8 "DeniedByPolicy if algorithm ∈ deny_sign").
pub fn sign_rrset(
    key: &SigningKey,
    owner: &Name,
    rdclass: u16,
    rdataset: &Rdataset,
    signer_name: Name,
    inception: u32,
    expiration: u32,
    policy: &Policy,
) -> Result<Rrsig, DnssecError> {
    if !policy.can_sign(key.algorithm()) {
        return Err(DnssecError::DeniedByPolicy(key.algorithm()));
    }
    if rdataset.is_empty() {
        return Err(DnssecError::EmptyRrset);
    }

    let mut rrsig = Rrsig {
        type_covered: rdataset.rdtype(),
        algorithm: key.algorithm(),
        labels: signed_labels(owner),
        original_ttl: rdataset.ttl(),
        expiration,
        inception,
        key_tag: key.key_tag(),
        signer_name,
        signature: Vec::new(),
    };

    let data = signed_data(&rrsig, owner, rdclass, rdataset)?;
    rrsig.signature = key.sign(&data)?;
    Ok(rrsig)
}

/// As [`sign_rrset`], but re-validates the freshly produced signature
/// against `key.dnskey` before returning it (spec §4.8 "if verify=true,
/// validate after signing and raise ValidationFailure on mismatch").
pub fn sign_rrset_and_verify(
    key: &SigningKey,
    owner: &Name,
    rdclass: u16,
    rdataset: &Rdataset,
    signer_name: Name,
    inception: u32,
    expiration: u32,
    now: u32,
    policy: &Policy,
) -> Result<Rrsig, DnssecError> {
    let rrsig = sign_rrset(key, owner, rdclass, rdataset, signer_name, inception, expiration, policy)?;
    validate_rrsig(&rrsig, owner, rdclass, rdataset, &[key.dnskey.clone()], now, policy)?;
    Ok(rrsig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dnssec::key::KeyMaterial;
    use crate::rdata::{RData, A};

    #[test]
    fn wildcard_owner_excludes_the_star_label_from_labels_count() {
        let plain = Name::from_text("www.example.").unwrap();
        let wildcard = Name::from_text("*.example.").unwrap();
        assert_eq!(signed_labels(&plain), 2);
        assert_eq!(signed_labels(&wildcard), 1);
    }

    #[test]
    fn sign_then_verify_succeeds_for_a_freshly_signed_rrset() {
        use rand::rngs::OsRng;
        let priv_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let key = SigningKey::new(KeyMaterial::Ed25519(priv_key), false);
        let owner = Name::from_text("example.").unwrap();
        let mut rdataset = Rdataset::new(crate::rdata::TYPE_A, 0, 3600);
        rdataset.add(
            RData::A(A {
                address: "192.0.2.1".parse().unwrap(),
            }),
            3600,
        );
        let policy = Policy::default();
        let result = sign_rrset_and_verify(&key, &owner, 1, &rdataset, owner.clone(), 100, 200, 150, &policy);
        assert!(result.is_ok());
    }

    #[test]
    fn denied_algorithm_is_rejected_before_signing() {
        use rand::rngs::OsRng;
        let priv_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let key = SigningKey::new(KeyMaterial::Ed25519(priv_key), false);
        let owner = Name::from_text("example.").unwrap();
        let mut rdataset = Rdataset::new(crate::rdata::TYPE_A, 0, 3600);
        rdataset.add(
            RData::A(A {
                address: "192.0.2.1".parse().unwrap(),
            }),
            3600,
        );
        let mut policy = Policy::permissive();
        policy.deny_sign(crate::dnssec::algo::ED25519);
        let result = sign_rrset(&key, &owner, 1, &rdataset, owner.clone(), 100, 200, &policy);
        assert_eq!(result, Err(DnssecError::DeniedByPolicy(crate::dnssec::algo::ED25519)));
    }
}
