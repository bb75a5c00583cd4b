//! `validate_rrsig` (spec §4.8): locate a candidate DNSKEY, recompute
//! the canonical signed data, and verify.

use super::algo;
use super::canonical::signed_data;
use super::policy::Policy;
use crate::error::DnssecError;
use crate::name::Name;
use crate::rdata::dnssec::{Dnskey, Rrsig};
use crate::rrset::Rdataset;
use crate::serial;

/// Validate `rrsig` over `(owner, rdclass, rdataset)` against the
/// DNSKEYs in `keys` (typically every DNSKEY rdataset found at
/// `rrsig.signer_name`). `now` is POSIX seconds, compared to
/// `inception`/`expiration` under RFC 1982 serial arithmetic (spec
/// §4.8 "reject if now is outside [inception, expiration]").
///
/// Succeeds on the first candidate key whose signature verifies;
/// tries every matching key before giving up (spec §4.8 "success on
/// any key short-circuits").
pub fn validate_rrsig(
    rrsig: &Rrsig,
    owner: &Name,
    rdclass: u16,
    rdataset: &Rdataset,
    keys: &[Dnskey],
    now: u32,
    policy: &Policy,
) -> Result<(), DnssecError> {
    if !policy.can_validate(rrsig.algorithm) {
        return Err(DnssecError::DeniedByPolicy(rrsig.algorithm));
    }
    if !serial::in_window(now, rrsig.inception, rrsig.expiration) {
        return Err(DnssecError::ValidationFailure);
    }

    let data = signed_data(rrsig, owner, rdclass, rdataset)?;

    let candidates: Vec<&Dnskey> = keys
        .iter()
        .filter(|k| {
            k.algorithm == rrsig.algorithm && k.key_tag() == rrsig.key_tag && k.is_zone_key()
        })
        .collect();
    if candidates.is_empty() {
        return Err(DnssecError::NoCandidateKey);
    }

    for key in candidates {
        if algo::verify(key, &data, &rrsig.signature).is_ok() {
            return Ok(());
        }
    }
    Err(DnssecError::ValidationFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dnssec::key::{KeyMaterial, SigningKey};
    use crate::dnssec::sign::sign_rrset;
    use crate::rdata::{RData, A};

    fn a_rdataset() -> Rdataset {
        let mut rds = Rdataset::new(crate::rdata::TYPE_A, 0, 3600);
        rds.add(
            RData::A(A {
                address: "192.0.2.1".parse().unwrap(),
            }),
            3600,
        );
        rds
    }

    #[test]
    fn sign_then_validate_round_trips_and_tamper_fails() {
        use rand::rngs::OsRng;
        let priv_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let signer = SigningKey::new(KeyMaterial::Ed25519(priv_key), false);
        let owner = Name::from_text("example.").unwrap();
        let signer_name = Name::from_text("example.").unwrap();
        let rdataset = a_rdataset();
        let policy = Policy::default();

        let rrsig = sign_rrset(
            &signer,
            &owner,
            1,
            &rdataset,
            signer_name,
            1_000,
            2_000,
            &policy,
        )
        .unwrap();

        assert!(validate_rrsig(&rrsig, &owner, 1, &rdataset, &[signer.dnskey.clone()], 1_500, &policy).is_ok());

        let mut tampered = rdataset.clone();
        tampered.add(
            RData::A(A {
                address: "192.0.2.99".parse().unwrap(),
            }),
            3600,
        );
        assert!(validate_rrsig(&rrsig, &owner, 1, &tampered, &[signer.dnskey.clone()], 1_500, &policy).is_err());
    }

    #[test]
    fn expired_signature_is_rejected() {
        use rand::rngs::OsRng;
        let priv_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let signer = SigningKey::new(KeyMaterial::Ed25519(priv_key), false);
        let owner = Name::from_text("example.").unwrap();
        let rdataset = a_rdataset();
        let policy = Policy::default();
        let rrsig = sign_rrset(&signer, &owner, 1, &rdataset, owner.clone(), 1_000, 2_000, &policy).unwrap();
        assert_eq!(
            validate_rrsig(&rrsig, &owner, 1, &rdataset, &[signer.dnskey.clone()], 3_000, &policy),
            Err(DnssecError::ValidationFailure)
        );
    }

    #[test]
    fn denied_algorithm_is_rejected_before_crypto_runs() {
        use rand::rngs::OsRng;
        let priv_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let signer = SigningKey::new(KeyMaterial::Ed25519(priv_key), false);
        let owner = Name::from_text("example.").unwrap();
        let rdataset = a_rdataset();
        let mut policy = Policy::permissive();
        let rrsig = sign_rrset(&signer, &owner, 1, &rdataset, owner.clone(), 1_000, 2_000, &policy).unwrap();
        policy.deny_validate(algo::ED25519);
        assert_eq!(
            validate_rrsig(&rrsig, &owner, 1, &rdataset, &[signer.dnskey.clone()], 1_500, &policy),
            Err(DnssecError::DeniedByPolicy(algo::ED25519))
        );
    }
}
