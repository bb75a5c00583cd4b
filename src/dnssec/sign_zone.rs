//! `sign_zone` (spec §4.8 "Zone signing"): add an RRSIG per RRset per
//! eligible key, with SEP-flagged keys restricted to the apex DNSKEY
//! RRset (KSK role) when at least one SEP key is present.

use super::policy::Policy;
use super::sign::sign_rrset;
use crate::error::DnssecError;
use crate::rdata::{RData, TYPE_DNSKEY, TYPE_RRSIG};
use crate::zone::Zone;

use super::key::SigningKey;

/// Sign every RRset in `zone` (skipping RRSIG itself) with each key in
/// `keys` whose role admits it, adding one RRSIG per (RRset, eligible
/// key) pair. If `add_dnskey`, each key's DNSKEY rdata is inserted
/// into the apex DNSKEY RRset (at `dnskey_ttl`) before signing begins,
/// so the freshly added keys get covered by the DNSKEY RRset's own
/// RRSIGs.
pub fn sign_zone(
    zone: &mut Zone,
    keys: &[SigningKey],
    inception: u32,
    expiration: u32,
    add_dnskey: bool,
    dnskey_ttl: u32,
    policy: &Policy,
) -> Result<(), DnssecError> {
    let origin = zone.origin().clone();
    let rdclass = zone.rdclass();

    if add_dnskey {
        for key in keys {
            zone.add(origin.clone(), TYPE_DNSKEY, 0, dnskey_ttl, RData::Dnskey(key.dnskey.clone()))?;
        }
    }

    let has_sep = keys.iter().any(|k| k.is_sep());

    let records: Vec<_> = zone
        .iterate_rdatasets()
        .filter(|(_, rds)| rds.rdtype() != TYPE_RRSIG)
        .map(|(name, rds)| (name.clone(), rds.clone()))
        .collect();

    for (name, rdataset) in records {
        let is_apex_dnskey = name == origin && rdataset.rdtype() == TYPE_DNSKEY;

        for key in keys {
            let eligible = if has_sep {
                if key.is_sep() {
                    is_apex_dnskey
                } else {
                    true
                }
            } else {
                true
            };
            if !eligible {
                continue;
            }

            let rrsig = sign_rrset(
                key,
                &name,
                rdclass,
                &rdataset,
                origin.clone(),
                inception,
                expiration,
                policy,
            )?;
            zone.add(name.clone(), TYPE_RRSIG, rdataset.rdtype(), rdataset.ttl(), RData::Rrsig(rrsig))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dnssec::key::KeyMaterial;
    use crate::dnssec::validate::validate_rrsig;
    use crate::name::Name;
    use crate::rdata::{A, TYPE_A};

    fn ed25519_key(is_sep: bool) -> SigningKey {
        use rand::rngs::OsRng;
        let priv_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        SigningKey::new(KeyMaterial::Ed25519(priv_key), is_sep)
    }

    fn small_zone() -> Zone {
        let origin = Name::from_text("example.").unwrap();
        let mut zone = Zone::new(origin.clone(), 1);
        zone.add(
            origin.clone(),
            TYPE_A,
            0,
            3600,
            RData::A(A {
                address: "192.0.2.1".parse().unwrap(),
            }),
        )
        .unwrap();
        let www = Name::from_text("www.example.").unwrap();
        zone.add(
            www,
            TYPE_A,
            0,
            3600,
            RData::A(A {
                address: "192.0.2.2".parse().unwrap(),
            }),
        )
        .unwrap();
        zone
    }

    #[test]
    fn ksk_only_signs_the_apex_dnskey_rrset() {
        let mut zone = small_zone();
        let ksk = ed25519_key(true);
        let zsk = ed25519_key(false);
        let policy = Policy::default();
        sign_zone(&mut zone, &[ksk, zsk], 1_000, 2_000, true, 3600, &policy).unwrap();

        let origin = zone.origin().clone();
        let apex_a_rrsigs = zone.get_rdataset(&origin, TYPE_RRSIG, TYPE_A).unwrap();
        assert_eq!(apex_a_rrsigs.len(), 1); // only the ZSK signs non-DNSKEY rrsets

        let dnskey_rrsigs = zone.get_rdataset(&origin, TYPE_RRSIG, TYPE_DNSKEY).unwrap();
        assert_eq!(dnskey_rrsigs.len(), 2); // both KSK and ZSK sign the apex DNSKEY rrset
    }

    #[test]
    fn produced_signatures_validate() {
        let mut zone = small_zone();
        let zsk = ed25519_key(false);
        let dnskey = zsk.dnskey.clone();
        let policy = Policy::default();
        sign_zone(&mut zone, &[zsk], 1_000, 2_000, false, 3600, &policy).unwrap();

        let origin = zone.origin().clone();
        let a_rdataset = zone.get_rdataset(&origin, TYPE_A, 0).unwrap().clone();
        let rrsigs = zone.get_rdataset(&origin, TYPE_RRSIG, TYPE_A).unwrap();
        let rrsig = match rrsigs.iter().next().unwrap() {
            RData::Rrsig(s) => s,
            _ => unreachable!(),
        };
        assert!(validate_rrsig(rrsig, &origin, 1, &a_rdataset, &[dnskey], 1_500, &policy).is_ok());
    }

    #[test]
    fn no_sep_key_means_every_key_signs_everything() {
        let mut zone = small_zone();
        let a = ed25519_key(false);
        let b = ed25519_key(false);
        let policy = Policy::default();
        sign_zone(&mut zone, &[a, b], 1_000, 2_000, false, 3600, &policy).unwrap();

        let origin = zone.origin().clone();
        let rrsigs = zone.get_rdataset(&origin, TYPE_RRSIG, TYPE_A).unwrap();
        assert_eq!(rrsigs.len(), 2);
    }
}
