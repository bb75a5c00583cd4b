//! Algorithm/digest allow-lists gating signing, validation, and DS
//! creation (spec §4.8 "Policy gate"). A [`Policy`] is consulted by
//! every entry point in this module; [`Policy::default`] matches
//! spec.md's required default deny-set exactly.

use std::collections::HashSet;

/// Which algorithms/digest types an operation is allowed to use.
/// Checked before the cryptography runs, not after — a denied
/// algorithm never reaches the signature/hash code (spec §7
/// `DeniedByPolicy`).
#[derive(Debug, Clone)]
pub struct Policy {
    deny_sign: HashSet<u8>,
    deny_validate: HashSet<u8>,
    deny_create_ds: HashSet<u8>,
    deny_validate_ds: HashSet<u8>,
}

const RSAMD5: u8 = 1;
const DSA: u8 = 3;
const DSANSEC3SHA1: u8 = 6;
const ECCGOST: u8 = 12;

const DIGEST_NULL: u8 = 0;
const DIGEST_SHA1: u8 = 1;
const DIGEST_GOST: u8 = 3;

impl Default for Policy {
    /// Denies signing/validating with {RSAMD5, DSA, DSANSEC3SHA1,
    /// ECCGOST} (validating omits ECCGOST per spec.md's default list),
    /// creating DS with {NULL, SHA1, GOST}, validating DS with {NULL}.
    fn default() -> Self {
        Policy {
            deny_sign: [RSAMD5, DSA, DSANSEC3SHA1, ECCGOST].into_iter().collect(),
            deny_validate: [RSAMD5, DSA, DSANSEC3SHA1].into_iter().collect(),
            deny_create_ds: [DIGEST_NULL, DIGEST_SHA1, DIGEST_GOST].into_iter().collect(),
            deny_validate_ds: [DIGEST_NULL].into_iter().collect(),
        }
    }
}

impl Policy {
    /// A policy that denies nothing; useful for tests exercising
    /// algorithms the default policy would otherwise gate out.
    pub fn permissive() -> Self {
        Policy {
            deny_sign: HashSet::new(),
            deny_validate: HashSet::new(),
            deny_create_ds: HashSet::new(),
            deny_validate_ds: HashSet::new(),
        }
    }

    pub fn deny_sign(&mut self, algorithm: u8) {
        self.deny_sign.insert(algorithm);
    }

    pub fn deny_validate(&mut self, algorithm: u8) {
        self.deny_validate.insert(algorithm);
    }

    pub fn deny_create_ds(&mut self, digest_type: u8) {
        self.deny_create_ds.insert(digest_type);
    }

    pub fn deny_validate_ds(&mut self, digest_type: u8) {
        self.deny_validate_ds.insert(digest_type);
    }

    pub fn can_sign(&self, algorithm: u8) -> bool {
        !self.deny_sign.contains(&algorithm)
    }

    pub fn can_validate(&self, algorithm: u8) -> bool {
        !self.deny_validate.contains(&algorithm)
    }

    pub fn can_create_ds(&self, digest_type: u8) -> bool {
        !self.deny_create_ds.contains(&digest_type)
    }

    pub fn can_validate_ds(&self, digest_type: u8) -> bool {
        !self.deny_validate_ds.contains(&digest_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_denies_rsamd5_and_dsa_family() {
        let p = Policy::default();
        assert!(!p.can_sign(RSAMD5));
        assert!(!p.can_sign(DSA));
        assert!(!p.can_validate(DSA));
        assert!(p.can_sign(8)); // RSASHA256 unaffected
    }

    #[test]
    fn default_denies_weak_ds_digests() {
        let p = Policy::default();
        assert!(!p.can_create_ds(DIGEST_SHA1));
        assert!(p.can_create_ds(2)); // SHA-256
        assert!(!p.can_validate_ds(DIGEST_NULL));
    }

    #[test]
    fn permissive_denies_nothing() {
        let p = Policy::permissive();
        assert!(p.can_sign(RSAMD5));
        assert!(p.can_validate_ds(DIGEST_NULL));
    }
}
