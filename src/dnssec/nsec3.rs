//! `nsec3_hash` (spec §4.8, §8 scenario 5): RFC 5155 §5 iterated hash
//! used both to build NSEC3 owner names and to hash a query name for
//! denial-of-existence lookups.

use crate::error::DnssecError;
use crate::name::Name;
use crate::rdata::dnssec::NSEC3_HASH_SHA1 as HASH_SHA1;

/// `IH(salt, x, 0) = H(x || salt)`, `IH(salt, x, k) = H(IH(salt, x,
/// k-1) || salt)`; returns `IH(salt, name, iterations)`. `name` is
/// hashed in canonical (lower-cased, uncompressed) wire form.
pub fn nsec3_hash(name: &Name, salt: &[u8], iterations: u16, algorithm: u8) -> Result<Vec<u8>, DnssecError> {
    if algorithm != HASH_SHA1 {
        return Err(DnssecError::UnsupportedAlgorithm(algorithm));
    }
    use sha1::{Digest, Sha1};

    let mut digest = {
        let mut hasher = Sha1::new();
        hasher.update(name.canonical_bytes());
        hasher.update(salt);
        hasher.finalize().to_vec()
    };
    for _ in 0..iterations {
        let mut hasher = Sha1::new();
        hasher.update(&digest);
        hasher.update(salt);
        digest = hasher.finalize().to_vec();
    }
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_iterations_is_a_single_hash_pass() {
        let name = Name::from_text("example.").unwrap();
        let a = nsec3_hash(&name, &[], 0, HASH_SHA1).unwrap();
        use sha1::{Digest, Sha1};
        let mut hasher = Sha1::new();
        hasher.update(name.canonical_bytes());
        let expected = hasher.finalize().to_vec();
        assert_eq!(a, expected);
    }

    #[test]
    fn more_iterations_changes_the_hash() {
        let name = Name::from_text("example.").unwrap();
        let a = nsec3_hash(&name, b"\xAA\xBB", 0, HASH_SHA1).unwrap();
        let b = nsec3_hash(&name, b"\xAA\xBB", 10, HASH_SHA1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn same_inputs_are_deterministic() {
        let name = Name::from_text("www.example.").unwrap();
        let a = nsec3_hash(&name, b"deadbeef", 3, HASH_SHA1).unwrap();
        let b = nsec3_hash(&name, b"deadbeef", 3, HASH_SHA1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unsupported_algorithm_is_rejected() {
        let name = Name::from_text("example.").unwrap();
        assert_eq!(
            nsec3_hash(&name, &[], 0, 2),
            Err(DnssecError::UnsupportedAlgorithm(2))
        );
    }
}
