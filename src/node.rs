//! A zone tree node: the rdatasets attached to one owner name (spec
//! §4.3). Grounded on the teacher's abandoned `domain_tree.rs` (kept
//! only as a shape reference per DESIGN.md) and rebuilt around the
//! CNAME/other-data mutual-exclusion invariant spec.md requires.

use crate::error::ZoneError;
use crate::rdata::{RData, TYPE_CNAME, TYPE_KEY, TYPE_NSEC, TYPE_NSEC3, TYPE_RRSIG};
use crate::rrset::Rdataset;

/// Types exempt from the CNAME/other-data exclusion: RRSIG covers other
/// types rather than standing alongside them, and NSEC/NSEC3/KEY are
/// defined to coexist with a CNAME at the same owner (spec §4.3
/// `I-CNAME-EXCL`).
fn is_neutral(rdtype: u16) -> bool {
    matches!(rdtype, TYPE_RRSIG | TYPE_NSEC | TYPE_NSEC3 | TYPE_KEY)
}

/// The rdatasets at one owner name. A node may hold a CNAME rdataset
/// or any number of other-type rdatasets, never both (spec §4.3
/// `I-CNAME-EXCL`) — the neutral types above are exempt.
#[derive(Debug, Clone, Default)]
pub struct Node {
    rdatasets: Vec<Rdataset>,
}

impl Node {
    pub fn new() -> Self {
        Node {
            rdatasets: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rdatasets.is_empty()
    }

    pub fn rdatasets(&self) -> impl Iterator<Item = &Rdataset> {
        self.rdatasets.iter()
    }

    pub fn find(&self, rdtype: u16, covers: u16) -> Option<&Rdataset> {
        self.rdatasets
            .iter()
            .find(|r| r.rdtype() == rdtype && r.covers() == covers)
    }

    pub fn find_mut(&mut self, rdtype: u16, covers: u16) -> Option<&mut Rdataset> {
        self.rdatasets
            .iter_mut()
            .find(|r| r.rdtype() == rdtype && r.covers() == covers)
    }

    pub fn has_cname(&self) -> bool {
        self.find(TYPE_CNAME, 0).is_some()
    }

    /// Add rdata to this node's `(rdtype, covers)` rdataset, creating it
    /// if absent. "Most recent write wins" (spec §3, §4.3): adding a
    /// CNAME purges every non-neutral rdataset already present; adding
    /// any non-neutral, non-CNAME rdataset purges an existing CNAME (and
    /// RRSIG(CNAME)). This never fails — callers that want the stricter
    /// zone-file-reader behavior (reject instead of purge) register a
    /// `check_put_rdataset` hook (spec §4.9) that raises
    /// [`ZoneError::CNAMEAndOtherData`] before the mutation reaches here.
    pub fn add(&mut self, rdtype: u16, covers: u16, ttl: u32, rdata: RData) -> Result<(), ZoneError> {
        if !is_neutral(rdtype) {
            if rdtype == TYPE_CNAME {
                self.rdatasets.retain(|r| is_neutral(r.rdtype()));
            } else if self.has_cname() {
                self.rdatasets
                    .retain(|r| !(r.rdtype() == TYPE_CNAME || (r.rdtype() == TYPE_RRSIG && r.covers() == TYPE_CNAME)));
            }
        }
        if let Some(existing) = self.find_mut(rdtype, covers) {
            existing.add(rdata, ttl);
        } else {
            let mut rds = Rdataset::new(rdtype, covers, ttl);
            rds.add(rdata, ttl);
            self.rdatasets.push(rds);
        }
        Ok(())
    }

    /// Replace (or remove, if `rdatas` is empty) the rdataset at
    /// `(rdtype, covers)` wholesale.
    pub fn replace_rdataset(&mut self, rdtype: u16, covers: u16, ttl: u32, rdatas: Vec<RData>) {
        self.rdatasets.retain(|r| !(r.rdtype() == rdtype && r.covers() == covers));
        if !rdatas.is_empty() {
            let mut rds = Rdataset::new(rdtype, covers, ttl);
            rds.update(ttl, rdatas);
            self.rdatasets.push(rds);
        }
    }

    /// Create an empty rdataset at `(rdtype, covers)` if one isn't
    /// already present (spec §4.4 `find_rdataset(create=true)`).
    pub fn ensure_rdataset(&mut self, rdtype: u16, covers: u16) {
        if self.find(rdtype, covers).is_none() {
            self.rdatasets.push(Rdataset::new(rdtype, covers, 0));
        }
    }

    pub fn delete_rdataset(&mut self, rdtype: u16, covers: u16) {
        self.rdatasets.retain(|r| !(r.rdtype() == rdtype && r.covers() == covers));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdata::{Cname, Ns, A};
    use crate::name::Name;

    #[test]
    fn adding_other_data_purges_existing_cname() {
        let mut node = Node::new();
        node.add(
            crate::rdata::TYPE_CNAME,
            0,
            300,
            RData::Cname(Cname {
                cname: Name::from_text("target.example.").unwrap(),
            }),
        )
        .unwrap();
        node.add(
            crate::rdata::TYPE_A,
            0,
            300,
            RData::A(A {
                address: "192.0.2.1".parse().unwrap(),
            }),
        )
        .unwrap();
        assert!(!node.has_cname());
        assert!(node.find(crate::rdata::TYPE_A, 0).is_some());
    }

    #[test]
    fn neutral_types_coexist_with_cname() {
        let mut node = Node::new();
        node.add(
            crate::rdata::TYPE_CNAME,
            0,
            300,
            RData::Cname(Cname {
                cname: Name::from_text("target.example.").unwrap(),
            }),
        )
        .unwrap();
        node.add(
            crate::rdata::TYPE_NSEC,
            0,
            300,
            RData::Generic(crate::rdata::Generic {
                rdtype: crate::rdata::TYPE_NSEC,
                bytes: vec![0],
            }),
        )
        .unwrap();
        assert!(node.has_cname());
        assert!(node.find(crate::rdata::TYPE_NSEC, 0).is_some());
    }

    #[test]
    fn most_recent_write_wins_on_conflicting_type() {
        let mut node = Node::new();
        node.add(
            crate::rdata::TYPE_NS,
            0,
            300,
            RData::Ns(Ns {
                nsdname: Name::from_text("ns1.example.").unwrap(),
            }),
        )
        .unwrap();
        node.add(
            crate::rdata::TYPE_CNAME,
            0,
            300,
            RData::Cname(Cname {
                cname: Name::from_text("target.example.").unwrap(),
            }),
        )
        .unwrap();
        assert!(node.has_cname());
        assert!(node.find(crate::rdata::TYPE_NS, 0).is_none());
    }
}
