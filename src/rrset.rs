//! Rdataset/RRset: an owner-independent bag of same-type rdata sharing
//! one TTL (spec §4.3). Grounded on the teacher's `RR`/rdata-vector
//! pattern (`src/dns/rr.rs`), replacing its flat `Vec<RData>` with the
//! dedup-on-insert, TTL-minimizing semantics spec.md calls for.

use crate::error::WireError;
use crate::name::Name;
use crate::rdata::RData;
use crate::wire::Renderer;
use rand::seq::SliceRandom;
use rand::Rng;

/// A set of rdata of one `(rdtype, covers)` sharing one TTL. Insertion
/// order is preserved except where `add` dedups; equality is by
/// canonical rdata bytes (spec §4.3 `I-DEDUP`).
#[derive(Debug, Clone, PartialEq)]
pub struct Rdataset {
    rdtype: u16,
    covers: u16,
    ttl: u32,
    rdatas: Vec<RData>,
}

impl Rdataset {
    pub fn new(rdtype: u16, covers: u16, ttl: u32) -> Self {
        Rdataset {
            rdtype,
            covers,
            ttl,
            rdatas: Vec::new(),
        }
    }

    pub fn rdtype(&self) -> u16 {
        self.rdtype
    }

    pub fn covers(&self) -> u16 {
        self.covers
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn is_empty(&self) -> bool {
        self.rdatas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rdatas.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RData> {
        self.rdatas.iter()
    }

    fn canonical_of(r: &RData) -> Vec<u8> {
        let mut out = Vec::new();
        r.to_canonical(&mut out);
        out
    }

    /// Insert `rdata` at `ttl`, deduping by canonical equality and
    /// minimizing the stored TTL (`min(old, new)`, spec §4.3 `I-TTLMIN`).
    pub fn add(&mut self, rdata: RData, ttl: u32) {
        self.ttl = self.ttl.min(ttl);
        let key = Self::canonical_of(&rdata);
        if self.rdatas.iter().any(|r| Self::canonical_of(r) == key) {
            return;
        }
        self.rdatas.push(rdata);
    }

    /// Replace this rdataset's contents and TTL wholesale (used by
    /// `replace_rdataset`, unlike `add`'s merge semantics).
    pub fn update(&mut self, ttl: u32, rdatas: Vec<RData>) {
        self.ttl = ttl;
        self.rdatas = rdatas;
    }

    /// Remove a single rdata by canonical equality; returns whether
    /// anything was removed.
    pub fn delete(&mut self, rdata: &RData) -> bool {
        let key = Self::canonical_of(rdata);
        let before = self.rdatas.len();
        self.rdatas.retain(|r| Self::canonical_of(r) != key);
        self.rdatas.len() != before
    }

    pub fn contains(&self, rdata: &RData) -> bool {
        let key = Self::canonical_of(rdata);
        self.rdatas.iter().any(|r| Self::canonical_of(r) == key)
    }

    /// Canonical (DNSSEC, RFC 4034 §6.3) rdata ordering: by canonical
    /// wire bytes, ascending.
    pub fn canonical_sorted(&self) -> Vec<&RData> {
        let mut v: Vec<&RData> = self.rdatas.iter().collect();
        v.sort_by(|a, b| Self::canonical_of(a).cmp(&Self::canonical_of(b)));
        v
    }
}

/// An [`Rdataset`] bound to an owner name, plus the "deleting" class
/// marker dynamic-update messages use to mean "delete this rrset" (class
/// ANY) or "delete this exact rdata" (class NONE) rather than "add"
/// (spec §3, §4.3). `deleting` is `None` for ordinary (additive) rrsets.
#[derive(Debug, Clone, PartialEq)]
pub struct RRset {
    pub name: Name,
    pub rdataset: Rdataset,
    pub deleting: Option<u16>,
}

impl RRset {
    pub fn new(name: Name, rdataset: Rdataset) -> Self {
        RRset {
            name,
            rdataset,
            deleting: None,
        }
    }

    /// The order rdata are written on the wire (spec §4.3 "processing
    /// order"). Types with a defined preference sort by it (ties broken
    /// by shuffle); everything else is plain-shuffled. `rng` is supplied
    /// by the caller so a single `to_wire` call uses one consistent draw
    /// (spec: "reproducible within a single `to_wire` call").
    fn ordered_indices(&self, want_shuffle: bool, rng: &mut impl Rng) -> Vec<usize> {
        let n = self.rdataset.len();
        let mut idx: Vec<usize> = (0..n).collect();
        if !want_shuffle {
            return idx;
        }
        let rdatas: Vec<&RData> = self.rdataset.iter().collect();
        match rdatas.first() {
            Some(RData::Mx(_)) => {
                idx.sort_by_key(|&i| match rdatas[i] {
                    RData::Mx(mx) => mx.preference,
                    _ => u16::MAX,
                });
                shuffle_within_ties(&mut idx, rng, |i| match rdatas[i] {
                    RData::Mx(mx) => mx.preference,
                    _ => u16::MAX,
                });
            }
            Some(RData::Srv(_)) => {
                idx.sort_by_key(|&i| match rdatas[i] {
                    RData::Srv(srv) => srv.priority,
                    _ => u16::MAX,
                });
                weighted_shuffle_within_ties(
                    &mut idx,
                    rng,
                    |i| match rdatas[i] {
                        RData::Srv(srv) => srv.priority,
                        _ => u16::MAX,
                    },
                    |i| match rdatas[i] {
                        RData::Srv(srv) => srv.weight,
                        _ => 0,
                    },
                );
            }
            Some(RData::Naptr(_)) => {
                idx.sort_by_key(|&i| match rdatas[i] {
                    RData::Naptr(n) => (n.order, n.preference),
                    _ => (u16::MAX, u16::MAX),
                });
            }
            _ => idx.shuffle(rng),
        }
        idx
    }

    /// Render one RR per rdata (spec §4.3 `to_wire`). `rdclass` is this
    /// rrset's class unless `override_rdclass` is given (dynamic-update
    /// messages rewrite it to ANY/NONE to carry the `deleting` marker on
    /// the wire instead of the rrset's real class). `origin`, if given
    /// and `self.name` is relative, derelativizes the owner before
    /// writing.
    #[allow(clippy::too_many_arguments)]
    pub fn to_wire(
        &self,
        renderer: &mut Renderer,
        rdclass: u16,
        compress: bool,
        origin: Option<&Name>,
        override_rdclass: Option<u16>,
        want_shuffle: bool,
        rng: &mut impl Rng,
    ) -> Result<(), WireError> {
        let owner = match origin {
            Some(o) if !self.name.is_absolute() => {
                self.name
                    .derelativize(o)
                    .map_err(|source| WireError::Name { offset: renderer.len(), source })?
            }
            _ => self.name.clone(),
        };
        let wire_class = override_rdclass.unwrap_or(rdclass);
        let ordered = self.ordered_indices(want_shuffle, rng);
        let rdatas: Vec<&RData> = self.rdataset.iter().collect();
        for i in ordered {
            let rdata = rdatas[i];
            renderer.write_name(&owner, compress)?;
            renderer.write_u16(rdata.rdtype());
            renderer.write_u16(wire_class);
            renderer.write_u32(self.rdataset.ttl());
            let rdlen_pos = renderer.len();
            renderer.write_u16(0);
            let start = renderer.len();
            rdata.to_wire(renderer)?;
            let len = (renderer.len() - start) as u16;
            renderer.patch_u16(rdlen_pos, len);
        }
        Ok(())
    }
}

/// Stable-sort already grouped `idx` by `key`; within each equal-key run,
/// shuffle in place (MX: "ascending preference then shuffle within
/// equal", spec §4.3).
fn shuffle_within_ties(idx: &mut [usize], rng: &mut impl Rng, key: impl Fn(usize) -> u16) {
    let mut i = 0;
    while i < idx.len() {
        let mut j = i + 1;
        while j < idx.len() && key(idx[j]) == key(idx[i]) {
            j += 1;
        }
        idx[i..j].shuffle(rng);
        i = j;
    }
}

/// Within each equal-priority run, draw without replacement weighted by
/// `weight` (SRV/URI: "ascending priority then weighted-by-weight within
/// equal priority", spec §4.3). A zero-weight entry is still eligible
/// (RFC 2782 treats weight 0 as "pick last, but still pick").
fn weighted_shuffle_within_ties(
    idx: &mut [usize],
    rng: &mut impl Rng,
    key: impl Fn(usize) -> u16,
    weight: impl Fn(usize) -> u16,
) {
    let mut i = 0;
    while i < idx.len() {
        let mut j = i + 1;
        while j < idx.len() && key(idx[j]) == key(idx[i]) {
            j += 1;
        }
        let mut pool: Vec<usize> = idx[i..j].to_vec();
        let mut drawn = Vec::with_capacity(pool.len());
        while !pool.is_empty() {
            let total: u32 = pool.iter().map(|&p| weight(p) as u32 + 1).sum();
            let mut pick = rng.gen_range(0..total);
            let mut chosen = 0;
            for (k, &p) in pool.iter().enumerate() {
                let w = weight(p) as u32 + 1;
                if pick < w {
                    chosen = k;
                    break;
                }
                pick -= w;
            }
            drawn.push(pool.remove(chosen));
        }
        idx[i..j].copy_from_slice(&drawn);
        i = j;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdata::{RData, A};

    fn a(addr: &str) -> RData {
        RData::A(A {
            address: addr.parse().unwrap(),
        })
    }

    #[test]
    fn add_dedups_by_canonical_equality() {
        let mut rds = Rdataset::new(crate::rdata::TYPE_A, 0, 300);
        rds.add(a("192.0.2.1"), 300);
        rds.add(a("192.0.2.1"), 300);
        assert_eq!(rds.len(), 1);
    }

    #[test]
    fn add_minimizes_ttl() {
        let mut rds = Rdataset::new(crate::rdata::TYPE_A, 0, 300);
        rds.add(a("192.0.2.1"), 300);
        rds.add(a("192.0.2.2"), 60);
        assert_eq!(rds.ttl(), 60);
    }

    #[test]
    fn delete_removes_matching_rdata() {
        let mut rds = Rdataset::new(crate::rdata::TYPE_A, 0, 300);
        rds.add(a("192.0.2.1"), 300);
        assert!(rds.delete(&a("192.0.2.1")));
        assert!(rds.is_empty());
    }

    #[test]
    fn mx_processing_order_is_ascending_preference() {
        use crate::rdata::Mx;
        let mut rds = Rdataset::new(crate::rdata::TYPE_MX, 0, 300);
        rds.add(
            RData::Mx(Mx {
                preference: 20,
                exchange: Name::from_text("b.example.").unwrap(),
            }),
            300,
        );
        rds.add(
            RData::Mx(Mx {
                preference: 10,
                exchange: Name::from_text("a.example.").unwrap(),
            }),
            300,
        );
        let rrset = RRset::new(Name::from_text("example.").unwrap(), rds);
        let mut renderer = Renderer::new();
        let mut rng = rand::thread_rng();
        rrset
            .to_wire(&mut renderer, crate::rdata::CLASS_IN, false, None, None, true, &mut rng)
            .unwrap();
        // First MX written must be the preference-10 one: find its exchange
        // name bytes appear before the preference-20 one's in the buffer.
        let bytes = renderer.bytes();
        let pos_a = find_subslice(bytes, b"\x01a\x07example\x00").unwrap();
        let pos_b = find_subslice(bytes, b"\x01b\x07example\x00").unwrap();
        assert!(pos_a < pos_b);
    }

    fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn to_wire_writes_one_rr_per_rdata() {
        let mut rds = Rdataset::new(crate::rdata::TYPE_A, 0, 300);
        rds.add(a("192.0.2.1"), 300);
        rds.add(a("192.0.2.2"), 300);
        let rrset = RRset::new(Name::from_text("example.").unwrap(), rds);
        let mut renderer = Renderer::new();
        let mut rng = rand::thread_rng();
        rrset
            .to_wire(&mut renderer, crate::rdata::CLASS_IN, false, None, None, false, &mut rng)
            .unwrap();
        // two A records, each name(9)+type(2)+class(2)+ttl(4)+rdlen(2)+rdata(4) = 23
        assert_eq!(renderer.len(), 23 * 2);
    }
}
