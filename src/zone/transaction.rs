//! Single-writer/multi-reader versioning over a [`Zone`] (spec §4.9).
//! Readers hold an immutable [`Version`] snapshot (an `Arc<Zone>`)
//! that outlives any writer; a writer works against a private
//! [`WritableVersion`] copy and only readers taken out *after*
//! `commit` observe its changes (copy-on-write, not lock-the-world).

use super::Zone;
use crate::error::{TransactionError, ZoneError};
use crate::name::Name;
use crate::node::Node;
use crate::rdata::RData;
use crate::rrset::Rdataset;
use std::sync::{Arc, Mutex};

/// An immutable, shareable snapshot of a zone's contents at one point
/// in time, tagged with a monotonically increasing id (spec §4.9
/// "Versioned zone").
#[derive(Debug, Clone)]
pub struct Version {
    id: u64,
    zone: Arc<Zone>,
}

impl Version {
    pub fn new(zone: Zone) -> Self {
        Version { id: 0, zone: Arc::new(zone) }
    }

    fn with_id(zone: Zone, id: u64) -> Self {
        Version { id, zone: Arc::new(zone) }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }
}

/// A private, mutable copy of a zone a single writer edits before
/// publishing a new [`Version`]. Cloned eagerly from the version it is
/// based on (true copy-on-write would share unmodified subtrees; a
/// single in-memory zone here is small enough that whole-zone clone is
/// the straightforward and correct choice).
pub struct WritableVersion {
    zone: Zone,
}

impl WritableVersion {
    pub fn from_version(version: &Version) -> Self {
        WritableVersion {
            zone: (*version.zone).clone(),
        }
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn zone_mut(&mut self) -> &mut Zone {
        &mut self.zone
    }

    pub fn into_version(self) -> Version {
        Version::new(self.zone)
    }
}

type PutHook = Box<dyn Fn(&Name, u16, u16, &RData) -> Result<(), TransactionError> + Send + Sync>;
type DeleteRdatasetHook = Box<dyn Fn(&Name, u16, u16) -> Result<(), TransactionError> + Send + Sync>;
type DeleteNameHook = Box<dyn Fn(&Name) -> Result<(), TransactionError> + Send + Sync>;

/// Extension hooks invoked before the corresponding mutation; any hook
/// may veto by returning `Err` (spec §4.9 "Extension hooks"). The
/// zone-file reader installs a `check_put_rdataset` hook here that
/// raises [`ZoneError::CNAMEAndOtherData`] instead of the node's
/// default purge-on-conflict behavior (spec §4.7).
#[derive(Default)]
pub struct Hooks {
    check_put_rdataset: Vec<PutHook>,
    check_delete_rdataset: Vec<DeleteRdatasetHook>,
    check_delete_name: Vec<DeleteNameHook>,
}

impl Hooks {
    pub fn on_check_put_rdataset(&mut self, hook: PutHook) {
        self.check_put_rdataset.push(hook);
    }

    pub fn on_check_delete_rdataset(&mut self, hook: DeleteRdatasetHook) {
        self.check_delete_rdataset.push(hook);
    }

    pub fn on_check_delete_name(&mut self, hook: DeleteNameHook) {
        self.check_delete_name.push(hook);
    }

    fn run_put(&self, name: &Name, rdtype: u16, covers: u16, rdata: &RData) -> Result<(), TransactionError> {
        for hook in &self.check_put_rdataset {
            hook(name, rdtype, covers, rdata)?;
        }
        Ok(())
    }

    fn run_delete_rdataset(&self, name: &Name, rdtype: u16, covers: u16) -> Result<(), TransactionError> {
        for hook in &self.check_delete_rdataset {
            hook(name, rdtype, covers)?;
        }
        Ok(())
    }

    fn run_delete_name(&self, name: &Name) -> Result<(), TransactionError> {
        for hook in &self.check_delete_name {
            hook(name)?;
        }
        Ok(())
    }
}

/// A bounded sequence of edits against one [`WritableVersion`],
/// committed or rolled back as a unit (spec §4.9). Read-only
/// transactions reject every mutating call with [`TransactionError::ReadOnly`].
pub struct Transaction {
    writable: Option<WritableVersion>,
    read_only: bool,
    ended: bool,
    hooks: Hooks,
}

impl Transaction {
    pub fn begin(version: &Version, read_only: bool) -> Self {
        Transaction {
            writable: Some(WritableVersion::from_version(version)),
            read_only,
            ended: false,
            hooks: Hooks::default(),
        }
    }

    /// Install extension hooks for this transaction (spec §4.9).
    /// Typically called once, immediately after `begin`.
    pub fn hooks_mut(&mut self) -> &mut Hooks {
        &mut self.hooks
    }

    fn active(&mut self) -> Result<&mut WritableVersion, TransactionError> {
        if self.ended {
            return Err(TransactionError::AlreadyEnded);
        }
        self.writable.as_mut().ok_or(TransactionError::AlreadyEnded)
    }

    fn active_writable(&mut self) -> Result<&mut WritableVersion, TransactionError> {
        if self.read_only {
            return Err(TransactionError::ReadOnly);
        }
        self.active()
    }

    pub fn get(&self, name: &Name, rdtype: u16, covers: u16) -> Option<&Rdataset> {
        self.writable.as_ref()?.zone().get_rdataset(name, rdtype, covers)
    }

    pub fn get_node(&self, name: &Name) -> Option<&Node> {
        self.writable.as_ref()?.zone().find_node(name)
    }

    pub fn name_exists(&self, name: &Name) -> bool {
        self.writable
            .as_ref()
            .map(|w| w.zone().find_node(name).is_some())
            .unwrap_or(false)
    }

    /// Every owner name currently present, in the zone's canonical
    /// (`BTreeMap`) order.
    pub fn iterate_names(&self) -> Box<dyn Iterator<Item = &Name> + '_> {
        match &self.writable {
            Some(w) => Box::new(w.zone().iterate_rdatasets().map(|(n, _)| n).collect::<std::collections::BTreeSet<_>>().into_iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    pub fn iterate_rdatasets(&self) -> Box<dyn Iterator<Item = (&Name, &Rdataset)> + '_> {
        match &self.writable {
            Some(w) => Box::new(w.zone().iterate_rdatasets()),
            None => Box::new(std::iter::empty()),
        }
    }

    pub fn add(&mut self, name: Name, rdtype: u16, covers: u16, ttl: u32, rdata: RData) -> Result<(), TransactionError> {
        self.hooks.run_put(&name, rdtype, covers, &rdata)?;
        let w = self.active_writable()?;
        w.zone_mut().add(name, rdtype, covers, ttl, rdata)?;
        Ok(())
    }

    pub fn replace_rdataset(
        &mut self,
        name: &Name,
        rdtype: u16,
        covers: u16,
        ttl: u32,
        rdatas: Vec<RData>,
    ) -> Result<(), TransactionError> {
        for rdata in &rdatas {
            self.hooks.run_put(name, rdtype, covers, rdata)?;
        }
        let w = self.active_writable()?;
        w.zone_mut().replace_rdataset(name, rdtype, covers, ttl, rdatas)?;
        Ok(())
    }

    pub fn delete_rdataset(&mut self, name: &Name, rdtype: u16, covers: u16) -> Result<(), TransactionError> {
        self.hooks.run_delete_rdataset(name, rdtype, covers)?;
        let w = self.active_writable()?;
        w.zone_mut().delete_rdataset(name, rdtype, covers);
        Ok(())
    }

    pub fn delete_name(&mut self, name: &Name) -> Result<(), TransactionError> {
        self.hooks.run_delete_name(name)?;
        let w = self.active_writable()?;
        w.zone_mut().delete_node(name);
        Ok(())
    }

    /// Delete only if the node's current rdataset contents exactly
    /// match `expected` (spec §4.9 `delete_exact`); otherwise leaves
    /// the zone untouched and returns an error.
    pub fn delete_exact(
        &mut self,
        name: &Name,
        rdtype: u16,
        covers: u16,
        expected: &[RData],
    ) -> Result<(), TransactionError> {
        let w = self.active_writable()?;
        let matches = w
            .zone()
            .get_rdataset(name, rdtype, covers)
            .map(|rds| rds.len() == expected.len() && expected.iter().all(|r| rds.contains(r)))
            .unwrap_or(false);
        if !matches {
            return Err(TransactionError::DeleteNotExact);
        }
        w.zone_mut().delete_rdataset(name, rdtype, covers);
        Ok(())
    }

    /// `update_serial(value, relative, name)` (spec §4.9): apply an
    /// RFC 1982 serial update to the SOA at `name` (defaulting to the
    /// origin). `relative = true` adds `value` to the current serial;
    /// `relative = false` sets it outright. A relative update that
    /// would wrap the comparison window (`value` > `i32::MAX` as an
    /// unsigned delta) is rejected.
    pub fn update_serial(&mut self, value: u32, relative: bool, name: Option<&Name>) -> Result<(), TransactionError> {
        if relative && value > i32::MAX as u32 {
            return Err(TransactionError::SerialWouldWrap);
        }
        let w = self.active_writable()?;
        let origin = name.cloned().unwrap_or_else(|| w.zone().origin().clone());
        let current = match w.zone().get_rdataset(&origin, crate::rdata::TYPE_SOA, 0).and_then(|r| r.iter().next()) {
            Some(RData::Soa(soa)) => soa.clone(),
            _ => return Err(TransactionError::Zone(ZoneError::NoSOA)),
        };
        let mut next = current.clone();
        next.serial = if relative {
            crate::serial::add(current.serial, value)
        } else {
            value
        };
        let ttl = w
            .zone()
            .get_rdataset(&origin, crate::rdata::TYPE_SOA, 0)
            .map(|r| r.ttl())
            .unwrap_or(0);
        w.zone_mut()
            .replace_rdataset(&origin, crate::rdata::TYPE_SOA, 0, ttl, vec![RData::Soa(next)])
            .map_err(TransactionError::Zone)
    }

    /// Convenience wrapper for the common case: bump the origin SOA
    /// serial by one.
    pub fn increment_soa_serial(&mut self) -> Result<(), TransactionError> {
        self.update_serial(1, true, None)
    }

    pub fn commit(mut self) -> Result<Version, TransactionError> {
        if self.ended {
            return Err(TransactionError::AlreadyEnded);
        }
        self.ended = true;
        let w = self.writable.take().ok_or(TransactionError::AlreadyEnded)?;
        w.zone().check_origin().map_err(TransactionError::Zone)?;
        Ok(w.into_version())
    }

    pub fn rollback(mut self) {
        self.ended = true;
        self.writable = None;
    }
}

/// A pruning decision callable: `(zone, version) -> bool`, `true`
/// meaning the version may be dropped (spec §4.9 "Versioned zone").
pub type PruningPolicy = Arc<dyn Fn(&Zone, &Version) -> bool + Send + Sync>;

struct VersionedZoneState {
    next_id: u64,
    current: Version,
    /// Retained tail versions (readers opened before a commit keep
    /// observing their own `Version`/`Arc<Zone>` regardless of what
    /// this list holds; this list only governs how long *this* manager
    /// keeps a reference alive for late-arriving lookups by id).
    history: Vec<Version>,
}

/// Manages the single-writer/multi-reader protocol described in
/// spec.md §4.9: one writer transaction at a time (serialized by an
/// internal mutex), many concurrent readers each holding their own
/// immutable [`Version`] snapshot that a commit never mutates in place.
///
/// The default pruning policy retains only the latest version — callers
/// that need history (e.g. to let slow readers keep consulting an older
/// snapshot by id) supply their own policy via [`VersionedZone::with_pruning_policy`].
pub struct VersionedZone {
    state: Mutex<VersionedZoneState>,
    pruning_policy: PruningPolicy,
}

fn retain_latest_only(_zone: &Zone, _version: &Version) -> bool {
    true
}

impl VersionedZone {
    pub fn new(zone: Zone) -> Self {
        VersionedZone {
            state: Mutex::new(VersionedZoneState {
                next_id: 1,
                current: Version::new(zone),
                history: Vec::new(),
            }),
            pruning_policy: Arc::new(retain_latest_only),
        }
    }

    pub fn with_pruning_policy(zone: Zone, policy: PruningPolicy) -> Self {
        VersionedZone {
            state: Mutex::new(VersionedZoneState {
                next_id: 1,
                current: Version::new(zone),
                history: Vec::new(),
            }),
            pruning_policy: policy,
        }
    }

    /// The current committed snapshot. Readers call this once and keep
    /// the returned `Version` for the lifetime of their read — later
    /// commits never mutate it.
    pub fn current(&self) -> Version {
        self.state.lock().unwrap().current.clone()
    }

    /// Begin a reader transaction against the current snapshot.
    pub fn reader(&self) -> Transaction {
        Transaction::begin(&self.current(), true)
    }

    /// Begin a writer transaction against the current snapshot. Only
    /// one writer transaction should be outstanding at a time; callers
    /// serialize that externally (or by holding the returned guard for
    /// the duration of one edit/commit cycle) since `Transaction` itself
    /// does not block.
    pub fn writer(&self) -> Transaction {
        Transaction::begin(&self.current(), false)
    }

    /// Publish a writer transaction's commit as the new current
    /// version, stamping it with the next id and running the pruning
    /// policy over the retained history.
    pub fn publish(&self, new_zone: Zone) -> Version {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        let version = Version::with_id(new_zone, id);
        state.history.push(state.current.clone());
        state.current = version.clone();
        let policy = self.pruning_policy.clone();
        state.history.retain(|v| !policy(v.zone(), v));
        version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdata::{Ns, Soa, A};

    fn test_zone() -> Zone {
        let origin = Name::from_text("example.").unwrap();
        let mut zone = Zone::new(origin.clone(), crate::rdata::CLASS_IN);
        zone.add(
            origin.clone(),
            crate::rdata::TYPE_SOA,
            0,
            3600,
            RData::Soa(Soa {
                mname: Name::from_text("ns1.example.").unwrap(),
                rname: Name::from_text("hostmaster.example.").unwrap(),
                serial: 1,
                refresh: 3600,
                retry: 600,
                expire: 86400,
                minimum: 300,
            }),
        )
        .unwrap();
        zone.add(
            origin,
            crate::rdata::TYPE_NS,
            0,
            3600,
            RData::Ns(Ns {
                nsdname: Name::from_text("ns1.example.").unwrap(),
            }),
        )
        .unwrap();
        zone
    }

    #[test]
    fn update_serial_relative_increments() {
        let version = Version::new(test_zone());
        let mut txn = Transaction::begin(&version, false);
        txn.update_serial(1, true, None).unwrap();
        let committed = txn.commit().unwrap();
        match committed.zone().get_soa().unwrap() {
            RData::Soa(soa) => assert_eq!(soa.serial, 2),
            _ => unreachable!(),
        }
    }

    #[test]
    fn check_put_rdataset_hook_can_veto() {
        let version = Version::new(test_zone());
        let mut txn = Transaction::begin(&version, false);
        txn.hooks_mut().on_check_put_rdataset(Box::new(|_, rdtype, _, _| {
            if rdtype == crate::rdata::TYPE_A {
                Err(TransactionError::Zone(ZoneError::CNAMEAndOtherData))
            } else {
                Ok(())
            }
        }));
        let result = txn.add(
            Name::from_text("www.example.").unwrap(),
            crate::rdata::TYPE_A,
            0,
            300,
            RData::A(A {
                address: "192.0.2.1".parse().unwrap(),
            }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn versioned_zone_publish_advances_current() {
        let vz = VersionedZone::new(test_zone());
        let before = vz.current();
        assert_eq!(before.id(), 0);
        let mut txn = vz.writer();
        txn.update_serial(1, true, None).unwrap();
        let committed = txn.commit().unwrap();
        let published = vz.publish(committed.zone().clone());
        assert_eq!(published.id(), 1);
        assert_eq!(vz.current().id(), 1);
    }

    #[test]
    fn reader_keeps_its_own_snapshot_after_a_later_commit() {
        let vz = VersionedZone::new(test_zone());
        let reader_version = vz.current();
        let mut txn = vz.writer();
        txn.update_serial(5, true, None).unwrap();
        let committed = txn.commit().unwrap();
        vz.publish(committed.zone().clone());
        match reader_version.zone().get_soa().unwrap() {
            RData::Soa(soa) => assert_eq!(soa.serial, 1),
            _ => unreachable!(),
        }
        match vz.current().zone().get_soa().unwrap() {
            RData::Soa(soa) => assert_eq!(soa.serial, 6),
            _ => unreachable!(),
        }
    }
}
