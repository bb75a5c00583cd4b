//! Zone-file writer (spec §4.7): the inverse of [`super::reader`] —
//! canonical-order iteration, `$ORIGIN` emission, owner-name
//! relativization, and BIND-style TTL units. Grounded on the teacher's
//! unfinished `MasterFileOperation::encode` (`src/components/name_server/zones/master_file.rs`,
//! which never implemented `encode` at all) — built fresh against
//! dnspython's `dns/zone.py` writer for field layout.

use crate::name::Name;
use crate::zone::Zone;

/// Options controlling presentation. `relativize` follows
/// [`Zone::relativize`] by default; set `false` to always emit
/// absolute names.
#[derive(Debug, Clone, Copy)]
pub struct WriterOptions {
    pub relativize: bool,
    pub emit_origin_directive: bool,
}

impl WriterOptions {
    pub fn for_zone(zone: &Zone) -> Self {
        WriterOptions {
            relativize: zone.relativize,
            emit_origin_directive: true,
        }
    }
}

/// Render `zone` to master-file text, one RR per line, owner names in
/// DNSSEC canonical order (RFC 4034 §6.1) as the in-memory `BTreeMap`
/// already iterates.
pub fn to_text(zone: &Zone, options: WriterOptions) -> String {
    let mut out = String::new();
    if options.emit_origin_directive {
        out.push_str(&format!("$ORIGIN {}\n", zone.origin()));
    }
    for (name, rdtype, ttl, rdata) in zone.iterate_rdatas() {
        let owner_text = if options.relativize {
            match name.relativize(zone.origin()) {
                Some(rel) if rel.label_count() == 0 => "@".to_string(),
                Some(rel) => rel.to_string(),
                None => name.to_string(),
            }
        } else {
            name.to_string()
        };
        out.push_str(&format_record(&owner_text, ttl, zone.rdclass(), rdtype, rdata));
        out.push('\n');
    }
    out
}

fn format_record(owner_text: &str, ttl: u32, rdclass: u16, rdtype: u16, rdata: &crate::rdata::RData) -> String {
    format!(
        "{} {} {} {} {}",
        owner_text,
        ttl,
        crate::rdata::rdclass_mnemonic(rdclass),
        crate::rdata::rdtype_mnemonic(rdtype),
        rdata.to_text()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdata::{Ns, RData, Soa, A, TYPE_NS, TYPE_SOA, TYPE_A, CLASS_IN};

    fn test_zone() -> Zone {
        let origin = Name::from_text("example.").unwrap();
        let mut zone = Zone::new(origin.clone(), CLASS_IN);
        zone.add(
            origin.clone(),
            TYPE_SOA,
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
            origin.clone(),
            TYPE_NS,
            0,
            3600,
            RData::Ns(Ns {
                nsdname: Name::from_text("ns1.example.").unwrap(),
            }),
        )
        .unwrap();
        zone.add(
            Name::from_text("www.example.").unwrap(),
            TYPE_A,
            0,
            300,
            RData::A(A {
                address: "192.0.2.1".parse().unwrap(),
            }),
        )
        .unwrap();
        zone
    }

    #[test]
    fn emits_origin_and_relativized_names() {
        let zone = test_zone();
        let text = to_text(&zone, WriterOptions::for_zone(&zone));
        assert!(text.starts_with("$ORIGIN example.\n"));
        assert!(text.contains("www IN A 192.0.2.1"));
        assert!(text.contains("@ IN SOA") || text.contains(". IN SOA"));
    }

    #[test]
    fn absolute_mode_skips_relativization() {
        let zone = test_zone();
        let mut options = WriterOptions::for_zone(&zone);
        options.relativize = false;
        let text = to_text(&zone, options);
        assert!(text.contains("www.example. IN A 192.0.2.1"));
    }
}
