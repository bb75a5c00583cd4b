//! The fixed 12-byte message header (RFC 1035 §4.1.1, spec §4.5).
//! Field layout kept in the teacher's doc-comment voice
//! (`src/dns/header.rs`), generalized from a raw byte array onto typed
//! `Opcode`/`Rcode` the spec's flag/opcode/rcode split implies.

use crate::error::WireError;
use crate::wire::{Reader, Renderer};
use rand::Rng;

/// DNS opcode (RFC 1035 §4.1.1, RFC 6895 §2.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Query,
    IQuery,
    Status,
    Notify,
    Update,
    Other(u8),
}

impl Opcode {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Opcode::Query,
            1 => Opcode::IQuery,
            2 => Opcode::Status,
            4 => Opcode::Notify,
            5 => Opcode::Update,
            other => Opcode::Other(other),
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            Opcode::Query => 0,
            Opcode::IQuery => 1,
            Opcode::Status => 2,
            Opcode::Notify => 4,
            Opcode::Update => 5,
            Opcode::Other(v) => v,
        }
    }
}

/// DNS response code (RFC 1035 §4.1.1, RFC 6895 §2.3). The low 4 bits
/// live in the header; EDNS extends this to 12 bits via the OPT TTL's
/// extended-rcode octet (spec §4.2 OPT), which the message layer
/// combines separately — this type only models the header's nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rcode {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    YxDomain,
    YxrrSet,
    NxrrSet,
    NotAuth,
    NotZone,
    Other(u8),
}

impl Rcode {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Rcode::NoError,
            1 => Rcode::FormErr,
            2 => Rcode::ServFail,
            3 => Rcode::NxDomain,
            4 => Rcode::NotImp,
            5 => Rcode::Refused,
            6 => Rcode::YxDomain,
            7 => Rcode::YxrrSet,
            8 => Rcode::NxrrSet,
            9 => Rcode::NotAuth,
            10 => Rcode::NotZone,
            other => Rcode::Other(other),
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            Rcode::NoError => 0,
            Rcode::FormErr => 1,
            Rcode::ServFail => 2,
            Rcode::NxDomain => 3,
            Rcode::NotImp => 4,
            Rcode::Refused => 5,
            Rcode::YxDomain => 6,
            Rcode::YxrrSet => 7,
            Rcode::NxrrSet => 8,
            Rcode::NotAuth => 9,
            Rcode::NotZone => 10,
            Rcode::Other(v) => v,
        }
    }
}

/// The 12-byte header preceding every message's sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    pub opcode: Opcode,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub ad: bool,
    pub cd: bool,
    pub rcode: Rcode,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl PartialEq for Opcode {
    fn eq(&self, other: &Self) -> bool {
        self.to_u8() == other.to_u8()
    }
}
impl Eq for Opcode {}
impl PartialEq for Rcode {
    fn eq(&self, other: &Self) -> bool {
        self.to_u8() == other.to_u8()
    }
}
impl Eq for Rcode {}

impl Header {
    /// A fresh query header with a random id, matching the teacher's
    /// `Header::new` (`rand::thread_rng().gen()`).
    pub fn new(id_hint: Option<u16>) -> Self {
        let id = id_hint.unwrap_or_else(|| rand::thread_rng().gen());
        Header {
            id,
            qr: false,
            opcode: Opcode::Query,
            aa: false,
            tc: false,
            rd: true,
            ra: false,
            ad: false,
            cd: false,
            rcode: Rcode::NoError,
            qdcount: 0,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    pub fn from_wire(reader: &mut Reader<'_>) -> Result<Self, WireError> {
        let id = reader.read_u16()?;
        let flags = reader.read_u16()?;
        let qdcount = reader.read_u16()?;
        let ancount = reader.read_u16()?;
        let nscount = reader.read_u16()?;
        let arcount = reader.read_u16()?;
        Ok(Header {
            id,
            qr: flags & 0x8000 != 0,
            opcode: Opcode::from_u8(((flags >> 11) & 0x0F) as u8),
            aa: flags & 0x0400 != 0,
            tc: flags & 0x0200 != 0,
            rd: flags & 0x0100 != 0,
            ra: flags & 0x0080 != 0,
            ad: flags & 0x0020 != 0,
            cd: flags & 0x0010 != 0,
            rcode: Rcode::from_u8((flags & 0x000F) as u8),
            qdcount,
            ancount,
            nscount,
            arcount,
        })
    }

    fn flags(&self) -> u16 {
        let mut f = 0u16;
        if self.qr {
            f |= 0x8000;
        }
        f |= ((self.opcode.to_u8() & 0x0F) as u16) << 11;
        if self.aa {
            f |= 0x0400;
        }
        if self.tc {
            f |= 0x0200;
        }
        if self.rd {
            f |= 0x0100;
        }
        if self.ra {
            f |= 0x0080;
        }
        if self.ad {
            f |= 0x0020;
        }
        if self.cd {
            f |= 0x0010;
        }
        f |= (self.rcode.to_u8() & 0x0F) as u16;
        f
    }

    /// Write the 12-byte header, with the section counts as given
    /// (callers patch `qdcount`/`ancount`/`nscount`/`arcount` onto
    /// `self` before calling this, once the sections are rendered).
    pub fn to_wire(&self, renderer: &mut Renderer) {
        renderer.write_u16(self.id);
        renderer.write_u16(self.flags());
        renderer.write_u16(self.qdcount);
        renderer.write_u16(self.ancount);
        renderer.write_u16(self.nscount);
        renderer.write_u16(self.arcount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_round_trip() {
        let mut h = Header::new(Some(1));
        h.qr = true;
        h.rd = true;
        h.ra = true;
        let mut r = Renderer::new();
        h.to_wire(&mut r);
        let mut reader = Reader::new(r.bytes());
        let decoded = Header::from_wire(&mut reader).unwrap();
        assert_eq!(decoded, h);
    }

    #[test]
    fn scenario_minimal_a_record_response() {
        let bytes: [u8; 12] = [
            0x00, 0x01, 0x81, 0x80, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
        ];
        let mut reader = Reader::new(&bytes);
        let h = Header::from_wire(&mut reader).unwrap();
        assert_eq!(h.id, 1);
        assert!(h.qr);
        assert!(h.rd);
        assert!(h.ra);
        assert_eq!(h.qdcount, 1);
        assert_eq!(h.ancount, 1);
    }
}
