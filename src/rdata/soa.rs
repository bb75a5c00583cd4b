use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Start of authority (RFC 1035 §3.3.13).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Soa {
    pub mname: Name,
    pub rname: Name,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

impl RecordData for Soa {
    const RDTYPE: u16 = super::TYPE_SOA;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        let mname = reader.read_name()?;
        let rname = reader.read_name()?;
        let serial = reader.read_u32()?;
        let refresh = reader.read_u32()?;
        let retry = reader.read_u32()?;
        let expire = reader.read_u32()?;
        let minimum = reader.read_u32()?;
        Ok(Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_name(&self.mname, true)?;
        renderer.write_name(&self.rname, true)?;
        renderer.write_u32(self.serial);
        renderer.write_u32(self.refresh);
        renderer.write_u32(self.retry);
        renderer.write_u32(self.expire);
        renderer.write_u32(self.minimum);
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.mname.canonical_bytes());
        out.extend_from_slice(self.rname.canonical_bytes());
        out.extend_from_slice(&self.serial.to_be_bytes());
        out.extend_from_slice(&self.refresh.to_be_bytes());
        out.extend_from_slice(&self.retry.to_be_bytes());
        out.extend_from_slice(&self.expire.to_be_bytes());
        out.extend_from_slice(&self.minimum.to_be_bytes());
    }

    fn to_text(&self) -> String {
        format!(
            "{} {} {} {} {} {} {}",
            self.mname, self.rname, self.serial, self.refresh, self.retry, self.expire, self.minimum
        )
    }

    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let mname = super::parse_name_token(super::next_token(tokens, 0, "SOA mname")?, origin)?;
        let rname = super::parse_name_token(super::next_token(tokens, 1, "SOA rname")?, origin)?;
        let serial = super::parse_num(super::next_token(tokens, 2, "SOA serial")?, "SOA serial")?;
        let refresh = super::parse_ttl_units(super::next_token(tokens, 3, "SOA refresh")?)?;
        let retry = super::parse_ttl_units(super::next_token(tokens, 4, "SOA retry")?)?;
        let expire = super::parse_ttl_units(super::next_token(tokens, 5, "SOA expire")?)?;
        let minimum = super::parse_ttl_units(super::next_token(tokens, 6, "SOA minimum")?)?;
        Ok(Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let soa = Soa {
            mname: Name::from_text("ns1.example.").unwrap(),
            rname: Name::from_text("hostmaster.example.").unwrap(),
            serial: 2024010100,
            refresh: 3600,
            retry: 600,
            expire: 1209600,
            minimum: 300,
        };
        let mut r = Renderer::new();
        soa.to_wire(&mut r).unwrap();
        let mut reader = Reader::new(r.bytes());
        assert_eq!(Soa::from_wire(&mut reader, r.len()).unwrap(), soa);
    }
}
