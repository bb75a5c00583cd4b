use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};
use std::net::Ipv4Addr;

/// IPv4 address (RFC 1035 §3.4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct A {
    pub address: Ipv4Addr,
}

impl RecordData for A {
    const RDTYPE: u16 = super::TYPE_A;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        let b = reader.read_bytes(4)?;
        Ok(A {
            address: Ipv4Addr::new(b[0], b[1], b[2], b[3]),
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_bytes(&self.address.octets());
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.address.octets());
    }

    fn to_text(&self) -> String {
        self.address.to_string()
    }

    fn from_text(tokens: &[String], _origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let tok = super::next_token(tokens, 0, "IPv4 address")?;
        let address = tok
            .parse()
            .map_err(|_| RdataTextError::new(format!("invalid IPv4 address: {tok:?}")))?;
        Ok(A { address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_address() {
        let a = A {
            address: "192.0.2.1".parse().unwrap(),
        };
        let mut r = Renderer::new();
        a.to_wire(&mut r).unwrap();
        assert_eq!(r.bytes(), &[192, 0, 2, 1]);
        let mut reader = Reader::new(r.bytes());
        let decoded = A::from_wire(&mut reader, 4).unwrap();
        assert_eq!(decoded, a);
    }
}
