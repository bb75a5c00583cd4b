use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};
use std::net::Ipv6Addr;

/// IPv6 address (RFC 3596).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aaaa {
    pub address: Ipv6Addr,
}

impl RecordData for Aaaa {
    const RDTYPE: u16 = super::TYPE_AAAA;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        let b = reader.read_bytes(16)?;
        let mut octets = [0u8; 16];
        octets.copy_from_slice(b);
        Ok(Aaaa {
            address: Ipv6Addr::from(octets),
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
        let tok = super::next_token(tokens, 0, "IPv6 address")?;
        let address = tok
            .parse()
            .map_err(|_| RdataTextError::new(format!("invalid IPv6 address: {tok:?}")))?;
        Ok(Aaaa { address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_address() {
        let a = Aaaa {
            address: "2001:db8::1".parse().unwrap(),
        };
        let mut r = Renderer::new();
        a.to_wire(&mut r).unwrap();
        let mut reader = Reader::new(r.bytes());
        assert_eq!(Aaaa::from_wire(&mut reader, 16).unwrap(), a);
    }
}
