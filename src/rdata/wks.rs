use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};
use std::net::Ipv4Addr;

/// Well-known service description (RFC 1035 §3.4.2, obsolete).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wks {
    pub address: Ipv4Addr,
    pub protocol: u8,
    pub bitmap: Vec<u8>,
}

impl RecordData for Wks {
    const RDTYPE: u16 = super::TYPE_WKS;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        let b = reader.read_bytes(4)?;
        let address = Ipv4Addr::new(b[0], b[1], b[2], b[3]);
        let protocol = reader.read_u8()?;
        let bitmap = reader.read_bytes(rdlength - 5)?.to_vec();
        Ok(Wks {
            address,
            protocol,
            bitmap,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_bytes(&self.address.octets());
        renderer.write_u8(self.protocol);
        renderer.write_bytes(&self.bitmap);
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.address.octets());
        out.push(self.protocol);
        out.extend_from_slice(&self.bitmap);
    }

    fn to_text(&self) -> String {
        let ports: Vec<String> = (0..self.bitmap.len() * 8)
            .filter(|p| self.bitmap[p / 8] & (0x80 >> (p % 8)) != 0)
            .map(|p| p.to_string())
            .collect();
        format!("{} {} {}", self.address, self.protocol, ports.join(" "))
    }

    /// `<address> <protocol> <port>...`, each port a decimal number set
    /// as a bit in the service bitmap (RFC 1035 §3.4.2).
    fn from_text(tokens: &[String], _origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let address = super::next_token(tokens, 0, "WKS address")?
            .parse()
            .map_err(|_| RdataTextError::new("invalid WKS address"))?;
        let protocol = super::parse_num(super::next_token(tokens, 1, "WKS protocol")?, "WKS protocol")?;
        let mut bitmap = Vec::new();
        for tok in &tokens[2..] {
            let port: usize = super::parse_num(tok, "WKS port")?;
            let byte = port / 8;
            if byte >= bitmap.len() {
                bitmap.resize(byte + 1, 0);
            }
            bitmap[byte] |= 0x80 >> (port % 8);
        }
        Ok(Wks {
            address,
            protocol,
            bitmap,
        })
    }
}
