use crate::rdata::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Message digest over an entire zone (RFC 8976).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zonemd {
    pub serial: u32,
    pub scheme: u8,
    pub hash_algorithm: u8,
    pub digest: Vec<u8>,
}

impl RecordData for Zonemd {
    const RDTYPE: u16 = crate::rdata::TYPE_ZONEMD;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        let serial = reader.read_u32()?;
        let scheme = reader.read_u8()?;
        let hash_algorithm = reader.read_u8()?;
        let digest = reader.read_bytes(rdlength - 6)?.to_vec();
        Ok(Zonemd {
            serial,
            scheme,
            hash_algorithm,
            digest,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_u32(self.serial);
        renderer.write_u8(self.scheme);
        renderer.write_u8(self.hash_algorithm);
        renderer.write_bytes(&self.digest);
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.serial.to_be_bytes());
        out.push(self.scheme);
        out.push(self.hash_algorithm);
        out.extend_from_slice(&self.digest);
    }

    fn to_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.serial,
            self.scheme,
            self.hash_algorithm,
            data_encoding::HEXUPPER.encode(&self.digest)
        )
    }

    fn from_text(tokens: &[String], _origin: Option<&Name>) -> Result<Self, RdataTextError> {
        use crate::rdata::{next_token, parse_hex, parse_num};
        let serial = parse_num(next_token(tokens, 0, "ZONEMD serial")?, "ZONEMD serial")?;
        let scheme = parse_num(next_token(tokens, 1, "ZONEMD scheme")?, "ZONEMD scheme")?;
        let hash_algorithm = parse_num(next_token(tokens, 2, "ZONEMD hash algorithm")?, "ZONEMD hash algorithm")?;
        let hex: String = tokens[3..].concat();
        let digest = parse_hex(&hex, "ZONEMD digest")?;
        Ok(Zonemd {
            serial,
            scheme,
            hash_algorithm,
            digest,
        })
    }
}
