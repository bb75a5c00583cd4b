use crate::rdata::{parse_name_token, RecordData};
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Transaction signature (RFC 8945). `time_signed` is a 48-bit value
/// stored in a `u64`; `algorithm` names the HMAC variant as a domain
/// name (e.g. `hmac-sha256.`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tsig {
    pub algorithm: Name,
    pub time_signed: u64,
    pub fudge: u16,
    pub mac: Vec<u8>,
    pub original_id: u16,
    pub error: u16,
    pub other_data: Vec<u8>,
}

impl RecordData for Tsig {
    const RDTYPE: u16 = crate::rdata::TYPE_TSIG;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        let algorithm = reader.read_name()?;
        let hi = reader.read_u16()? as u64;
        let lo = reader.read_u32()? as u64;
        let time_signed = (hi << 32) | lo;
        let fudge = reader.read_u16()?;
        let mac_len = reader.read_u16()? as usize;
        let mac = reader.read_bytes(mac_len)?.to_vec();
        let original_id = reader.read_u16()?;
        let error = reader.read_u16()?;
        let other_len = reader.read_u16()? as usize;
        let other_data = reader.read_bytes(other_len)?.to_vec();
        Ok(Tsig {
            algorithm,
            time_signed,
            fudge,
            mac,
            original_id,
            error,
            other_data,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_name(&self.algorithm, false)?;
        renderer.write_u16((self.time_signed >> 32) as u16);
        renderer.write_u32((self.time_signed & 0xFFFF_FFFF) as u32);
        renderer.write_u16(self.fudge);
        renderer.write_u16(self.mac.len() as u16);
        renderer.write_bytes(&self.mac);
        renderer.write_u16(self.original_id);
        renderer.write_u16(self.error);
        renderer.write_u16(self.other_data.len() as u16);
        renderer.write_bytes(&self.other_data);
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.algorithm.canonical_bytes());
        out.extend_from_slice(&((self.time_signed >> 32) as u16).to_be_bytes());
        out.extend_from_slice(&((self.time_signed & 0xFFFF_FFFF) as u32).to_be_bytes());
        out.extend_from_slice(&self.fudge.to_be_bytes());
        out.extend_from_slice(&(self.mac.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.mac);
        out.extend_from_slice(&self.original_id.to_be_bytes());
        out.extend_from_slice(&self.error.to_be_bytes());
        out.extend_from_slice(&(self.other_data.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.other_data);
    }

    fn to_text(&self) -> String {
        format!("{} {} {}", self.algorithm, self.time_signed, self.fudge)
    }

    /// TSIG is a pseudo-RR synthesized per-message (spec §4.2, §6); it
    /// has no real zone-file presentation form, but a minimal positional
    /// parse is accepted for tooling/test fixtures:
    /// `<algorithm> <time-signed> <fudge>` with an empty MAC and
    /// other-data.
    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        use crate::rdata::{next_token, parse_num};
        let algorithm = parse_name_token(next_token(tokens, 0, "TSIG algorithm")?, origin)?;
        let time_signed = parse_num(next_token(tokens, 1, "TSIG time signed")?, "TSIG time signed")?;
        let fudge = parse_num(next_token(tokens, 2, "TSIG fudge")?, "TSIG fudge")?;
        Ok(Tsig {
            algorithm,
            time_signed,
            fudge,
            mac: Vec::new(),
            original_id: 0,
            error: 0,
            other_data: Vec::new(),
        })
    }
}
