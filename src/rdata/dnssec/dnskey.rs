use crate::rdata::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

pub const FLAG_ZONE_KEY: u16 = 0x0100;
pub const FLAG_SECURE_ENTRY_POINT: u16 = 0x0001;
pub const PROTOCOL_DNSSEC: u8 = 3;

/// A public key for use in DNSSEC (RFC 4034 §2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dnskey {
    pub flags: u16,
    pub protocol: u8,
    pub algorithm: u8,
    pub public_key: Vec<u8>,
}

impl Dnskey {
    pub fn is_zone_key(&self) -> bool {
        self.flags & FLAG_ZONE_KEY != 0
    }

    pub fn is_secure_entry_point(&self) -> bool {
        self.flags & FLAG_SECURE_ENTRY_POINT != 0
    }

    /// Key-tag input is the rdata itself (RFC 4034 Appendix B).
    pub fn key_tag(&self) -> u16 {
        let mut buf = Vec::new();
        self.to_canonical(&mut buf);
        super::key_tag(self.algorithm, &buf)
    }
}

impl RecordData for Dnskey {
    const RDTYPE: u16 = crate::rdata::TYPE_DNSKEY;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        let flags = reader.read_u16()?;
        let protocol = reader.read_u8()?;
        let algorithm = reader.read_u8()?;
        let public_key = reader.read_bytes(rdlength - 4)?.to_vec();
        Ok(Dnskey {
            flags,
            protocol,
            algorithm,
            public_key,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_u16(self.flags);
        renderer.write_u8(self.protocol);
        renderer.write_u8(self.algorithm);
        renderer.write_bytes(&self.public_key);
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.flags.to_be_bytes());
        out.push(self.protocol);
        out.push(self.algorithm);
        out.extend_from_slice(&self.public_key);
    }

    fn to_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.flags,
            self.protocol,
            self.algorithm,
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &self.public_key)
        )
    }

    fn from_text(tokens: &[String], _origin: Option<&Name>) -> Result<Self, RdataTextError> {
        use crate::rdata::{next_token, parse_num};
        let flags = parse_num(next_token(tokens, 0, "DNSKEY flags")?, "DNSKEY flags")?;
        let protocol = parse_num(next_token(tokens, 1, "DNSKEY protocol")?, "DNSKEY protocol")?;
        let algorithm = parse_num(next_token(tokens, 2, "DNSKEY algorithm")?, "DNSKEY algorithm")?;
        let b64: String = tokens[3..].concat();
        let public_key = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, b64)
            .map_err(|e| RdataTextError::new(format!("invalid DNSKEY base64: {e}")))?;
        Ok(Dnskey {
            flags,
            protocol,
            algorithm,
            public_key,
        })
    }
}
