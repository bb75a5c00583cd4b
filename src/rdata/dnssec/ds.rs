use crate::rdata::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Delegation signer (RFC 4034 §5): a digest of a child zone's DNSKEY,
/// published by the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ds {
    pub key_tag: u16,
    pub algorithm: u8,
    pub digest_type: u8,
    pub digest: Vec<u8>,
}

impl RecordData for Ds {
    const RDTYPE: u16 = crate::rdata::TYPE_DS;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        let key_tag = reader.read_u16()?;
        let algorithm = reader.read_u8()?;
        let digest_type = reader.read_u8()?;
        let digest = reader.read_bytes(rdlength - 4)?.to_vec();
        Ok(Ds {
            key_tag,
            algorithm,
            digest_type,
            digest,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_u16(self.key_tag);
        renderer.write_u8(self.algorithm);
        renderer.write_u8(self.digest_type);
        renderer.write_bytes(&self.digest);
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.key_tag.to_be_bytes());
        out.push(self.algorithm);
        out.push(self.digest_type);
        out.extend_from_slice(&self.digest);
    }

    fn to_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.key_tag,
            self.algorithm,
            self.digest_type,
            self.digest.iter().map(|b| format!("{:02X}", b)).collect::<String>()
        )
    }

    fn from_text(tokens: &[String], _origin: Option<&Name>) -> Result<Self, RdataTextError> {
        use crate::rdata::{next_token, parse_hex, parse_num};
        let key_tag = parse_num(next_token(tokens, 0, "DS key tag")?, "DS key tag")?;
        let algorithm = parse_num(next_token(tokens, 1, "DS algorithm")?, "DS algorithm")?;
        let digest_type = parse_num(next_token(tokens, 2, "DS digest type")?, "DS digest type")?;
        let hex: String = tokens[3..].concat();
        let digest = parse_hex(&hex, "DS digest")?;
        Ok(Ds {
            key_tag,
            algorithm,
            digest_type,
            digest,
        })
    }
}
