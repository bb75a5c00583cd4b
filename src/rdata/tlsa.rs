use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// TLSA certificate association (RFC 6698). SMIMEA (RFC 8162) shares
/// this exact wire layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlsa {
    pub cert_usage: u8,
    pub selector: u8,
    pub matching_type: u8,
    pub cert_assoc_data: Vec<u8>,
}

impl RecordData for Tlsa {
    const RDTYPE: u16 = super::TYPE_TLSA;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        let cert_usage = reader.read_u8()?;
        let selector = reader.read_u8()?;
        let matching_type = reader.read_u8()?;
        let cert_assoc_data = reader.read_bytes(rdlength - 3)?.to_vec();
        Ok(Tlsa {
            cert_usage,
            selector,
            matching_type,
            cert_assoc_data,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_u8(self.cert_usage);
        renderer.write_u8(self.selector);
        renderer.write_u8(self.matching_type);
        renderer.write_bytes(&self.cert_assoc_data);
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.push(self.cert_usage);
        out.push(self.selector);
        out.push(self.matching_type);
        out.extend_from_slice(&self.cert_assoc_data);
    }

    fn to_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.cert_usage,
            self.selector,
            self.matching_type,
            self.cert_assoc_data
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<String>()
        )
    }

    fn from_text(tokens: &[String], _origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let cert_usage = super::parse_num(super::next_token(tokens, 0, "TLSA usage")?, "TLSA usage")?;
        let selector = super::parse_num(super::next_token(tokens, 1, "TLSA selector")?, "TLSA selector")?;
        let matching_type = super::parse_num(super::next_token(tokens, 2, "TLSA matching type")?, "TLSA matching type")?;
        let hex: String = tokens[3..].concat();
        let cert_assoc_data = super::parse_hex(&hex, "TLSA certificate association data")?;
        Ok(Tlsa {
            cert_usage,
            selector,
            matching_type,
            cert_assoc_data,
        })
    }
}
