use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Mail exchange (RFC 1035 §3.3.9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mx {
    pub preference: u16,
    pub exchange: Name,
}

impl RecordData for Mx {
    const RDTYPE: u16 = super::TYPE_MX;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        let preference = reader.read_u16()?;
        let exchange = reader.read_name()?;
        Ok(Mx {
            preference,
            exchange,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_u16(self.preference);
        renderer.write_name(&self.exchange, true)
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.preference.to_be_bytes());
        out.extend_from_slice(self.exchange.canonical_bytes());
    }

    fn to_text(&self) -> String {
        format!("{} {}", self.preference, self.exchange)
    }

    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let preference = super::parse_num(super::next_token(tokens, 0, "MX preference")?, "MX preference")?;
        let exchange = super::parse_name_token(super::next_token(tokens, 1, "MX exchange")?, origin)?;
        Ok(Mx {
            preference,
            exchange,
        })
    }
}
