use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Mailbox or mail list information (RFC 1035 §3.3.7, experimental).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minfo {
    pub rmailbx: Name,
    pub emailbx: Name,
}

impl RecordData for Minfo {
    const RDTYPE: u16 = super::TYPE_MINFO;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        let rmailbx = reader.read_name()?;
        let emailbx = reader.read_name()?;
        Ok(Minfo { rmailbx, emailbx })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_name(&self.rmailbx, true)?;
        renderer.write_name(&self.emailbx, true)
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.rmailbx.canonical_bytes());
        out.extend_from_slice(self.emailbx.canonical_bytes());
    }

    fn to_text(&self) -> String {
        format!("{} {}", self.rmailbx, self.emailbx)
    }

    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let rmailbx = super::parse_name_token(super::next_token(tokens, 0, "MINFO rmailbx")?, origin)?;
        let emailbx = super::parse_name_token(super::next_token(tokens, 1, "MINFO emailbx")?, origin)?;
        Ok(Minfo { rmailbx, emailbx })
    }
}
