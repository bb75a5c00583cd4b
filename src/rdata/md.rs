use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Mail destination (RFC 1035 §3.3.4, obsoleted by MX).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Md {
    pub madname: Name,
}

impl RecordData for Md {
    const RDTYPE: u16 = super::TYPE_MD;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        Ok(Md {
            madname: reader.read_name()?,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_name(&self.madname, true)
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.madname.canonical_bytes());
    }

    fn to_text(&self) -> String {
        super::name_to_text(&self.madname)
    }

    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let tok = super::next_token(tokens, 0, "domain name")?;
        Ok(Md {
            madname: super::parse_name_token(tok, origin)?,
        })
    }
}
