use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Pointer to another location in the name space (RFC 1035 §3.3.12).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ptr {
    pub ptrdname: Name,
}

impl RecordData for Ptr {
    const RDTYPE: u16 = super::TYPE_PTR;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        Ok(Ptr {
            ptrdname: reader.read_name()?,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_name(&self.ptrdname, true)
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.ptrdname.canonical_bytes());
    }

    fn to_text(&self) -> String {
        super::name_to_text(&self.ptrdname)
    }

    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let tok = super::next_token(tokens, 0, "domain name")?;
        Ok(Ptr {
            ptrdname: super::parse_name_token(tok, origin)?,
        })
    }
}
