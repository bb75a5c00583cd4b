use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Mail group member (RFC 1035 §3.3.6, experimental).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mg {
    pub mgmname: Name,
}

impl RecordData for Mg {
    const RDTYPE: u16 = super::TYPE_MG;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        Ok(Mg {
            mgmname: reader.read_name()?,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_name(&self.mgmname, true)
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.mgmname.canonical_bytes());
    }

    fn to_text(&self) -> String {
        super::name_to_text(&self.mgmname)
    }

    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let tok = super::next_token(tokens, 0, "domain name")?;
        Ok(Mg {
            mgmname: super::parse_name_token(tok, origin)?,
        })
    }
}
