use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Mail rename domain name (RFC 1035 §3.3.8, experimental).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mr {
    pub newname: Name,
}

impl RecordData for Mr {
    const RDTYPE: u16 = super::TYPE_MR;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        Ok(Mr {
            newname: reader.read_name()?,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_name(&self.newname, true)
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.newname.canonical_bytes());
    }

    fn to_text(&self) -> String {
        super::name_to_text(&self.newname)
    }

    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let tok = super::next_token(tokens, 0, "domain name")?;
        Ok(Mr {
            newname: super::parse_name_token(tok, origin)?,
        })
    }
}
