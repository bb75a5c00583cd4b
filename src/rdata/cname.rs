use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Canonical name alias (RFC 1035 §3.3.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cname {
    pub cname: Name,
}

impl RecordData for Cname {
    const RDTYPE: u16 = super::TYPE_CNAME;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        Ok(Cname {
            cname: reader.read_name()?,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_name(&self.cname, true)
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.cname.canonical_bytes());
    }

    fn to_text(&self) -> String {
        super::name_to_text(&self.cname)
    }

    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let tok = super::next_token(tokens, 0, "domain name")?;
        Ok(Cname {
            cname: super::parse_name_token(tok, origin)?,
        })
    }
}
