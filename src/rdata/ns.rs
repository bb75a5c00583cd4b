use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Authoritative name server (RFC 1035 §3.3.11).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ns {
    pub nsdname: Name,
}

impl RecordData for Ns {
    const RDTYPE: u16 = super::TYPE_NS;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        Ok(Ns {
            nsdname: reader.read_name()?,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_name(&self.nsdname, true)
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.nsdname.canonical_bytes());
    }

    fn to_text(&self) -> String {
        super::name_to_text(&self.nsdname)
    }

    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let tok = super::next_token(tokens, 0, "domain name")?;
        Ok(Ns {
            nsdname: super::parse_name_token(tok, origin)?,
        })
    }
}
