use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Anything at all (RFC 1035 §3.3.10): an opaque blob, no validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Null {
    pub data: Vec<u8>,
}

impl RecordData for Null {
    const RDTYPE: u16 = super::TYPE_NULL;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        Ok(Null {
            data: reader.read_bytes(rdlength)?.to_vec(),
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_bytes(&self.data);
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.data);
    }

    fn to_text(&self) -> String {
        format!("\\# {} {}", self.data.len(), hex_encode(&self.data))
    }

    fn from_text(tokens: &[String], _origin: Option<&Name>) -> Result<Self, RdataTextError> {
        super::parse_generic_text(tokens).map(|data| Null { data })
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
