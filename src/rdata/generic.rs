use super::RdType;
use crate::error::{RdataTextError, WireError};
use crate::wire::{Reader, Renderer};

/// Fallback rdata for any `(class, type)` without a registered codec
/// (RFC 3597): the raw rdata bytes, tagged with the numeric type that
/// was actually on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generic {
    pub rdtype: RdType,
    pub bytes: Vec<u8>,
}

impl Generic {
    pub(crate) fn from_wire_typed(
        rdtype: RdType,
        reader: &mut Reader<'_>,
        rdlength: usize,
    ) -> Result<Self, WireError> {
        Ok(Generic {
            rdtype,
            bytes: reader.read_bytes(rdlength)?.to_vec(),
        })
    }

    pub fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_bytes(&self.bytes);
        Ok(())
    }

    pub fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.bytes);
    }

    /// RFC 3597 §5 generic rdata text form: `\# <len> <hex>`.
    pub fn to_text(&self) -> String {
        format!(
            "\\# {} {}",
            self.bytes.len(),
            self.bytes.iter().map(|b| format!("{:02x}", b)).collect::<String>()
        )
    }

    pub(crate) fn from_text_typed(rdtype: RdType, tokens: &[String]) -> Result<Self, RdataTextError> {
        Ok(Generic {
            rdtype,
            bytes: super::parse_generic_text(tokens)?,
        })
    }
}
