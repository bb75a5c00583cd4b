use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Certification authority authorization (RFC 6844). `tag` is a
/// length-prefixed ASCII identifier; `value` is the remaining opaque
/// bytes with no further length prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caa {
    pub flags: u8,
    pub tag: Vec<u8>,
    pub value: Vec<u8>,
}

impl RecordData for Caa {
    const RDTYPE: u16 = super::TYPE_CAA;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        let start = reader.pos();
        let flags = reader.read_u8()?;
        let tag_len = reader.read_u8()? as usize;
        let tag = reader.read_bytes(tag_len)?.to_vec();
        let consumed = reader.pos() - start;
        let value = reader.read_bytes(rdlength - consumed)?.to_vec();
        Ok(Caa { flags, tag, value })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_u8(self.flags);
        renderer.write_u8(self.tag.len() as u8);
        renderer.write_bytes(&self.tag);
        renderer.write_bytes(&self.value);
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.push(self.flags);
        out.push(self.tag.len() as u8);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.value);
    }

    fn to_text(&self) -> String {
        format!(
            "{} {} \"{}\"",
            self.flags,
            String::from_utf8_lossy(&self.tag),
            String::from_utf8_lossy(&self.value)
        )
    }

    fn from_text(tokens: &[String], _origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let flags = super::parse_num(super::next_token(tokens, 0, "CAA flags")?, "CAA flags")?;
        let tag = super::next_token(tokens, 1, "CAA tag")?.as_bytes().to_vec();
        let value = super::next_token(tokens, 2, "CAA value")?
            .trim_matches('"')
            .as_bytes()
            .to_vec();
        Ok(Caa { flags, tag, value })
    }
}
