use super::{read_character_string, write_character_string, RecordData};
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// CPU and OS identification (RFC 1035 §3.3.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hinfo {
    pub cpu: Vec<u8>,
    pub os: Vec<u8>,
}

impl RecordData for Hinfo {
    const RDTYPE: u16 = super::TYPE_HINFO;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        let cpu = read_character_string(reader)?;
        let os = read_character_string(reader)?;
        Ok(Hinfo { cpu, os })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        write_character_string(renderer, &self.cpu);
        write_character_string(renderer, &self.os);
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.push(self.cpu.len() as u8);
        out.extend_from_slice(&self.cpu);
        out.push(self.os.len() as u8);
        out.extend_from_slice(&self.os);
    }

    fn to_text(&self) -> String {
        format!(
            "\"{}\" \"{}\"",
            String::from_utf8_lossy(&self.cpu),
            String::from_utf8_lossy(&self.os)
        )
    }

    fn from_text(tokens: &[String], _origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let cpu = super::next_token(tokens, 0, "HINFO cpu")?
            .trim_matches('"')
            .as_bytes()
            .to_vec();
        let os = super::next_token(tokens, 1, "HINFO os")?
            .trim_matches('"')
            .as_bytes()
            .to_vec();
        Ok(Hinfo { cpu, os })
    }
}
