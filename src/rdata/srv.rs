use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Service location (RFC 2782). The target name is never compressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Srv {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: Name,
}

impl RecordData for Srv {
    const RDTYPE: u16 = super::TYPE_SRV;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        let priority = reader.read_u16()?;
        let weight = reader.read_u16()?;
        let port = reader.read_u16()?;
        let target = reader.read_name()?;
        Ok(Srv {
            priority,
            weight,
            port,
            target,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_u16(self.priority);
        renderer.write_u16(self.weight);
        renderer.write_u16(self.port);
        renderer.write_name(&self.target, false)
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.priority.to_be_bytes());
        out.extend_from_slice(&self.weight.to_be_bytes());
        out.extend_from_slice(&self.port.to_be_bytes());
        out.extend_from_slice(self.target.canonical_bytes());
    }

    fn to_text(&self) -> String {
        format!("{} {} {} {}", self.priority, self.weight, self.port, self.target)
    }

    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let priority = super::parse_num(super::next_token(tokens, 0, "SRV priority")?, "SRV priority")?;
        let weight = super::parse_num(super::next_token(tokens, 1, "SRV weight")?, "SRV weight")?;
        let port = super::parse_num(super::next_token(tokens, 2, "SRV port")?, "SRV port")?;
        let target = super::parse_name_token(super::next_token(tokens, 3, "SRV target")?, origin)?;
        Ok(Srv {
            priority,
            weight,
            port,
            target,
        })
    }
}
