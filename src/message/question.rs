use crate::error::WireError;
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// One entry of the question section: qname/qtype/qclass (RFC 1035
/// §4.1.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: Name,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(qname: Name, qtype: u16, qclass: u16) -> Self {
        Question {
            qname,
            qtype,
            qclass,
        }
    }

    pub fn from_wire(reader: &mut Reader<'_>) -> Result<Self, WireError> {
        let qname = reader.read_name()?;
        let qtype = reader.read_u16()?;
        let qclass = reader.read_u16()?;
        Ok(Question {
            qname,
            qtype,
            qclass,
        })
    }

    pub fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_name(&self.qname, true)?;
        renderer.write_u16(self.qtype);
        renderer.write_u16(self.qclass);
        Ok(())
    }
}
