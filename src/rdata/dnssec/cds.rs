use super::Ds;
use crate::rdata::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Child copy of a DS record, published for the parent to pick up
/// (RFC 7344). Identical wire layout to DS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cds(pub Ds);

impl RecordData for Cds {
    const RDTYPE: u16 = crate::rdata::TYPE_CDS;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        Ok(Cds(Ds::from_wire(reader, rdlength)?))
    }
    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        self.0.to_wire(renderer)
    }
    fn to_canonical(&self, out: &mut Vec<u8>) {
        self.0.to_canonical(out)
    }
    fn to_text(&self) -> String {
        self.0.to_text()
    }
    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        Ok(Cds(Ds::from_text(tokens, origin)?))
    }
}
