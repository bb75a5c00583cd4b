use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// One EDNS option (RFC 6891 §6.1.2): `(code, data)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptOption {
    pub code: u16,
    pub data: Vec<u8>,
}

/// The OPT pseudo-record's rdata: a list of EDNS options. The UDP
/// payload size, extended RCODE, version and DO flag live in the owning
/// RR's class/TTL fields and are handled by the message layer, not here
/// (spec §4.5).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Opt {
    pub options: Vec<OptOption>,
}

impl RecordData for Opt {
    const RDTYPE: u16 = super::TYPE_OPT;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        let stop = reader.pos() + rdlength;
        let mut options = Vec::new();
        while reader.pos() < stop {
            let code = reader.read_u16()?;
            let len = reader.read_u16()? as usize;
            let data = reader.read_bytes(len)?.to_vec();
            options.push(OptOption { code, data });
        }
        Ok(Opt { options })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        for opt in &self.options {
            renderer.write_u16(opt.code);
            renderer.write_u16(opt.data.len() as u16);
            renderer.write_bytes(&opt.data);
        }
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        for opt in &self.options {
            out.extend_from_slice(&opt.code.to_be_bytes());
            out.extend_from_slice(&(opt.data.len() as u16).to_be_bytes());
            out.extend_from_slice(&opt.data);
        }
    }

    fn to_text(&self) -> String {
        format!("OPT options={}", self.options.len())
    }

    /// OPT is a pseudo-RR synthesized from EDNS settings, never present
    /// in zone-file text (spec §4.2, §6).
    fn from_text(_tokens: &[String], _origin: Option<&Name>) -> Result<Self, RdataTextError> {
        Err(RdataTextError::new(
            "OPT is a pseudo-record and has no zone-file presentation form",
        ))
    }
}
