use crate::rdata::{decode_type_bitmaps, encode_type_bitmaps, parse_name_token, RdType, RecordData};
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Type mnemonic or RFC 3597 `TYPEnnn` fallback; shares the one table in
/// [`crate::rdata::parse_rdtype_mnemonic`].
pub(crate) fn parse_rdtype(tok: &str) -> Result<RdType, RdataTextError> {
    crate::rdata::parse_rdtype_mnemonic(tok)
}

/// Authenticated denial of existence (RFC 4034 §4). `next_name` is
/// never compressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nsec {
    pub next_name: Name,
    pub type_bitmaps: Vec<RdType>,
}

impl RecordData for Nsec {
    const RDTYPE: u16 = crate::rdata::TYPE_NSEC;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        let start = reader.pos();
        let next_name = reader.read_name()?;
        let consumed = reader.pos() - start;
        let bitmap_bytes = reader.read_bytes(rdlength - consumed)?;
        Ok(Nsec {
            next_name,
            type_bitmaps: decode_type_bitmaps(bitmap_bytes),
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_name(&self.next_name, false)?;
        renderer.write_bytes(&encode_type_bitmaps(&self.type_bitmaps));
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.next_name.canonical_bytes());
        out.extend_from_slice(&encode_type_bitmaps(&self.type_bitmaps));
    }

    fn to_text(&self) -> String {
        let types: Vec<String> = self
            .type_bitmaps
            .iter()
            .map(|t| crate::rdata::rdtype_mnemonic(*t))
            .collect();
        format!("{} {}", self.next_name, types.join(" "))
    }

    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let next_name = parse_name_token(
            crate::rdata::next_token(tokens, 0, "NSEC next name")?,
            origin,
        )?;
        let type_bitmaps = tokens[1..].iter().map(|t| parse_rdtype(t)).collect::<Result<_, _>>()?;
        Ok(Nsec {
            next_name,
            type_bitmaps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_round_trips_through_wire() {
        let nsec = Nsec {
            next_name: Name::from_text("b.example.").unwrap(),
            type_bitmaps: vec![1, 15, 16, 28, 46, 47],
        };
        let mut r = Renderer::new();
        nsec.to_wire(&mut r).unwrap();
        let mut reader = Reader::new(r.bytes());
        let decoded = Nsec::from_wire(&mut reader, r.len()).unwrap();
        assert_eq!(decoded.type_bitmaps, nsec.type_bitmaps);
    }

    #[test]
    fn text_round_trips_type_list() {
        let nsec = Nsec {
            next_name: Name::from_text("b.example.").unwrap(),
            type_bitmaps: vec![crate::rdata::TYPE_A, crate::rdata::TYPE_NS, crate::rdata::TYPE_RRSIG],
        };
        let text = nsec.to_text();
        let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let reparsed = Nsec::from_text(&tokens, None).unwrap();
        assert_eq!(reparsed, nsec);
    }
}
