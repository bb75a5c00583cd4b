use super::{read_character_string, write_character_string, RecordData};
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// One or more character-strings (RFC 1035 §3.3.14).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Txt {
    pub strings: Vec<Vec<u8>>,
}

impl RecordData for Txt {
    const RDTYPE: u16 = super::TYPE_TXT;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        let stop = reader.pos() + rdlength;
        let mut strings = Vec::new();
        while reader.pos() < stop {
            strings.push(read_character_string(reader)?);
        }
        Ok(Txt { strings })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        for s in &self.strings {
            write_character_string(renderer, s);
        }
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        for s in &self.strings {
            out.push(s.len() as u8);
            out.extend_from_slice(s);
        }
    }

    fn to_text(&self) -> String {
        self.strings
            .iter()
            .map(|s| format!("\"{}\"", String::from_utf8_lossy(s)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Each token is one already-unquoted character-string (the
    /// tokenizer strips the surrounding `"..."`); every token must fit
    /// in the 255-byte character-string length prefix.
    fn from_text(tokens: &[String], _origin: Option<&Name>) -> Result<Self, RdataTextError> {
        if tokens.is_empty() {
            return Err(RdataTextError::new("TXT record requires at least one character-string"));
        }
        let mut strings = Vec::with_capacity(tokens.len());
        for tok in tokens {
            let bytes = tok.as_bytes().to_vec();
            if bytes.len() > 255 {
                return Err(RdataTextError::new(format!(
                    "TXT character-string exceeds 255 bytes: {tok:?}"
                )));
            }
            strings.push(bytes);
        }
        Ok(Txt { strings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_strings_round_trip() {
        let txt = Txt {
            strings: vec![b"hello".to_vec(), b"world".to_vec()],
        };
        let mut r = Renderer::new();
        txt.to_wire(&mut r).unwrap();
        let mut reader = Reader::new(r.bytes());
        let decoded = Txt::from_wire(&mut reader, r.len()).unwrap();
        assert_eq!(decoded, txt);
    }
}
