use super::{read_character_string, write_character_string, RecordData};
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Naming authority pointer (RFC 3403). Flags/services/regexp are
/// character-strings; the replacement name is never compressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naptr {
    pub order: u16,
    pub preference: u16,
    pub flags: Vec<u8>,
    pub services: Vec<u8>,
    pub regexp: Vec<u8>,
    pub replacement: Name,
}

impl RecordData for Naptr {
    const RDTYPE: u16 = super::TYPE_NAPTR;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        let order = reader.read_u16()?;
        let preference = reader.read_u16()?;
        let flags = read_character_string(reader)?;
        let services = read_character_string(reader)?;
        let regexp = read_character_string(reader)?;
        let replacement = reader.read_name()?;
        Ok(Naptr {
            order,
            preference,
            flags,
            services,
            regexp,
            replacement,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_u16(self.order);
        renderer.write_u16(self.preference);
        write_character_string(renderer, &self.flags);
        write_character_string(renderer, &self.services);
        write_character_string(renderer, &self.regexp);
        renderer.write_name(&self.replacement, false)
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.order.to_be_bytes());
        out.extend_from_slice(&self.preference.to_be_bytes());
        for s in [&self.flags, &self.services, &self.regexp] {
            out.push(s.len() as u8);
            out.extend_from_slice(s);
        }
        out.extend_from_slice(self.replacement.canonical_bytes());
    }

    fn to_text(&self) -> String {
        format!(
            "{} {} \"{}\" \"{}\" \"{}\" {}",
            self.order,
            self.preference,
            String::from_utf8_lossy(&self.flags),
            String::from_utf8_lossy(&self.services),
            String::from_utf8_lossy(&self.regexp),
            self.replacement
        )
    }

    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let order = super::parse_num(super::next_token(tokens, 0, "NAPTR order")?, "NAPTR order")?;
        let preference = super::parse_num(super::next_token(tokens, 1, "NAPTR preference")?, "NAPTR preference")?;
        let flags = super::next_token(tokens, 2, "NAPTR flags")?.trim_matches('"').as_bytes().to_vec();
        let services = super::next_token(tokens, 3, "NAPTR services")?.trim_matches('"').as_bytes().to_vec();
        let regexp = super::next_token(tokens, 4, "NAPTR regexp")?.trim_matches('"').as_bytes().to_vec();
        let replacement = super::parse_name_token(super::next_token(tokens, 5, "NAPTR replacement")?, origin)?;
        Ok(Naptr {
            order,
            preference,
            flags,
            services,
            regexp,
            replacement,
        })
    }
}
