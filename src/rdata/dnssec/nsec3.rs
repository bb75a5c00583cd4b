use super::nsec::parse_rdtype;
use crate::rdata::{decode_type_bitmaps, encode_type_bitmaps, RdType, RecordData};
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

pub const FLAG_OPT_OUT: u8 = 0x01;

/// Hashed authenticated denial of existence (RFC 5155 §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nsec3 {
    pub hash_algorithm: u8,
    pub flags: u8,
    pub iterations: u16,
    pub salt: Vec<u8>,
    pub next_hashed_owner_name: Vec<u8>,
    pub type_bitmaps: Vec<RdType>,
}

impl Nsec3 {
    pub fn opt_out(&self) -> bool {
        self.flags & FLAG_OPT_OUT != 0
    }
}

impl RecordData for Nsec3 {
    const RDTYPE: u16 = crate::rdata::TYPE_NSEC3;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        let start = reader.pos();
        let hash_algorithm = reader.read_u8()?;
        let flags = reader.read_u8()?;
        let iterations = reader.read_u16()?;
        let salt_len = reader.read_u8()? as usize;
        let salt = reader.read_bytes(salt_len)?.to_vec();
        let hash_len = reader.read_u8()? as usize;
        let next_hashed_owner_name = reader.read_bytes(hash_len)?.to_vec();
        let consumed = reader.pos() - start;
        let bitmap_bytes = reader.read_bytes(rdlength - consumed)?;
        Ok(Nsec3 {
            hash_algorithm,
            flags,
            iterations,
            salt,
            next_hashed_owner_name,
            type_bitmaps: decode_type_bitmaps(bitmap_bytes),
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_u8(self.hash_algorithm);
        renderer.write_u8(self.flags);
        renderer.write_u16(self.iterations);
        renderer.write_u8(self.salt.len() as u8);
        renderer.write_bytes(&self.salt);
        renderer.write_u8(self.next_hashed_owner_name.len() as u8);
        renderer.write_bytes(&self.next_hashed_owner_name);
        renderer.write_bytes(&encode_type_bitmaps(&self.type_bitmaps));
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.push(self.hash_algorithm);
        out.push(self.flags);
        out.extend_from_slice(&self.iterations.to_be_bytes());
        out.push(self.salt.len() as u8);
        out.extend_from_slice(&self.salt);
        out.push(self.next_hashed_owner_name.len() as u8);
        out.extend_from_slice(&self.next_hashed_owner_name);
        out.extend_from_slice(&encode_type_bitmaps(&self.type_bitmaps));
    }

    fn to_text(&self) -> String {
        let types: Vec<String> = self
            .type_bitmaps
            .iter()
            .map(|t| crate::rdata::rdtype_mnemonic(*t))
            .collect();
        format!(
            "{} {} {} {} {} {}",
            self.hash_algorithm,
            self.flags,
            self.iterations,
            if self.salt.is_empty() {
                "-".to_string()
            } else {
                data_encoding::HEXUPPER.encode(&self.salt)
            },
            data_encoding::BASE32HEX_NOPAD.encode(&self.next_hashed_owner_name),
            types.join(" ")
        )
    }

    /// `<algo> <flags> <iterations> <salt|-> <next-hashed-base32hex> [types...]`
    /// (RFC 5155 §3.3).
    fn from_text(tokens: &[String], _origin: Option<&Name>) -> Result<Self, RdataTextError> {
        use crate::rdata::{next_token, parse_hex, parse_num};
        let hash_algorithm = parse_num(next_token(tokens, 0, "NSEC3 hash algorithm")?, "NSEC3 hash algorithm")?;
        let flags = parse_num(next_token(tokens, 1, "NSEC3 flags")?, "NSEC3 flags")?;
        let iterations = parse_num(next_token(tokens, 2, "NSEC3 iterations")?, "NSEC3 iterations")?;
        let salt_tok = next_token(tokens, 3, "NSEC3 salt")?;
        let salt = if salt_tok == "-" {
            Vec::new()
        } else {
            parse_hex(salt_tok, "NSEC3 salt")?
        };
        let hash_tok = next_token(tokens, 4, "NSEC3 next hashed owner name")?;
        let next_hashed_owner_name = data_encoding::BASE32HEX_NOPAD
            .decode(hash_tok.to_ascii_uppercase().as_bytes())
            .map_err(|e| RdataTextError::new(format!("invalid NSEC3 base32hex: {e}")))?;
        let type_bitmaps = tokens[5..]
            .iter()
            .map(|t| parse_rdtype(t))
            .collect::<Result<_, _>>()?;
        Ok(Nsec3 {
            hash_algorithm,
            flags,
            iterations,
            salt,
            next_hashed_owner_name,
            type_bitmaps,
        })
    }
}
