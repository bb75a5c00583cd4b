use crate::rdata::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// NSEC3 parameters published at a zone's apex (RFC 5155 §4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nsec3param {
    pub hash_algorithm: u8,
    pub flags: u8,
    pub iterations: u16,
    pub salt: Vec<u8>,
}

impl RecordData for Nsec3param {
    const RDTYPE: u16 = crate::rdata::TYPE_NSEC3PARAM;

    fn from_wire(reader: &mut Reader<'_>, _rdlength: usize) -> Result<Self, WireError> {
        let hash_algorithm = reader.read_u8()?;
        let flags = reader.read_u8()?;
        let iterations = reader.read_u16()?;
        let salt_len = reader.read_u8()? as usize;
        let salt = reader.read_bytes(salt_len)?.to_vec();
        Ok(Nsec3param {
            hash_algorithm,
            flags,
            iterations,
            salt,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_u8(self.hash_algorithm);
        renderer.write_u8(self.flags);
        renderer.write_u16(self.iterations);
        renderer.write_u8(self.salt.len() as u8);
        renderer.write_bytes(&self.salt);
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.push(self.hash_algorithm);
        out.push(self.flags);
        out.extend_from_slice(&self.iterations.to_be_bytes());
        out.push(self.salt.len() as u8);
        out.extend_from_slice(&self.salt);
    }

    fn to_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.hash_algorithm,
            self.flags,
            self.iterations,
            data_encoding::HEXUPPER.encode(&self.salt)
        )
    }

    fn from_text(tokens: &[String], _origin: Option<&Name>) -> Result<Self, RdataTextError> {
        use crate::rdata::{next_token, parse_hex, parse_num};
        let hash_algorithm = parse_num(next_token(tokens, 0, "NSEC3PARAM hash algorithm")?, "NSEC3PARAM hash algorithm")?;
        let flags = parse_num(next_token(tokens, 1, "NSEC3PARAM flags")?, "NSEC3PARAM flags")?;
        let iterations = parse_num(next_token(tokens, 2, "NSEC3PARAM iterations")?, "NSEC3PARAM iterations")?;
        let salt_tok = next_token(tokens, 3, "NSEC3PARAM salt")?;
        let salt = if salt_tok == "-" {
            Vec::new()
        } else {
            parse_hex(salt_tok, "NSEC3PARAM salt")?
        };
        Ok(Nsec3param {
            hash_algorithm,
            flags,
            iterations,
            salt,
        })
    }
}
