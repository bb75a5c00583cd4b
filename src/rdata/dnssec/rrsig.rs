use crate::rdata::{parse_name_token, RecordData};
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// Parse an RRSIG inception/expiration token: either a bare
/// seconds-since-epoch integer, or the 14-digit `YYYYMMDDHHMMSS` form
/// (RFC 4034 §3.2), both accepted on input.
fn parse_rrsig_time(token: &str) -> Result<u32, RdataTextError> {
    if token.len() == 14 && token.bytes().all(|b| b.is_ascii_digit()) {
        let year: i64 = token[0..4].parse().unwrap();
        let month: u32 = token[4..6].parse().unwrap();
        let day: u32 = token[6..8].parse().unwrap();
        let hour: i64 = token[8..10].parse().unwrap();
        let minute: i64 = token[10..12].parse().unwrap();
        let second: i64 = token[12..14].parse().unwrap();
        let days = days_from_civil(year, month, day);
        let secs = days * 86_400 + hour * 3600 + minute * 60 + second;
        return u32::try_from(secs).map_err(|_| RdataTextError::new("RRSIG time out of range"));
    }
    token
        .parse()
        .map_err(|_| RdataTextError::new(format!("invalid RRSIG timestamp: {token}")))
}

/// Howard Hinnant's `days_from_civil`: days since 1970-01-01 for a
/// proleptic-Gregorian (year, month, day).
fn days_from_civil(y: i64, m: u32, d: u32) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as i64;
    let mp = (m as i64 + 9) % 12;
    let doy = (153 * mp + 2) / 5 + d as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Resource record signature (RFC 4034 §3). `signer_name` is never
/// compressed and `labels` records the owner name's label count at
/// signing time, used to detect (and resynthesize) wildcard expansion
/// during validation (spec §4.8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rrsig {
    pub type_covered: u16,
    pub algorithm: u8,
    pub labels: u8,
    pub original_ttl: u32,
    pub expiration: u32,
    pub inception: u32,
    pub key_tag: u16,
    pub signer_name: Name,
    pub signature: Vec<u8>,
}

impl Rrsig {
    /// The signature-input prefix: everything up to but excluding the
    /// signature itself, with `signer_name` canonicalized (RFC 4034
    /// §3.1.8.1 step 1, and RFC 4035 §5.3.2).
    pub fn signed_data_prefix(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(18 + self.signer_name.wire_len());
        out.extend_from_slice(&self.type_covered.to_be_bytes());
        out.push(self.algorithm);
        out.push(self.labels);
        out.extend_from_slice(&self.original_ttl.to_be_bytes());
        out.extend_from_slice(&self.expiration.to_be_bytes());
        out.extend_from_slice(&self.inception.to_be_bytes());
        out.extend_from_slice(&self.key_tag.to_be_bytes());
        out.extend_from_slice(self.signer_name.canonical_bytes());
        out
    }
}

impl RecordData for Rrsig {
    const RDTYPE: u16 = crate::rdata::TYPE_RRSIG;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        let start = reader.pos();
        let type_covered = reader.read_u16()?;
        let algorithm = reader.read_u8()?;
        let labels = reader.read_u8()?;
        let original_ttl = reader.read_u32()?;
        let expiration = reader.read_u32()?;
        let inception = reader.read_u32()?;
        let key_tag = reader.read_u16()?;
        let signer_name = reader.read_name()?;
        let consumed = reader.pos() - start;
        let signature = reader.read_bytes(rdlength - consumed)?.to_vec();
        Ok(Rrsig {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        })
    }

    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_u16(self.type_covered);
        renderer.write_u8(self.algorithm);
        renderer.write_u8(self.labels);
        renderer.write_u32(self.original_ttl);
        renderer.write_u32(self.expiration);
        renderer.write_u32(self.inception);
        renderer.write_u16(self.key_tag);
        renderer.write_name(&self.signer_name, false)?;
        renderer.write_bytes(&self.signature);
        Ok(())
    }

    fn to_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.signed_data_prefix());
        out.extend_from_slice(&self.signature);
    }

    fn to_text(&self) -> String {
        format!(
            "{} {} {} {} {} {} {} {} {}",
            self.type_covered,
            self.algorithm,
            self.labels,
            self.original_ttl,
            self.expiration,
            self.inception,
            self.key_tag,
            self.signer_name,
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &self.signature)
        )
    }

    /// `<type-covered> <algo> <labels> <orig-ttl> <expiration> <inception>
    /// <key-tag> <signer-name> <signature-base64>` (RFC 4034 §3.2).
    /// `expiration`/`inception` accept either the numeric
    /// seconds-since-epoch form or `YYYYMMDDHHMMSS` (RFC 4034 §3.2);
    /// `to_text` only ever produces the numeric form.
    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        use super::nsec::parse_rdtype;
        use crate::rdata::{next_token, parse_num};
        let type_covered = parse_rdtype(next_token(tokens, 0, "RRSIG type covered")?)?;
        let algorithm = parse_num(next_token(tokens, 1, "RRSIG algorithm")?, "RRSIG algorithm")?;
        let labels = parse_num(next_token(tokens, 2, "RRSIG labels")?, "RRSIG labels")?;
        let original_ttl = parse_num(next_token(tokens, 3, "RRSIG original TTL")?, "RRSIG original TTL")?;
        let expiration = parse_rrsig_time(next_token(tokens, 4, "RRSIG expiration")?)?;
        let inception = parse_rrsig_time(next_token(tokens, 5, "RRSIG inception")?)?;
        let key_tag = parse_num(next_token(tokens, 6, "RRSIG key tag")?, "RRSIG key tag")?;
        let signer_name = parse_name_token(next_token(tokens, 7, "RRSIG signer name")?, origin)?;
        let b64: String = tokens[8..].concat();
        let signature = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, b64)
            .map_err(|e| RdataTextError::new(format!("invalid RRSIG base64: {e}")))?;
        Ok(Rrsig {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yyyymmddhhmmss_and_epoch_seconds_agree() {
        // 2024-01-15 12:30:00 UTC
        assert_eq!(parse_rrsig_time("20240115123000").unwrap(), 1_705_321_800);
        assert_eq!(parse_rrsig_time("1705321800").unwrap(), 1_705_321_800);
    }

    #[test]
    fn epoch_zero_is_1970() {
        assert_eq!(parse_rrsig_time("19700101000000").unwrap(), 0);
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        assert!(parse_rrsig_time("not-a-time").is_err());
    }
}
