//! Per-type rdata (spec §4.2): a tagged union, one variant per
//! registered type plus [`RData::Generic`] for anything unrecognized
//! (RFC 3597). Grounded on the teacher's `RDataType`/`RDataOperation`
//! split (`examples/youngbloood-rsdns/src/dns/rdata/mod.rs`), generalized
//! to the new `Name`/`wire` types and extended with the type-specific
//! rules spec.md §4.2 calls out.

pub mod dnssec;

mod a;
mod aaaa;
mod caa;
mod cname;
mod generic;
mod hinfo;
mod mb;
mod md;
mod mf;
mod mg;
mod minfo;
mod mr;
mod mx;
mod naptr;
mod ns;
mod null;
mod opt;
mod ptr;
mod soa;
mod srv;
mod svcb;
mod tlsa;
mod txt;
mod wks;

pub use a::A;
pub use aaaa::Aaaa;
pub use caa::Caa;
pub use cname::Cname;
pub use generic::Generic;
pub use hinfo::Hinfo;
pub use mb::Mb;
pub use md::Md;
pub use mf::Mf;
pub use mg::Mg;
pub use minfo::Minfo;
pub use mr::Mr;
pub use mx::Mx;
pub use naptr::Naptr;
pub use ns::Ns;
pub use null::Null;
pub use opt::{Opt, OptOption};
pub use ptr::Ptr;
pub use soa::Soa;
pub use srv::Srv;
pub use svcb::{Https, Svcb, SvcbParam, SvcbParamKey};
pub use tlsa::Tlsa;
pub use txt::Txt;
pub use wks::Wks;

pub use dnssec::{Cdnskey, Cds, Dnskey, Ds, Nsec, Nsec3, Nsec3param, Rrsig, Tsig, Zonemd};

use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

pub type RdType = u16;
pub type RdClass = u16;

pub const CLASS_IN: RdClass = 1;
pub const CLASS_CH: RdClass = 3;
pub const CLASS_HS: RdClass = 4;
pub const CLASS_NONE: RdClass = 254;
pub const CLASS_ANY: RdClass = 255;

pub const TYPE_A: RdType = 1;
pub const TYPE_NS: RdType = 2;
pub const TYPE_MD: RdType = 3;
pub const TYPE_MF: RdType = 4;
pub const TYPE_CNAME: RdType = 5;
pub const TYPE_SOA: RdType = 6;
pub const TYPE_MB: RdType = 7;
pub const TYPE_MG: RdType = 8;
pub const TYPE_MR: RdType = 9;
pub const TYPE_NULL: RdType = 10;
pub const TYPE_WKS: RdType = 11;
pub const TYPE_PTR: RdType = 12;
pub const TYPE_HINFO: RdType = 13;
pub const TYPE_MINFO: RdType = 14;
pub const TYPE_MX: RdType = 15;
pub const TYPE_TXT: RdType = 16;
pub const TYPE_KEY: RdType = 25;
pub const TYPE_AAAA: RdType = 28;
pub const TYPE_SRV: RdType = 33;
pub const TYPE_NAPTR: RdType = 35;
pub const TYPE_OPT: RdType = 41;
pub const TYPE_DS: RdType = 43;
pub const TYPE_RRSIG: RdType = 46;
pub const TYPE_NSEC: RdType = 47;
pub const TYPE_DNSKEY: RdType = 48;
pub const TYPE_NSEC3: RdType = 50;
pub const TYPE_NSEC3PARAM: RdType = 51;
pub const TYPE_TLSA: RdType = 52;
pub const TYPE_CDS: RdType = 59;
pub const TYPE_CDNSKEY: RdType = 60;
pub const TYPE_SVCB: RdType = 64;
pub const TYPE_HTTPS: RdType = 65;
pub const TYPE_ZONEMD: RdType = 63;
pub const TYPE_CAA: RdType = 257;
pub const TYPE_TSIG: RdType = 250;
pub const TYPE_AXFR: RdType = 252;
pub const TYPE_MAILB: RdType = 253;
pub const TYPE_MAILA: RdType = 254;
pub const TYPE_ANY: RdType = 255;

/// Per-type wire/text/canonical conversions (spec §4.2). Implemented by
/// every concrete rdata struct; [`RData`] dispatches to it via a match.
pub trait RecordData: Sized {
    const RDTYPE: RdType;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError>;
    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError>;

    /// Canonical wire form (names lower-cased, no compression) used as
    /// DNSSEC hash input (spec §4.8).
    fn to_canonical(&self, out: &mut Vec<u8>);

    fn to_text(&self) -> String;

    /// Parse from whitespace-split presentation-format tokens (RFC 1035
    /// §5.1, spec §4.2, §4.7), the inverse of `to_text`. Quoted strings
    /// have already been unquoted into single tokens by the zone-file
    /// tokenizer; a relative name in a token is derelativized against
    /// `origin` when one is given.
    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError>;
}

/// Parse one token as a [`Name`], derelativizing against `origin` if the
/// token is not itself absolute.
pub(crate) fn parse_name_token(tok: &str, origin: Option<&Name>) -> Result<Name, RdataTextError> {
    let name = Name::from_text(tok).map_err(|e| RdataTextError::new(e.to_string()))?;
    if name.is_absolute() {
        return Ok(name);
    }
    match origin {
        Some(origin) => name
            .derelativize(origin)
            .map_err(|e| RdataTextError::new(e.to_string())),
        None => Ok(name),
    }
}

pub(crate) fn next_token<'a>(tokens: &'a [String], i: usize, what: &str) -> Result<&'a str, RdataTextError> {
    tokens
        .get(i)
        .map(|s| s.as_str())
        .ok_or_else(|| RdataTextError::new(format!("missing {what}")))
}

pub(crate) fn parse_num<T: std::str::FromStr>(tok: &str, what: &str) -> Result<T, RdataTextError> {
    tok.parse()
        .map_err(|_| RdataTextError::new(format!("invalid {what}: {tok:?}")))
}

/// Parse a BIND-style time value (RFC 2308 §4 extension): a bare number
/// of seconds, or digits followed by one of `s`/`m`/`h`/`d`/`w`
/// (case-insensitive), used for `$TTL` and the SOA timer fields.
pub(crate) fn parse_ttl_units(tok: &str) -> Result<u32, RdataTextError> {
    if tok.chars().all(|c| c.is_ascii_digit()) {
        return parse_num(tok, "TTL/timer value");
    }
    let mut total: u64 = 0;
    let mut digits = String::new();
    for c in tok.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let n: u64 = digits
            .parse()
            .map_err(|_| RdataTextError::new(format!("invalid TTL/timer value: {tok:?}")))?;
        digits.clear();
        let unit = match c.to_ascii_lowercase() {
            's' => 1,
            'm' => 60,
            'h' => 3600,
            'd' => 86400,
            'w' => 604800,
            _ => return Err(RdataTextError::new(format!("invalid TTL/timer unit in: {tok:?}"))),
        };
        total += n * unit;
    }
    if !digits.is_empty() {
        return Err(RdataTextError::new(format!(
            "TTL/timer value has trailing digits with no unit: {tok:?}"
        )));
    }
    u32::try_from(total).map_err(|_| RdataTextError::new(format!("TTL/timer value overflows u32: {tok:?}")))
}

pub(crate) fn parse_hex(tok: &str, what: &str) -> Result<Vec<u8>, RdataTextError> {
    data_encoding::HEXLOWER_PERMISSIVE
        .decode(tok.as_bytes())
        .map_err(|_| RdataTextError::new(format!("invalid hex in {what}: {tok:?}")))
}

/// Parse a type mnemonic or the RFC 3597 §5.1 `TYPEnnn` numeric
/// fallback, shared by the NSEC/NSEC3/RRSIG presentation parsers and
/// the zone-file reader's RR-type field (spec §4.2, §4.7).
pub(crate) fn parse_rdtype_mnemonic(tok: &str) -> Result<RdType, RdataTextError> {
    if let Some(digits) = tok.strip_prefix("TYPE") {
        return digits
            .parse()
            .map_err(|_| RdataTextError::new(format!("invalid TYPEnnn token: {tok:?}")));
    }
    Ok(match tok.to_ascii_uppercase().as_str() {
        "A" => TYPE_A,
        "NS" => TYPE_NS,
        "MD" => TYPE_MD,
        "MF" => TYPE_MF,
        "CNAME" => TYPE_CNAME,
        "SOA" => TYPE_SOA,
        "MB" => TYPE_MB,
        "MG" => TYPE_MG,
        "MR" => TYPE_MR,
        "NULL" => TYPE_NULL,
        "WKS" => TYPE_WKS,
        "PTR" => TYPE_PTR,
        "HINFO" => TYPE_HINFO,
        "MINFO" => TYPE_MINFO,
        "MX" => TYPE_MX,
        "TXT" => TYPE_TXT,
        "KEY" => TYPE_KEY,
        "AAAA" => TYPE_AAAA,
        "SRV" => TYPE_SRV,
        "NAPTR" => TYPE_NAPTR,
        "OPT" => TYPE_OPT,
        "DS" => TYPE_DS,
        "RRSIG" => TYPE_RRSIG,
        "NSEC" => TYPE_NSEC,
        "DNSKEY" => TYPE_DNSKEY,
        "NSEC3" => TYPE_NSEC3,
        "NSEC3PARAM" => TYPE_NSEC3PARAM,
        "TLSA" => TYPE_TLSA,
        "CDS" => TYPE_CDS,
        "CDNSKEY" => TYPE_CDNSKEY,
        "SVCB" => TYPE_SVCB,
        "HTTPS" => TYPE_HTTPS,
        "ZONEMD" => TYPE_ZONEMD,
        "CAA" => TYPE_CAA,
        "TSIG" => TYPE_TSIG,
        "AXFR" => TYPE_AXFR,
        "MAILB" => TYPE_MAILB,
        "MAILA" => TYPE_MAILA,
        "ANY" => TYPE_ANY,
        _ => return Err(RdataTextError::new(format!("unknown rrtype mnemonic: {tok:?}"))),
    })
}

/// Parse an RR class mnemonic (`IN`/`CH`/`HS`/`NONE`/`ANY`), used by the
/// zone-file reader's optional class field (spec §4.7).
pub(crate) fn parse_rdclass_mnemonic(tok: &str) -> Option<RdClass> {
    Some(match tok.to_ascii_uppercase().as_str() {
        "IN" => CLASS_IN,
        "CH" => CLASS_CH,
        "HS" => CLASS_HS,
        "NONE" => CLASS_NONE,
        "ANY" => CLASS_ANY,
        _ => return None,
    })
}

/// Inverse of [`parse_rdtype_mnemonic`]: the mnemonic for a known type,
/// or the RFC 3597 `TYPEnnn` form otherwise (spec §4.7 writer).
pub(crate) fn rdtype_mnemonic(rdtype: RdType) -> String {
    let s = match rdtype {
        TYPE_A => "A",
        TYPE_NS => "NS",
        TYPE_MD => "MD",
        TYPE_MF => "MF",
        TYPE_CNAME => "CNAME",
        TYPE_SOA => "SOA",
        TYPE_MB => "MB",
        TYPE_MG => "MG",
        TYPE_MR => "MR",
        TYPE_NULL => "NULL",
        TYPE_WKS => "WKS",
        TYPE_PTR => "PTR",
        TYPE_HINFO => "HINFO",
        TYPE_MINFO => "MINFO",
        TYPE_MX => "MX",
        TYPE_TXT => "TXT",
        TYPE_KEY => "KEY",
        TYPE_AAAA => "AAAA",
        TYPE_SRV => "SRV",
        TYPE_NAPTR => "NAPTR",
        TYPE_OPT => "OPT",
        TYPE_DS => "DS",
        TYPE_RRSIG => "RRSIG",
        TYPE_NSEC => "NSEC",
        TYPE_DNSKEY => "DNSKEY",
        TYPE_NSEC3 => "NSEC3",
        TYPE_NSEC3PARAM => "NSEC3PARAM",
        TYPE_TLSA => "TLSA",
        TYPE_CDS => "CDS",
        TYPE_CDNSKEY => "CDNSKEY",
        TYPE_SVCB => "SVCB",
        TYPE_HTTPS => "HTTPS",
        TYPE_ZONEMD => "ZONEMD",
        TYPE_CAA => "CAA",
        TYPE_TSIG => "TSIG",
        TYPE_AXFR => "AXFR",
        TYPE_MAILB => "MAILB",
        TYPE_MAILA => "MAILA",
        TYPE_ANY => "ANY",
        other => return format!("TYPE{other}"),
    };
    s.to_string()
}

/// Inverse of [`parse_rdclass_mnemonic`].
pub(crate) fn rdclass_mnemonic(rdclass: RdClass) -> String {
    match rdclass {
        CLASS_IN => "IN".to_string(),
        CLASS_CH => "CH".to_string(),
        CLASS_HS => "HS".to_string(),
        CLASS_NONE => "NONE".to_string(),
        CLASS_ANY => "ANY".to_string(),
        other => format!("CLASS{other}"),
    }
}

/// Parse the RFC 3597 §5 generic rdata form `\# <len> <hex...>` shared by
/// [`Null`] and [`Generic`]'s presentation format.
pub(crate) fn parse_generic_text(tokens: &[String]) -> Result<Vec<u8>, RdataTextError> {
    if tokens.first().map(String::as_str) != Some("\\#") {
        return Err(RdataTextError::new("expected \\# <len> <hex> generic rdata form"));
    }
    let len: usize = parse_num(next_token(tokens, 1, "generic rdata length")?, "generic rdata length")?;
    let hex: String = tokens[2..].concat();
    let bytes = parse_hex(&hex, "generic rdata")?;
    if bytes.len() != len {
        return Err(RdataTextError::new(format!(
            "generic rdata length mismatch: declared {len}, got {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// The tagged union of all registered rdata types, plus [`Generic`] for
/// any `(class, type)` combination without a registered codec.
#[derive(Debug, Clone, PartialEq)]
pub enum RData {
    A(A),
    Aaaa(Aaaa),
    Ns(Ns),
    Md(Md),
    Mf(Mf),
    Cname(Cname),
    Soa(Soa),
    Mb(Mb),
    Mg(Mg),
    Mr(Mr),
    Null(Null),
    Wks(Wks),
    Ptr(Ptr),
    Hinfo(Hinfo),
    Minfo(Minfo),
    Mx(Mx),
    Txt(Txt),
    Srv(Srv),
    Naptr(Naptr),
    Opt(Opt),
    Ds(Ds),
    Rrsig(Rrsig),
    Nsec(Nsec),
    Dnskey(Dnskey),
    Nsec3(Nsec3),
    Nsec3param(Nsec3param),
    Tlsa(Tlsa),
    Cds(Cds),
    Cdnskey(Cdnskey),
    Svcb(Svcb),
    Https(Https),
    Zonemd(Zonemd),
    Caa(Caa),
    Tsig(Tsig),
    Generic(Generic),
}

impl RData {
    pub fn rdtype(&self) -> RdType {
        match self {
            RData::A(_) => TYPE_A,
            RData::Aaaa(_) => TYPE_AAAA,
            RData::Ns(_) => TYPE_NS,
            RData::Md(_) => TYPE_MD,
            RData::Mf(_) => TYPE_MF,
            RData::Cname(_) => TYPE_CNAME,
            RData::Soa(_) => TYPE_SOA,
            RData::Mb(_) => TYPE_MB,
            RData::Mg(_) => TYPE_MG,
            RData::Mr(_) => TYPE_MR,
            RData::Null(_) => TYPE_NULL,
            RData::Wks(_) => TYPE_WKS,
            RData::Ptr(_) => TYPE_PTR,
            RData::Hinfo(_) => TYPE_HINFO,
            RData::Minfo(_) => TYPE_MINFO,
            RData::Mx(_) => TYPE_MX,
            RData::Txt(_) => TYPE_TXT,
            RData::Srv(_) => TYPE_SRV,
            RData::Naptr(_) => TYPE_NAPTR,
            RData::Opt(_) => TYPE_OPT,
            RData::Ds(_) => TYPE_DS,
            RData::Rrsig(_) => TYPE_RRSIG,
            RData::Nsec(_) => TYPE_NSEC,
            RData::Dnskey(_) => TYPE_DNSKEY,
            RData::Nsec3(_) => TYPE_NSEC3,
            RData::Nsec3param(_) => TYPE_NSEC3PARAM,
            RData::Tlsa(_) => TYPE_TLSA,
            RData::Cds(_) => TYPE_CDS,
            RData::Cdnskey(_) => TYPE_CDNSKEY,
            RData::Svcb(_) => TYPE_SVCB,
            RData::Https(_) => TYPE_HTTPS,
            RData::Zonemd(_) => TYPE_ZONEMD,
            RData::Caa(_) => TYPE_CAA,
            RData::Tsig(_) => TYPE_TSIG,
            RData::Generic(g) => g.rdtype,
        }
    }

    /// `covers`: the type an RRSIG/SIG protects, else 0 (spec §3's
    /// `extended_rdatatype`).
    pub fn covers(&self) -> RdType {
        match self {
            RData::Rrsig(sig) => sig.type_covered,
            _ => 0,
        }
    }

    pub fn from_wire(
        rdtype: RdType,
        reader: &mut Reader<'_>,
        rdlength: usize,
    ) -> Result<Self, WireError> {
        macro_rules! decode {
            ($variant:ident, $ty:ty) => {
                Ok(RData::$variant(<$ty>::from_wire(reader, rdlength)?))
            };
        }
        match rdtype {
            TYPE_A => decode!(A, A),
            TYPE_AAAA => decode!(Aaaa, Aaaa),
            TYPE_NS => decode!(Ns, Ns),
            TYPE_MD => decode!(Md, Md),
            TYPE_MF => decode!(Mf, Mf),
            TYPE_CNAME => decode!(Cname, Cname),
            TYPE_SOA => decode!(Soa, Soa),
            TYPE_MB => decode!(Mb, Mb),
            TYPE_MG => decode!(Mg, Mg),
            TYPE_MR => decode!(Mr, Mr),
            TYPE_NULL => decode!(Null, Null),
            TYPE_WKS => decode!(Wks, Wks),
            TYPE_PTR => decode!(Ptr, Ptr),
            TYPE_HINFO => decode!(Hinfo, Hinfo),
            TYPE_MINFO => decode!(Minfo, Minfo),
            TYPE_MX => decode!(Mx, Mx),
            TYPE_TXT => decode!(Txt, Txt),
            TYPE_SRV => decode!(Srv, Srv),
            TYPE_NAPTR => decode!(Naptr, Naptr),
            TYPE_OPT => decode!(Opt, Opt),
            TYPE_DS => decode!(Ds, Ds),
            TYPE_RRSIG => decode!(Rrsig, Rrsig),
            TYPE_NSEC => decode!(Nsec, Nsec),
            TYPE_DNSKEY => decode!(Dnskey, Dnskey),
            TYPE_NSEC3 => decode!(Nsec3, Nsec3),
            TYPE_NSEC3PARAM => decode!(Nsec3param, Nsec3param),
            TYPE_TLSA => decode!(Tlsa, Tlsa),
            TYPE_CDS => decode!(Cds, Cds),
            TYPE_CDNSKEY => decode!(Cdnskey, Cdnskey),
            TYPE_SVCB => decode!(Svcb, Svcb),
            TYPE_HTTPS => decode!(Https, Https),
            TYPE_ZONEMD => decode!(Zonemd, Zonemd),
            TYPE_CAA => decode!(Caa, Caa),
            TYPE_TSIG => decode!(Tsig, Tsig),
            _ => Ok(RData::Generic(Generic::from_wire_typed(
                rdtype, reader, rdlength,
            )?)),
        }
    }

    /// Construct rdata of `rdtype` from presentation-format tokens
    /// (spec §4.2, §4.7), the counterpart to [`RData::from_wire`] used
    /// by the zone-file reader. Any type without a registered codec
    /// falls back to the RFC 3597 `\# <len> <hex>` generic form.
    pub fn from_text(rdtype: RdType, tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        macro_rules! decode {
            ($variant:ident, $ty:ty) => {
                Ok(RData::$variant(<$ty>::from_text(tokens, origin)?))
            };
        }
        match rdtype {
            TYPE_A => decode!(A, A),
            TYPE_AAAA => decode!(Aaaa, Aaaa),
            TYPE_NS => decode!(Ns, Ns),
            TYPE_MD => decode!(Md, Md),
            TYPE_MF => decode!(Mf, Mf),
            TYPE_CNAME => decode!(Cname, Cname),
            TYPE_SOA => decode!(Soa, Soa),
            TYPE_MB => decode!(Mb, Mb),
            TYPE_MG => decode!(Mg, Mg),
            TYPE_MR => decode!(Mr, Mr),
            TYPE_NULL => decode!(Null, Null),
            TYPE_WKS => decode!(Wks, Wks),
            TYPE_PTR => decode!(Ptr, Ptr),
            TYPE_HINFO => decode!(Hinfo, Hinfo),
            TYPE_MINFO => decode!(Minfo, Minfo),
            TYPE_MX => decode!(Mx, Mx),
            TYPE_TXT => decode!(Txt, Txt),
            TYPE_SRV => decode!(Srv, Srv),
            TYPE_NAPTR => decode!(Naptr, Naptr),
            TYPE_OPT => decode!(Opt, Opt),
            TYPE_DS => decode!(Ds, Ds),
            TYPE_RRSIG => decode!(Rrsig, Rrsig),
            TYPE_NSEC => decode!(Nsec, Nsec),
            TYPE_DNSKEY => decode!(Dnskey, Dnskey),
            TYPE_NSEC3 => decode!(Nsec3, Nsec3),
            TYPE_NSEC3PARAM => decode!(Nsec3param, Nsec3param),
            TYPE_TLSA => decode!(Tlsa, Tlsa),
            TYPE_CDS => decode!(Cds, Cds),
            TYPE_CDNSKEY => decode!(Cdnskey, Cdnskey),
            TYPE_SVCB => decode!(Svcb, Svcb),
            TYPE_HTTPS => decode!(Https, Https),
            TYPE_ZONEMD => decode!(Zonemd, Zonemd),
            TYPE_CAA => decode!(Caa, Caa),
            TYPE_TSIG => decode!(Tsig, Tsig),
            _ => Ok(RData::Generic(Generic::from_text_typed(rdtype, tokens)?)),
        }
    }

    pub fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        macro_rules! enc {
            ($inner:expr) => {
                $inner.to_wire(renderer)
            };
        }
        match self {
            RData::A(x) => enc!(x),
            RData::Aaaa(x) => enc!(x),
            RData::Ns(x) => enc!(x),
            RData::Md(x) => enc!(x),
            RData::Mf(x) => enc!(x),
            RData::Cname(x) => enc!(x),
            RData::Soa(x) => enc!(x),
            RData::Mb(x) => enc!(x),
            RData::Mg(x) => enc!(x),
            RData::Mr(x) => enc!(x),
            RData::Null(x) => enc!(x),
            RData::Wks(x) => enc!(x),
            RData::Ptr(x) => enc!(x),
            RData::Hinfo(x) => enc!(x),
            RData::Minfo(x) => enc!(x),
            RData::Mx(x) => enc!(x),
            RData::Txt(x) => enc!(x),
            RData::Srv(x) => enc!(x),
            RData::Naptr(x) => enc!(x),
            RData::Opt(x) => enc!(x),
            RData::Ds(x) => enc!(x),
            RData::Rrsig(x) => enc!(x),
            RData::Nsec(x) => enc!(x),
            RData::Dnskey(x) => enc!(x),
            RData::Nsec3(x) => enc!(x),
            RData::Nsec3param(x) => enc!(x),
            RData::Tlsa(x) => enc!(x),
            RData::Cds(x) => enc!(x),
            RData::Cdnskey(x) => enc!(x),
            RData::Svcb(x) => enc!(x),
            RData::Https(x) => enc!(x),
            RData::Zonemd(x) => enc!(x),
            RData::Caa(x) => enc!(x),
            RData::Tsig(x) => enc!(x),
            RData::Generic(x) => x.to_wire(renderer),
        }
    }

    pub fn to_canonical(&self, out: &mut Vec<u8>) {
        macro_rules! enc {
            ($inner:expr) => {
                $inner.to_canonical(out)
            };
        }
        match self {
            RData::A(x) => enc!(x),
            RData::Aaaa(x) => enc!(x),
            RData::Ns(x) => enc!(x),
            RData::Md(x) => enc!(x),
            RData::Mf(x) => enc!(x),
            RData::Cname(x) => enc!(x),
            RData::Soa(x) => enc!(x),
            RData::Mb(x) => enc!(x),
            RData::Mg(x) => enc!(x),
            RData::Mr(x) => enc!(x),
            RData::Null(x) => enc!(x),
            RData::Wks(x) => enc!(x),
            RData::Ptr(x) => enc!(x),
            RData::Hinfo(x) => enc!(x),
            RData::Minfo(x) => enc!(x),
            RData::Mx(x) => enc!(x),
            RData::Txt(x) => enc!(x),
            RData::Srv(x) => enc!(x),
            RData::Naptr(x) => enc!(x),
            RData::Opt(x) => enc!(x),
            RData::Ds(x) => enc!(x),
            RData::Rrsig(x) => enc!(x),
            RData::Nsec(x) => enc!(x),
            RData::Dnskey(x) => enc!(x),
            RData::Nsec3(x) => enc!(x),
            RData::Nsec3param(x) => enc!(x),
            RData::Tlsa(x) => enc!(x),
            RData::Cds(x) => enc!(x),
            RData::Cdnskey(x) => enc!(x),
            RData::Svcb(x) => enc!(x),
            RData::Https(x) => enc!(x),
            RData::Zonemd(x) => enc!(x),
            RData::Caa(x) => enc!(x),
            RData::Tsig(x) => enc!(x),
            RData::Generic(x) => x.to_canonical(out),
        }
    }

    pub fn to_text(&self) -> String {
        macro_rules! t {
            ($inner:expr) => {
                $inner.to_text()
            };
        }
        match self {
            RData::A(x) => t!(x),
            RData::Aaaa(x) => t!(x),
            RData::Ns(x) => t!(x),
            RData::Md(x) => t!(x),
            RData::Mf(x) => t!(x),
            RData::Cname(x) => t!(x),
            RData::Soa(x) => t!(x),
            RData::Mb(x) => t!(x),
            RData::Mg(x) => t!(x),
            RData::Mr(x) => t!(x),
            RData::Null(x) => t!(x),
            RData::Wks(x) => t!(x),
            RData::Ptr(x) => t!(x),
            RData::Hinfo(x) => t!(x),
            RData::Minfo(x) => t!(x),
            RData::Mx(x) => t!(x),
            RData::Txt(x) => t!(x),
            RData::Srv(x) => t!(x),
            RData::Naptr(x) => t!(x),
            RData::Opt(x) => t!(x),
            RData::Ds(x) => t!(x),
            RData::Rrsig(x) => t!(x),
            RData::Nsec(x) => t!(x),
            RData::Dnskey(x) => t!(x),
            RData::Nsec3(x) => t!(x),
            RData::Nsec3param(x) => t!(x),
            RData::Tlsa(x) => t!(x),
            RData::Cds(x) => t!(x),
            RData::Cdnskey(x) => t!(x),
            RData::Svcb(x) => t!(x),
            RData::Https(x) => t!(x),
            RData::Zonemd(x) => t!(x),
            RData::Caa(x) => t!(x),
            RData::Tsig(x) => t!(x),
            RData::Generic(x) => x.to_text(),
        }
    }
}

/// Parse a length-prefixed `<character-string>` (RFC 1035 §3.3) at the
/// reader's current position.
pub(crate) fn read_character_string(reader: &mut Reader<'_>) -> Result<Vec<u8>, WireError> {
    let len = reader.read_u8()? as usize;
    Ok(reader.read_bytes(len)?.to_vec())
}

pub(crate) fn write_character_string(renderer: &mut Renderer, s: &[u8]) {
    renderer.write_u8(s.len() as u8);
    renderer.write_bytes(s);
}

pub(crate) fn name_to_text(n: &Name) -> String {
    n.to_string()
}

/// Encode a sorted, deduplicated type list into NSEC/NSEC3 window-block
/// bitmaps (RFC 4034 §4.1.2).
pub(crate) fn encode_type_bitmaps(types: &[RdType]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut sorted: Vec<u16> = types.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    let mut i = 0;
    while i < sorted.len() {
        let window = (sorted[i] >> 8) as u8;
        let mut bitmap = [0u8; 32];
        let mut max_byte = 0usize;
        while i < sorted.len() && (sorted[i] >> 8) as u8 == window {
            let lo = (sorted[i] & 0xFF) as usize;
            bitmap[lo / 8] |= 0x80 >> (lo % 8);
            max_byte = max_byte.max(lo / 8);
            i += 1;
        }
        let len = max_byte + 1;
        out.push(window);
        out.push(len as u8);
        out.extend_from_slice(&bitmap[..len]);
    }
    out
}

pub(crate) fn decode_type_bitmaps(buf: &[u8]) -> Vec<RdType> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos + 2 <= buf.len() {
        let window = buf[pos] as u16;
        let len = buf[pos + 1] as usize;
        pos += 2;
        if pos + len > buf.len() {
            break;
        }
        for (byte_idx, byte) in buf[pos..pos + len].iter().enumerate() {
            for bit in 0..8 {
                if byte & (0x80 >> bit) != 0 {
                    out.push((window << 8) | ((byte_idx * 8 + bit) as u16));
                }
            }
        }
        pos += len;
    }
    out
}
