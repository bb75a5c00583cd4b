//! DNSSEC rdata types and the key-tag/algorithm tables they share
//! (RFC 4034, RFC 5155, RFC 8976). Grounded in shape on the teacher's
//! `src/dns/rdata/sec/` module, which stubbed signing with `todo!()`;
//! the codecs here are complete and the cryptography itself lives in
//! [`crate::dnssec`].

mod algorithm;
mod cdnskey;
mod cds;
mod dnskey;
mod ds;
mod key_tag;
mod nsec;
mod nsec3;
mod nsec3param;
mod rrsig;
mod tsig;
mod zonemd;

pub use algorithm::Algorithm;
pub use cdnskey::Cdnskey;
pub use cds::Cds;
pub use dnskey::Dnskey;
pub use ds::Ds;
pub use key_tag::key_tag;
pub use nsec::Nsec;
pub use nsec3::Nsec3;
pub use nsec3param::Nsec3param;
pub use rrsig::Rrsig;
pub use tsig::Tsig;
pub use zonemd::Zonemd;

pub const DIGEST_SHA1: u8 = 1;
pub const DIGEST_SHA256: u8 = 2;
pub const DIGEST_SHA384: u8 = 4;

pub const NSEC3_HASH_SHA1: u8 = 1;

pub const ZONEMD_SCHEME_SIMPLE: u8 = 1;
pub const ZONEMD_HASH_SHA384: u8 = 1;
pub const ZONEMD_HASH_SHA512: u8 = 2;
