//! Typed error taxonomies, one enum per subsystem (spec §7).
use thiserror::Error;

/// Errors from constructing or decoding a [`crate::name::Name`] (§4.1).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("label has zero length in the middle of a name")]
    EmptyLabel,
    #[error("label type bits are not 00 (plain) or 11 (pointer)")]
    BadLabelType,
    #[error("name exceeds 255 octets on the wire")]
    NameTooLong,
    #[error("label exceeds 63 octets")]
    LabelTooLong,
    #[error("compression pointer is cyclic or points forward")]
    BadCompressionPointer,
    #[error("a relative name was used where an absolute name or origin was required")]
    NeedAbsoluteNameOrOrigin,
    #[error("cannot concatenate onto an absolute name")]
    AbsoluteConcatenation,
    #[error("IDNA {profile} conversion failed: {reason}")]
    Idna { profile: &'static str, reason: String },
}

/// Errors from the wire reader/renderer (§4.6) and message framing (§4.5).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("name error at offset {offset}: {source}")]
    Name {
        offset: usize,
        #[source]
        source: NameError,
    },
    #[error("message shorter than the 12-byte header")]
    ShortHeader,
    #[error("read past the end of the current bounded region at offset {offset}")]
    FormError { offset: usize },
    #[error("OPT record outside the additional section, or more than one OPT")]
    BadEDNS,
    #[error("TSIG record is not the last record of the additional section")]
    BadTSIG,
    #[error("trailing bytes after the message was fully parsed")]
    TrailingJunk,
    #[error("message exceeds max_size and truncation was not requested")]
    TooBig,
    #[error("truncated response (TC=1)")]
    Truncated,
}

/// Errors parsing one rdata type's presentation-format text (§4.2,
/// §4.7). Carries no file/line context of its own: the zone-file reader
/// wraps it into a [`ZoneFileError::Syntax`] with the line it came from.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RdataTextError(pub String);

impl RdataTextError {
    pub fn new(msg: impl Into<String>) -> Self {
        RdataTextError(msg.into())
    }
}

/// Errors from the zone-file tokenizer/reader (§4.7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZoneFileError {
    #[error("{file}:{line}: {message}")]
    Syntax {
        file: String,
        line: usize,
        message: String,
    },
    #[error("{file}:{line}: relative name used before any $ORIGIN was set")]
    UnknownOrigin { file: String, line: usize },
    #[error("{file}:{line}: record would create both a CNAME and other data at this owner")]
    CNAMEAndOtherData { file: String, line: usize },
    #[error("the one-token unget buffer is full")]
    UngetBufferFull,
}

/// Errors from zone/node mutation and lookup (§4.4, §3).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZoneError {
    #[error("no rdataset found for the given name/type/covers")]
    KeyNotFound,
    #[error("zone has no node at its origin")]
    NoOrigin,
    #[error("zone origin has no SOA record")]
    NoSOA,
    #[error("zone origin has no NS records")]
    NoNS,
    #[error("name is not a subdomain of the zone origin")]
    NotSubdomain,
    #[error("adding this rdataset would violate the CNAME/other-data node invariant")]
    CNAMEAndOtherData,
    #[error("ZONEMD digest did not match the computed digest")]
    DigestVerificationFailure,
    #[error("no supported ZONEMD scheme/hash algorithm present at the origin")]
    NoSupportedZonemd,
}

/// Errors surfaced while assembling or parsing a [`crate::message::Message`] (§4.5).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error(transparent)]
    Wire(#[from] WireError),
    #[error("CNAME chain exceeded 16 hops")]
    ChainTooLong,
    #[error("no question in the message")]
    NoQuestion,
    #[error("padding was requested but the message has no EDNS OPT record to carry it")]
    PaddingRequiresEdns,
}

/// Errors from the DNSSEC engine (§4.8, §7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DnssecError {
    #[error("signature failed to validate")]
    ValidationFailure,
    #[error("algorithm {0} is not implemented")]
    UnsupportedAlgorithm(u8),
    #[error("key algorithm does not match RRSIG algorithm")]
    AlgorithmKeyMismatch,
    #[error("operation denied by policy for algorithm/digest {0}")]
    DeniedByPolicy(u8),
    #[error("no candidate DNSKEY found for this RRSIG")]
    NoCandidateKey,
    #[error("rrset is empty, cannot sign or canonicalize")]
    EmptyRrset,
    #[error("rrsig/rrset class or covered-type mismatch")]
    TypeMismatch,
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Zone(#[from] ZoneError),
}

/// Errors from the transaction/versioning layer (§4.9).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("transaction has already been committed or rolled back")]
    AlreadyEnded,
    #[error("write attempted on a read-only transaction")]
    ReadOnly,
    #[error("delete_exact: one or more specified rdatas are not present")]
    DeleteNotExact,
    #[error("serial update would wrap the RFC 1982 comparison window")]
    SerialWouldWrap,
    #[error(transparent)]
    Zone(#[from] ZoneError),
}
