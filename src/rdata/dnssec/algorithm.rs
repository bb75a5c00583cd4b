use crate::error::DnssecError;

/// DNSSEC signing algorithm numbers (RFC 4034 Appendix A.1, RFC 8624).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Algorithm {
    Rsamd5 = 1,
    Dsa = 3,
    Rsasha1 = 5,
    Dsansec3sha1 = 6,
    Rsasha1nsec3sha1 = 7,
    Rsasha256 = 8,
    Rsasha512 = 10,
    Ecdsap256sha256 = 13,
    Ecdsap384sha384 = 14,
    Ed25519 = 15,
    Ed448 = 16,
}

impl Algorithm {
    pub fn from_u8(v: u8) -> Result<Self, DnssecError> {
        Ok(match v {
            1 => Algorithm::Rsamd5,
            3 => Algorithm::Dsa,
            5 => Algorithm::Rsasha1,
            6 => Algorithm::Dsansec3sha1,
            7 => Algorithm::Rsasha1nsec3sha1,
            8 => Algorithm::Rsasha256,
            10 => Algorithm::Rsasha512,
            13 => Algorithm::Ecdsap256sha256,
            14 => Algorithm::Ecdsap384sha384,
            15 => Algorithm::Ed25519,
            16 => Algorithm::Ed448,
            other => return Err(DnssecError::UnsupportedAlgorithm(other)),
        })
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// RSA family uses the key_tag special-case only for algorithm 1;
    /// everything else (including the other RSA variants) uses the
    /// general RFC 4034 Appendix B checksum.
    pub fn is_rsamd5(self) -> bool {
        matches!(self, Algorithm::Rsamd5)
    }
}
