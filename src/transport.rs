//! External collaborator contracts (spec §6). Network I/O, TLS, and
//! resolver-configuration discovery live outside this crate; these
//! traits are the seam a caller's async runtime or platform layer
//! plugs into. Nothing here performs I/O.

use std::time::{Duration, Instant};

/// A deadline past which a transport operation should give up rather
/// than block further. Collaborators are expected to honor it the way
/// their I/O primitive allows (select/poll timeout, cancellation token,
/// etc.) — this crate only carries the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(pub Instant);

impl Deadline {
    pub fn after(duration: Duration) -> Self {
        Deadline(Instant::now() + duration)
    }

    pub fn remaining(&self) -> Duration {
        self.0.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.0
    }
}

/// One complete UDP send, paired with when it actually went out —
/// resolver RTT accounting needs the latter, not just success/failure.
#[derive(Debug, Clone, Copy)]
pub struct SendOutcome {
    pub sent_bytes: usize,
    pub sent_at: Instant,
}

/// One complete UDP receive.
#[derive(Debug, Clone)]
pub struct RecvOutcome {
    pub buf: Vec<u8>,
    pub from: std::net::SocketAddr,
    pub received_at: Instant,
}

/// A datagram (UDP) collaborator (spec §6 "datagram sender/receiver").
pub trait DatagramTransport {
    type Error;

    fn send(
        &mut self,
        buf: &[u8],
        to: std::net::SocketAddr,
        deadline: Deadline,
    ) -> Result<SendOutcome, Self::Error>;

    /// `max` bounds the receive buffer; DNS-over-UDP messages never
    /// exceed 65535 bytes.
    fn recv(&mut self, max: usize, deadline: Deadline) -> Result<RecvOutcome, Self::Error>;
}

/// A byte-stream (TCP/TLS) collaborator. The core wraps each message in
/// a 16-bit big-endian length prefix itself — via
/// `Message::to_wire`'s `prepend_length` argument (spec §4.5 step 7) —
/// so this trait only ever needs to move already-framed bytes.
pub trait StreamTransport {
    type Error;

    fn sendall(&mut self, buf: &[u8], deadline: Deadline) -> Result<(), Self::Error>;

    /// Read exactly `n` bytes or fail; partial reads are not exposed
    /// to callers, since DNS stream framing always knows its length
    /// upfront (the 2-byte prefix).
    fn recv_exact(&mut self, n: usize, deadline: Deadline) -> Result<Vec<u8>, Self::Error>;
}

/// Certificate verification mode for a TLS collaborator (spec §6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertVerification {
    /// Accept any certificate. Never the default; callers must opt in.
    None,
    /// Verify against the platform's default trust store.
    DefaultCas,
    /// Verify against a single explicit CA bundle path.
    ExplicitPath(String),
}

/// What a DoT/DoH/DoQ collaborator needs to establish a session (spec
/// §6 "TLS context abstraction"). This crate does not implement TLS;
/// it only describes the shape a transport collaborator configures
/// itself from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsContext {
    pub verification: CertVerification,
    /// SNI / hostname verification target, when it differs from the
    /// connection's literal address.
    pub server_hostname: Option<String>,
}

/// One DoH/DoQ round trip: the core only produces/consumes wire bytes
/// (spec §6 "the core provides to_wire/from_wire and leaves HTTP/QUIC
/// framing to the transport"); everything else is the collaborator's.
pub trait HttpLikeTransport {
    type Error;

    fn exchange(&mut self, wire_request: &[u8], deadline: Deadline) -> Result<Vec<u8>, Self::Error>;
}

/// Resolver options discovered from the platform (spec §6
/// "Resolver-config contract"): `resolv.conf`, the Windows registry, or
/// WMI, depending on platform — none of which this crate reads itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolverOptions {
    pub ndots: u32,
    pub rotate: bool,
    pub timeout: Option<Duration>,
    pub edns0: bool,
}

/// The full system resolver configuration a platform provider hands
/// back (spec §6). The core consumes this to drive its resolver layer;
/// it never reads configuration files or the registry on its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolverConfig {
    pub domain: Option<String>,
    pub nameservers: Vec<std::net::SocketAddr>,
    pub search: Vec<String>,
    pub options: ResolverOptions,
}

/// A platform-specific collaborator that produces a [`ResolverConfig`]
/// (spec §6). Implementations read `resolv.conf`, the Windows registry,
/// WMI, etc. — whatever fits the host platform; this crate stays
/// agnostic to all of it.
pub trait ResolverConfigProvider {
    type Error;

    fn resolver_config(&self) -> Result<ResolverConfig, Self::Error>;
}

/// Optional-feature discovery by name (spec §6, §9): "dnssec", "doh",
/// "doq", "idna", "trio". Each maps to a build-time Cargo feature of this
/// crate (or, for "doh"/"doq"/"trio", is always absent — those transports
/// are external collaborators per §1 and this crate never implements
/// them). Checked once at process scope; there is no late-registration
/// path to guard since features are compile-time here, unlike the
/// source's runtime import-probing.
pub fn has_feature(name: &str) -> bool {
    match name {
        "dnssec" => true,
        "idna" => cfg!(feature = "idna"),
        "doh" | "doq" | "trio" => false,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_discovery_knows_dnssec_is_always_present() {
        assert!(has_feature("dnssec"));
        assert!(!has_feature("doq"));
        assert!(!has_feature("nonexistent"));
    }

    #[test]
    fn deadline_after_zero_is_already_expired() {
        let d = Deadline::after(Duration::from_secs(0));
        std::thread::sleep(Duration::from_millis(1));
        assert!(d.is_expired());
    }

    #[test]
    fn resolver_config_defaults_are_empty() {
        let cfg = ResolverConfig::default();
        assert!(cfg.nameservers.is_empty());
        assert!(cfg.domain.is_none());
        assert!(!cfg.options.edns0);
    }
}
