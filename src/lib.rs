//! A DNS toolkit core: wire codec, in-memory zone model, zone-file
//! format, and a DNSSEC signing/validation engine. No network I/O and
//! no resolver policy — those are external collaborators (spec §1, §6).

pub mod dnssec;
pub mod error;
pub mod masterfile;
pub mod message;
pub mod name;
pub mod node;
pub mod rdata;
pub mod rrset;
pub mod serial;
pub mod transport;
pub mod wire;
pub mod zone;

pub use error::{
    DnssecError, MessageError, NameError, RdataTextError, TransactionError, WireError, ZoneError,
    ZoneFileError,
};
pub use message::Message;
pub use name::Name;
pub use node::Node;
pub use rdata::RData;
pub use rrset::{RRset, Rdataset};
pub use zone::{Transaction, Version, VersionedZone, WritableVersion, Zone};
