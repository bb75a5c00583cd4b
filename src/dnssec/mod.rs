//! The DNSSEC engine (spec §4.8): canonical signing form, per-algorithm
//! signature backends, key material, and the sign/validate/DS/NSEC3
//! entry points built on top of the plain [`crate::rdata::dnssec`] rdata
//! types.

pub mod algo;
pub mod canonical;
pub mod ds;
pub mod key;
pub mod nsec3;
pub mod policy;
pub mod sign;
pub mod sign_zone;
pub mod validate;

pub use canonical::signed_data;
pub use ds::make_ds;
pub use key::{KeyMaterial, SigningKey};
pub use nsec3::nsec3_hash;
pub use policy::Policy;
pub use sign::{sign_rrset, sign_rrset_and_verify};
pub use sign_zone::sign_zone;
pub use validate::validate_rrsig;
