//! Signature generation and aggregation for Safe transactions

mod aggregate;
mod ecdsa;

pub use aggregate::{build_signature_bytes, STATIC_SIGNATURE_LEN};
pub use ecdsa::{approved_hash_signature, sign_safe_hash, validate_signature};
