//! Encoding utilities for Safe transactions

mod bundle;
mod eip712;
mod multisend;

pub use bundle::{decode_bundle, encode_bundle, merge_signed_bundles, ExportBundle, SignedBundle};
pub use eip712::{
    compute_domain_separator, compute_safe_transaction_hash, compute_safe_tx_hash,
    compute_transaction_hash,
};
pub use multisend::{encode_multisend_call, encode_multisend_data, encode_transaction};
