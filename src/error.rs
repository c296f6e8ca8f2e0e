//! Error types for safe-lite

use alloy::primitives::{Address, B256};
use thiserror::Error;

/// Result type alias for safe-lite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the transaction, address and signature engine
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed hex or wrong length when parsing an address
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),

    /// The chain-read capability failed; `reason` is the transport's own message
    #[error("Failed to read {what}: {reason}")]
    ChainReadFailed { what: &'static str, reason: String },

    /// A transaction was requested for an empty call list
    #[error("No transactions supplied")]
    NoTransactions,

    /// No Safe account is bound to the hasher
    #[error("No Safe account bound")]
    MissingAccount,

    /// The factory reports a different deployment address than the one computed locally
    #[error("Computed Safe address {computed} does not match factory address {reported}")]
    AddressMismatch { computed: Address, reported: Address },

    /// A transaction hash does not match the locally computed typed hash
    #[error("Transaction hash {reported} does not match computed hash {computed}")]
    HashMismatch { computed: B256, reported: B256 },

    /// A signature failed basic shape validation
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// An export/import bundle could not be decoded or is inconsistent
    #[error("Bundle error: {0}")]
    Bundle(String),

    /// Signature generation failed
    #[error("Failed to sign: {0}")]
    Signing(String),

    /// ABI encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl Error {
    /// Returns `true` for failures a caller may retry (transport errors only).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::ChainReadFailed { .. })
    }
}

impl From<alloy::sol_types::Error> for Error {
    fn from(err: alloy::sol_types::Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl From<alloy::signers::Error> for Error {
    fn from(err: alloy::signers::Error) -> Self {
        Error::Signing(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Bundle(err.to_string())
    }
}
