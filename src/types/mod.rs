//! Type definitions for Safe transactions, signatures and account snapshots

pub mod decimal;
mod operation;
mod signature;
mod storage;
mod transaction;

pub use operation::Operation;
pub use signature::SafeSignature;
pub use storage::SafeStorage;
pub use transaction::{MetaTransaction, SafeTransactionParams};
