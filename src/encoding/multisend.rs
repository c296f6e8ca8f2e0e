//! MultiSend transaction encoding
//!
//! The MultiSend contract expects transactions to be encoded in a packed format:
//! - operation: 1 byte (0 = Call, 1 = DelegateCall)
//! - to: 20 bytes
//! - value: 32 bytes
//! - data length: 32 bytes
//! - data: variable length
//!
//! Entries are concatenated in list order with no padding; on-chain execution order
//! equals that order.

use alloy::primitives::Bytes;
use alloy::sol_types::SolCall;

use crate::codec::{pad32_len, pad32_u256};
use crate::contracts::IMultiSendCallOnly;
use crate::types::MetaTransaction;

/// Fixed per-entry overhead: operation + to + value + data length
pub const ENTRY_HEADER_LEN: usize = 1 + 20 + 32 + 32;

/// Encodes a single transaction for MultiSend packed format
///
/// Format: operation (1 byte) | to (20 bytes) | value (32 bytes) | data length (32 bytes) | data
pub fn encode_transaction(tx: &MetaTransaction) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(ENTRY_HEADER_LEN + tx.data.len());
    append_transaction(&mut encoded, tx);
    encoded
}

fn append_transaction(out: &mut Vec<u8>, tx: &MetaTransaction) {
    out.push(tx.operation.as_u8());
    out.extend_from_slice(tx.to.as_slice());
    out.extend_from_slice(pad32_u256(tx.value).as_slice());
    out.extend_from_slice(pad32_len(tx.data.len()).as_slice());
    out.extend_from_slice(&tx.data);
}

/// Encodes multiple transactions for MultiSend
pub fn encode_multisend_data(txs: &[MetaTransaction]) -> Bytes {
    let total: usize = txs.iter().map(|tx| ENTRY_HEADER_LEN + tx.data.len()).sum();
    let mut encoded = Vec::with_capacity(total);

    for tx in txs {
        append_transaction(&mut encoded, tx);
    }

    Bytes::from(encoded)
}

/// `multiSend(bytes)` calldata wrapping the packed batch
pub fn encode_multisend_call(txs: &[MetaTransaction]) -> Bytes {
    let call = IMultiSendCallOnly::multiSendCall {
        transactions: encode_multisend_data(txs),
    };
    Bytes::from(call.abi_encode())
}
