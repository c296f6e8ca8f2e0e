//! EIP-712 typed hashing of Safe transactions
//!
//! The canonical hash used for execution comes from the verifier contract itself
//! (see [`crate::hasher`]). This local implementation of the same domain is used
//! to cross-check hashes carried in imported bundles before anything is signed.

use alloy::primitives::{keccak256, Address, B256, U256};

use crate::codec::{pad32_address, pad32_u256};
use crate::contracts::{DOMAIN_SEPARATOR_TYPEHASH, SAFE_TX_TYPEHASH};
use crate::types::SafeTransactionParams;

/// Computes the domain separator for a Safe
///
/// domain_separator = keccak256(abi.encode(DOMAIN_SEPARATOR_TYPEHASH, chainId, safeAddress))
pub fn compute_domain_separator(chain_id: u64, safe_address: Address) -> B256 {
    let mut encoded = Vec::with_capacity(96);
    encoded.extend_from_slice(&DOMAIN_SEPARATOR_TYPEHASH);
    encoded.extend_from_slice(pad32_u256(U256::from(chain_id)).as_slice());
    encoded.extend_from_slice(pad32_address(safe_address).as_slice());

    keccak256(&encoded)
}

/// Computes the struct hash for SafeTx
///
/// safeTxHash = keccak256(abi.encode(
///     SAFE_TX_TYPEHASH,
///     to, value, keccak256(data), operation,
///     safeTxGas, baseGas, gasPrice, gasToken, refundReceiver, nonce
/// ))
pub fn compute_safe_tx_hash(params: &SafeTransactionParams) -> B256 {
    let words = [
        B256::from(SAFE_TX_TYPEHASH),
        pad32_address(params.to),
        pad32_u256(params.value),
        keccak256(&params.data),
        pad32_u256(U256::from(params.operation.as_u8())),
        pad32_u256(params.safe_tx_gas),
        pad32_u256(params.base_gas),
        pad32_u256(params.gas_price),
        pad32_address(params.gas_token),
        pad32_address(params.refund_receiver),
        pad32_u256(params.nonce),
    ];

    let mut encoded = Vec::with_capacity(words.len() * 32);
    for word in &words {
        encoded.extend_from_slice(word.as_slice());
    }

    keccak256(&encoded)
}

/// Computes the final EIP-712 hash to sign
///
/// hash = keccak256("\x19\x01" || domainSeparator || safeTxHash)
pub fn compute_transaction_hash(domain_separator: B256, safe_tx_hash: B256) -> B256 {
    let mut encoded = Vec::with_capacity(66);
    encoded.extend_from_slice(&[0x19, 0x01]);
    encoded.extend_from_slice(domain_separator.as_slice());
    encoded.extend_from_slice(safe_tx_hash.as_slice());

    keccak256(&encoded)
}

/// Computes the complete transaction hash for signing
pub fn compute_safe_transaction_hash(
    chain_id: u64,
    safe_address: Address,
    params: &SafeTransactionParams,
) -> B256 {
    let domain_separator = compute_domain_separator(chain_id, safe_address);
    let safe_tx_hash = compute_safe_tx_hash(params);
    compute_transaction_hash(domain_separator, safe_tx_hash)
}
